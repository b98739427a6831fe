pub mod calendar;
pub mod repository;
pub mod service;

pub use calendar::BookingRejection;
pub use repository::{PropertyHandle, PropertyStore};
pub use service::{BookingError, BookingService};
