pub mod clock;
pub mod models;

pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{Occupancy, Property, RegisterPropertyRequest, Slot, SlotBookRequest};
