use slotwise_core::BookingService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookingService>,
}
