use crate::calendar::{self, BookingRejection};
use crate::repository::PropertyStore;
use chrono::NaiveDateTime;
use slotwise_shared::models::{RegisterPropertyRequest, Slot, SlotBookRequest};
use slotwise_shared::{Clock, Property};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("property not found: {0}")]
    NotFound(Uuid),

    #[error("invalid booking request: {0}")]
    InvalidRequest(#[from] BookingRejection),
}

/// Orchestrates the property store and the slot calendar: property
/// registration and listing, booking admission, and availability
/// queries across one or all properties.
pub struct BookingService {
    store: Arc<dyn PropertyStore>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    pub fn new(store: Arc<dyn PropertyStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn list_properties(&self) -> Vec<Property> {
        let mut properties = Vec::new();
        for handle in self.store.values().await {
            properties.push(handle.lock().await.clone());
        }
        properties
    }

    pub async fn register_property(&self, request: RegisterPropertyRequest) -> Property {
        let property = Property::new(request.name, request.description);
        info!(property_id = %property.property_id, name = %property.name, "registered property");
        let record = property.clone();
        self.store.put(property).await;
        record
    }

    /// Validates and commits a booking. Both steps run under the
    /// property's mutex so concurrent requests cannot both take the
    /// last place in a slot.
    pub async fn book_slot(
        &self,
        property_id: Uuid,
        request: SlotBookRequest,
    ) -> Result<Slot, BookingError> {
        let handle = self
            .store
            .get(property_id)
            .await
            .ok_or(BookingError::NotFound(property_id))?;

        let mut property = handle.lock().await;
        let now = self.clock.now();
        calendar::validate_booking(&property.occupancy, &request, now)?;
        calendar::commit_booking(&mut property.occupancy, &request);

        info!(
            %property_id,
            start_time = %request.start_time,
            user_id = %request.user_id,
            "slot booked"
        );
        Ok(Slot {
            property_id,
            timestamp: request.start_time,
            available_count: None,
        })
    }

    pub async fn find_available_slots_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<Slot>, BookingError> {
        let handle = self
            .store
            .get(property_id)
            .await
            .ok_or(BookingError::NotFound(property_id))?;

        let mut property = handle.lock().await;
        let now = self.clock.now();
        let slots = calendar::enumerate_available_slots(&mut property, now);
        debug!(%property_id, open_slots = slots.len(), "enumerated availability");
        Ok(slots)
    }

    /// Open slots of every property, grouped by exact slot start time.
    /// Ascending by timestamp; within a timestamp, store order.
    pub async fn find_all_available_slots(&self) -> BTreeMap<NaiveDateTime, Vec<Slot>> {
        let mut grouped: BTreeMap<NaiveDateTime, Vec<Slot>> = BTreeMap::new();
        for handle in self.store.values().await {
            let mut property = handle.lock().await;
            let now = self.clock.now();
            for slot in calendar::enumerate_available_slots(&mut property, now) {
                grouped.entry(slot.timestamp).or_default().push(slot);
            }
        }
        grouped
    }
}
