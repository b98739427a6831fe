use async_trait::async_trait;
use slotwise_shared::Property;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Shared handle to one property. The mutex is the per-property
/// critical section: holders may read and mutate occupancy, and a
/// booking's validate-then-commit pair must happen under one guard.
pub type PropertyHandle = Arc<Mutex<Property>>;

/// Keyed collection of properties. In-memory and non-failing in this
/// design; a persistent implementation would surface its own fault
/// taxonomy behind the same seam.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Option<PropertyHandle>;

    async fn put(&self, property: Property) -> PropertyHandle;

    async fn values(&self) -> Vec<PropertyHandle>;
}
