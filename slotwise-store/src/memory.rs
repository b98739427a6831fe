use async_trait::async_trait;
use slotwise_core::repository::{PropertyHandle, PropertyStore};
use slotwise_shared::Property;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Process-lifetime keyed store of properties. Read-mostly: the outer
/// lock is only written on registration; per-property mutation goes
/// through each entry's own mutex.
#[derive(Default)]
pub struct InMemoryPropertyStore {
    properties: RwLock<HashMap<Uuid, PropertyHandle>>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn get(&self, id: Uuid) -> Option<PropertyHandle> {
        self.properties.read().await.get(&id).cloned()
    }

    async fn put(&self, property: Property) -> PropertyHandle {
        let id = property.property_id;
        let handle: PropertyHandle = Arc::new(Mutex::new(property));
        self.properties.write().await.insert(id, handle.clone());
        handle
    }

    async fn values(&self) -> Vec<PropertyHandle> {
        self.properties.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_returns_same_handle() {
        let store = InMemoryPropertyStore::new();
        let property = Property::new("Studio A", "Ground floor");
        let id = property.property_id;

        let put_handle = store.put(property).await;
        let got_handle = store.get(id).await.unwrap();
        assert!(Arc::ptr_eq(&put_handle, &got_handle));

        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn values_sees_every_registered_property() {
        let store = InMemoryPropertyStore::new();
        store.put(Property::new("A", "")).await;
        store.put(Property::new("B", "")).await;

        assert_eq!(store.values().await.len(), 2);
    }

    #[tokio::test]
    async fn mutations_through_one_handle_are_visible_through_another() {
        let store = InMemoryPropertyStore::new();
        let property = Property::new("A", "");
        let id = property.property_id;
        store.put(property).await;

        {
            let handle = store.get(id).await.unwrap();
            let mut guard = handle.lock().await;
            guard.occupancy.insert(
                chrono::NaiveDateTime::parse_from_str("2024-01-01T09:00:00", "%Y-%m-%dT%H:%M:%S")
                    .unwrap(),
                vec!["u1".to_string()],
            );
        }

        let handle = store.get(id).await.unwrap();
        assert_eq!(handle.lock().await.occupancy.len(), 1);
    }
}
