use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use bayline_customers::{Customer, CustomerId};
use bayline_workorders::{WorkOrder, WorkOrderId};

use super::{CustomerStore, StoreError, WorkOrderStore};

/// In-memory customer collection.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    items: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerStore for InMemoryCustomerStore {
    fn get(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(items.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Customer>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut all: Vec<Customer> = items.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    fn upsert(&self, customer: Customer) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::LockPoisoned)?;
        items.insert(customer.id_typed(), customer);
        Ok(())
    }

    fn remove(&self, id: CustomerId) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(items.remove(&id).is_some())
    }
}

/// In-memory work-order collection.
#[derive(Debug, Default)]
pub struct InMemoryWorkOrderStore {
    items: RwLock<HashMap<WorkOrderId, WorkOrder>>,
}

impl InMemoryWorkOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkOrderStore for InMemoryWorkOrderStore {
    fn get(&self, id: WorkOrderId) -> Result<Option<WorkOrder>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(items.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<WorkOrder>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut all: Vec<WorkOrder> = items.values().cloned().collect();
        all.sort_by_key(|wo| wo.start_at());
        Ok(all)
    }

    fn list_overlapping(
        &self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Result<Vec<WorkOrder>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut hits: Vec<WorkOrder> = items
            .values()
            .filter(|wo| wo.overlaps(start_at, end_at))
            .cloned()
            .collect();
        hits.sort_by_key(|wo| wo.start_at());
        Ok(hits)
    }

    fn upsert(&self, work_order: WorkOrder) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::LockPoisoned)?;
        items.insert(work_order.id_typed(), work_order);
        Ok(())
    }

    fn remove(&self, id: WorkOrderId) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(items.remove(&id).is_some())
    }
}
