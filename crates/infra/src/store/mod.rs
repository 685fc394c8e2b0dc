//! Persistence boundary: queryable, trackable aggregate collections.
//!
//! Traits so services can be tested against the in-memory backend and wired
//! to a real database by the excluded outer layers. `upsert` is the atomic
//! "save": the aggregate is persisted whole or not at all.

pub mod in_memory;

use chrono::{DateTime, Utc};
use thiserror::Error;

use bayline_customers::{Customer, CustomerId};
use bayline_workorders::{WorkOrder, WorkOrderId};

pub use in_memory::{InMemoryCustomerStore, InMemoryWorkOrderStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    LockPoisoned,
}

pub trait CustomerStore: Send + Sync {
    fn get(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;
    fn list(&self) -> Result<Vec<Customer>, StoreError>;
    fn upsert(&self, customer: Customer) -> Result<(), StoreError>;
    /// Returns whether the customer existed.
    fn remove(&self, id: CustomerId) -> Result<bool, StoreError>;
}

pub trait WorkOrderStore: Send + Sync {
    fn get(&self, id: WorkOrderId) -> Result<Option<WorkOrder>, StoreError>;
    fn list(&self) -> Result<Vec<WorkOrder>, StoreError>;
    /// Work orders whose window overlaps `[start_at, end_at)`.
    fn list_overlapping(
        &self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Result<Vec<WorkOrder>, StoreError>;
    fn upsert(&self, work_order: WorkOrder) -> Result<(), StoreError>;
    /// Returns whether the work order existed.
    fn remove(&self, id: WorkOrderId) -> Result<bool, StoreError>;
}
