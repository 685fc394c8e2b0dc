//! `bayline-infra` — persistence boundary, tag cache, and application services.
//!
//! The domain crates are pure; this crate supplies the collaborators around
//! them: queryable stores with an atomic save, a tag-addressed cache that is
//! invalidated on write, and the services that orchestrate
//! load → mutate → save → evict for each request.

pub mod cache;
pub mod customers;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod workorders;

pub use cache::{CUSTOMER_TAG, InMemoryTagCache, TagCache, WORK_ORDER_TAG};
pub use customers::{
    CreateCustomerCommand, CustomerService, CustomerView, UpdateCustomerCommand, VehicleData,
    VehicleView,
};
pub use error::AppError;
pub use store::{
    CustomerStore, InMemoryCustomerStore, InMemoryWorkOrderStore, StoreError, WorkOrderStore,
};
pub use workorders::{PartData, RepairTaskData, ScheduleWorkOrderCommand, WorkOrderService};
