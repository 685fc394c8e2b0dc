//! `bayline-workorders` — the scheduled-repair aggregate and bay scheduling.
//!
//! A work order covers a vehicle, a time window, a physical spot (bay), an
//! assigned laborer, and a non-empty list of repair tasks. This crate enforces
//! the aggregate's invariants and lifecycle, and provides the pure
//! availability functions the scheduling services are built on.

pub mod errors;
pub mod repair_task;
pub mod schedule;
pub mod spot;
pub mod state;
pub mod workorder;

pub use repair_task::{Part, RepairTask, RepairTaskId};
pub use schedule::{AvailabilitySlot, SlotStatus, SpotSchedule};
pub use spot::Spot;
pub use state::WorkOrderState;
pub use workorder::{LaborId, WorkOrder, WorkOrderId};
