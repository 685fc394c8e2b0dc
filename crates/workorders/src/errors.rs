//! Structured errors for the work-order aggregate.

use bayline_core::DomainError;

use crate::state::WorkOrderState;
use crate::workorder::WorkOrderId;

pub fn work_order_id_required() -> DomainError {
    DomainError::validation("work_order.id_required", "work order id is required")
}

pub fn vehicle_id_required() -> DomainError {
    DomainError::validation("work_order.vehicle_id_required", "vehicle id is required")
}

pub fn repair_tasks_required() -> DomainError {
    DomainError::validation(
        "work_order.repair_tasks_required",
        "a work order needs at least one repair task",
    )
}

pub fn labor_id_required() -> DomainError {
    DomainError::validation("work_order.labor_id_required", "labor id is required")
}

pub fn labor_id_empty(work_order_id: WorkOrderId) -> DomainError {
    DomainError::validation(
        "work_order.labor_id_empty",
        format!("cannot assign an empty labor id to work order {work_order_id}"),
    )
}

pub fn invalid_timing() -> DomainError {
    DomainError::validation(
        "work_order.invalid_timing",
        "start time must be strictly before end time",
    )
}

pub fn spot_invalid() -> DomainError {
    DomainError::validation("work_order.spot_invalid", "spot is not a recognized bay")
}

pub fn invalid_state_transition(current: WorkOrderState, attempted: WorkOrderState) -> DomainError {
    DomainError::invariant(
        "work_order.invalid_state_transition",
        format!("cannot transition work order from {current} to {attempted}"),
    )
}

pub fn not_editable(state: WorkOrderState) -> DomainError {
    DomainError::invariant(
        "work_order.not_editable",
        format!("repair tasks are frozen once the order leaves Scheduled (state: {state})"),
    )
}

pub fn repair_task_id_required() -> DomainError {
    DomainError::validation("repair_task.id_required", "repair task id is required")
}

pub fn repair_task_name_required() -> DomainError {
    DomainError::validation("repair_task.name_required", "repair task name is required")
}

pub fn repair_task_invalid_duration() -> DomainError {
    DomainError::validation(
        "repair_task.invalid_duration",
        "estimated duration must be positive",
    )
}

pub fn cost_overflow() -> DomainError {
    DomainError::invariant(
        "work_order.cost_overflow",
        "total cost exceeds the representable amount",
    )
}

pub fn part_name_required() -> DomainError {
    DomainError::validation("part.name_required", "part name is required")
}

pub fn part_invalid_quantity() -> DomainError {
    DomainError::validation("part.invalid_quantity", "part quantity must be positive")
}
