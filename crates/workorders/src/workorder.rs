use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bayline_core::{AggregateId, AggregateRoot, DomainErrors, DomainResult, Updated};
use bayline_customers::VehicleId;

use crate::errors;
use crate::repair_task::RepairTask;
use crate::spot::Spot;
use crate::state::WorkOrderState;

/// Work order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkOrderId(pub AggregateId);

impl WorkOrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for WorkOrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Identifier of the laborer assigned to a work order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaborId(pub AggregateId);

impl LaborId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LaborId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: WorkOrder — a scheduled repair job.
///
/// Owns a time window, a physical [`Spot`], an assigned laborer, and a
/// non-empty list of [`RepairTask`]s. Created through the all-or-nothing
/// [`WorkOrder::create`] factory and mutated only through named operations
/// that re-validate the relevant invariant; every mutator leaves the
/// aggregate unchanged on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkOrder {
    id: WorkOrderId,
    vehicle_id: VehicleId,
    labor_id: LaborId,
    spot: Spot,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    state: WorkOrderState,
    repair_tasks: Vec<RepairTask>,
}

impl WorkOrder {
    /// Validate and create a work order in `Scheduled` state.
    ///
    /// All invariants are checked atomically: any violation yields the full
    /// collected error list and no partial object is produced.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: WorkOrderId,
        vehicle_id: VehicleId,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        labor_id: LaborId,
        spot: Spot,
        repair_tasks: Vec<RepairTask>,
    ) -> DomainResult<Self> {
        let mut violations = Vec::new();

        if id.0.is_nil() {
            violations.push(errors::work_order_id_required());
        }
        if vehicle_id.0.is_nil() {
            violations.push(errors::vehicle_id_required());
        }
        if repair_tasks.is_empty() {
            violations.push(errors::repair_tasks_required());
        }
        if labor_id.0.is_nil() {
            violations.push(errors::labor_id_required());
        }
        if start_at >= end_at {
            violations.push(errors::invalid_timing());
        }

        if let Some(errors) = DomainErrors::from_vec(violations) {
            return Err(errors);
        }

        Ok(Self {
            id,
            vehicle_id,
            labor_id,
            spot,
            start_at,
            end_at,
            state: WorkOrderState::Scheduled,
            repair_tasks,
        })
    }

    /// Reassign the laborer. Rejects the empty reference.
    pub fn update_labor(&mut self, labor_id: LaborId) -> DomainResult<Updated> {
        if labor_id.0.is_nil() {
            return Err(errors::labor_id_empty(self.id).into());
        }
        self.labor_id = labor_id;
        Ok(Updated)
    }

    /// Move the order to another bay.
    pub fn update_spot(&mut self, spot: Spot) -> DomainResult<Updated> {
        self.spot = spot;
        Ok(Updated)
    }

    /// Replace the time window, re-validating `start < end`.
    pub fn update_timing(
        &mut self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> DomainResult<Updated> {
        if start_at >= end_at {
            return Err(errors::invalid_timing().into());
        }
        self.start_at = start_at;
        self.end_at = end_at;
        Ok(Updated)
    }

    /// Advance the lifecycle. Only the immediate successor in the transition
    /// table is accepted; anything else reports the (current, attempted) pair.
    pub fn update_state(&mut self, target: WorkOrderState) -> DomainResult<Updated> {
        if !self.state.can_transition_to(target) {
            return Err(errors::invalid_state_transition(self.state, target).into());
        }
        self.state = target;
        Ok(Updated)
    }

    /// Attach another repair task. The task list is frozen once the order has
    /// advanced past `Scheduled`.
    pub fn add_repair_task(&mut self, task: RepairTask) -> DomainResult<Updated> {
        if !self.is_editable() {
            return Err(errors::not_editable(self.state).into());
        }
        self.repair_tasks.push(task);
        Ok(Updated)
    }

    /// Whether the repair-task list may still change.
    pub fn is_editable(&self) -> bool {
        self.state == WorkOrderState::Scheduled
    }

    /// Half-open window overlap: windows that merely touch do not overlap.
    pub fn overlaps(&self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> bool {
        self.start_at < end_at && start_at < self.end_at
    }

    pub fn id_typed(&self) -> WorkOrderId {
        self.id
    }

    pub fn vehicle_id(&self) -> VehicleId {
        self.vehicle_id
    }

    pub fn labor_id(&self) -> LaborId {
        self.labor_id
    }

    pub fn spot(&self) -> Spot {
        self.spot
    }

    pub fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    pub fn end_at(&self) -> DateTime<Utc> {
        self.end_at
    }

    pub fn state(&self) -> WorkOrderState {
        self.state
    }

    pub fn repair_tasks(&self) -> &[RepairTask] {
        &self.repair_tasks
    }

    /// Sum of all repair tasks (labor + parts), in cents. Checked: money
    /// never wraps.
    pub fn total_cost_cents(&self) -> DomainResult<u64> {
        let mut total: u64 = 0;
        for task in &self.repair_tasks {
            total = total
                .checked_add(task.total_cost_cents()?)
                .ok_or_else(errors::cost_overflow)?;
        }
        Ok(total)
    }
}

impl AggregateRoot for WorkOrder {
    type Id = WorkOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair_task::RepairTaskId;
    use chrono::Duration;

    fn work_order_id() -> WorkOrderId {
        WorkOrderId::new(AggregateId::new())
    }

    fn vehicle_id() -> VehicleId {
        VehicleId::new(AggregateId::new())
    }

    fn labor_id() -> LaborId {
        LaborId::new(AggregateId::new())
    }

    fn nil() -> AggregateId {
        AggregateId::from_uuid(uuid::Uuid::nil())
    }

    fn repair_task() -> RepairTask {
        RepairTask::create(
            RepairTaskId::new(AggregateId::new()),
            "Brake pads",
            12000,
            60,
            vec![],
        )
        .unwrap()
    }

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc::now();
        (start, start + Duration::hours(1))
    }

    fn scheduled_order() -> WorkOrder {
        let (start, end) = window();
        WorkOrder::create(
            work_order_id(),
            vehicle_id(),
            start,
            end,
            labor_id(),
            Spot::A,
            vec![repair_task()],
        )
        .unwrap()
    }

    #[test]
    fn create_succeeds_and_fields_equal_inputs() {
        let id = work_order_id();
        let vehicle = vehicle_id();
        let labor = labor_id();
        let (start, end) = window();
        let task = repair_task();

        let wo = WorkOrder::create(id, vehicle, start, end, labor, Spot::B, vec![task.clone()])
            .unwrap();

        assert_eq!(wo.id_typed(), id);
        assert_eq!(wo.vehicle_id(), vehicle);
        assert_eq!(wo.labor_id(), labor);
        assert_eq!(wo.spot(), Spot::B);
        assert_eq!(wo.start_at(), start);
        assert_eq!(wo.end_at(), end);
        assert_eq!(wo.state(), WorkOrderState::Scheduled);
        assert_eq!(wo.repair_tasks(), &[task]);
    }

    #[test]
    fn create_rejects_nil_id() {
        let (start, end) = window();
        let err = WorkOrder::create(
            WorkOrderId::new(nil()),
            vehicle_id(),
            start,
            end,
            labor_id(),
            Spot::A,
            vec![repair_task()],
        )
        .unwrap_err();

        assert_eq!(err.top().code, "work_order.id_required");
    }

    #[test]
    fn create_rejects_nil_vehicle_id() {
        let (start, end) = window();
        let err = WorkOrder::create(
            work_order_id(),
            VehicleId::new(nil()),
            start,
            end,
            labor_id(),
            Spot::A,
            vec![repair_task()],
        )
        .unwrap_err();

        assert_eq!(err.top().code, "work_order.vehicle_id_required");
    }

    #[test]
    fn create_rejects_empty_repair_task_list() {
        let (start, end) = window();
        let err = WorkOrder::create(
            work_order_id(),
            vehicle_id(),
            start,
            end,
            labor_id(),
            Spot::A,
            vec![],
        )
        .unwrap_err();

        assert_eq!(err.top().code, "work_order.repair_tasks_required");
    }

    #[test]
    fn create_rejects_nil_labor_id() {
        let (start, end) = window();
        let err = WorkOrder::create(
            work_order_id(),
            vehicle_id(),
            start,
            end,
            LaborId::new(nil()),
            Spot::A,
            vec![repair_task()],
        )
        .unwrap_err();

        assert_eq!(err.top().code, "work_order.labor_id_required");
    }

    #[test]
    fn create_rejects_inverted_timing() {
        let (start, end) = window();
        let err = WorkOrder::create(
            work_order_id(),
            vehicle_id(),
            end,
            start,
            labor_id(),
            Spot::A,
            vec![repair_task()],
        )
        .unwrap_err();

        assert_eq!(err.top().code, "work_order.invalid_timing");
    }

    #[test]
    fn create_collects_all_violations_in_field_order() {
        let (start, end) = window();
        let err = WorkOrder::create(
            WorkOrderId::new(nil()),
            VehicleId::new(nil()),
            end,
            start,
            LaborId::new(nil()),
            Spot::A,
            vec![],
        )
        .unwrap_err();

        let codes: Vec<&str> = err.all().iter().map(|e| e.code.as_ref()).collect();
        assert_eq!(
            codes,
            [
                "work_order.id_required",
                "work_order.vehicle_id_required",
                "work_order.repair_tasks_required",
                "work_order.labor_id_required",
                "work_order.invalid_timing",
            ]
        );
    }

    #[test]
    fn state_advances_through_the_full_lifecycle() {
        let mut wo = scheduled_order();

        assert_eq!(wo.update_state(WorkOrderState::InProgress), Ok(Updated));
        assert_eq!(wo.state(), WorkOrderState::InProgress);

        assert_eq!(wo.update_state(WorkOrderState::Completed), Ok(Updated));
        assert_eq!(wo.state(), WorkOrderState::Completed);
    }

    #[test]
    fn skipping_a_lifecycle_step_reports_both_states() {
        let mut wo = scheduled_order();

        let err = wo.update_state(WorkOrderState::Completed).unwrap_err();

        assert_eq!(err.top().code, "work_order.invalid_state_transition");
        assert!(err.top().description.contains("Scheduled"));
        assert!(err.top().description.contains("Completed"));
        assert_eq!(wo.state(), WorkOrderState::Scheduled);
    }

    #[test]
    fn add_repair_task_succeeds_while_scheduled() {
        let mut wo = scheduled_order();

        assert_eq!(wo.add_repair_task(repair_task()), Ok(Updated));
        assert_eq!(wo.repair_tasks().len(), 2);
    }

    #[test]
    fn add_repair_task_fails_once_completed() {
        let mut wo = scheduled_order();
        wo.update_state(WorkOrderState::InProgress).unwrap();
        wo.update_state(WorkOrderState::Completed).unwrap();

        let err = wo.add_repair_task(repair_task()).unwrap_err();

        assert_eq!(err.top().code, "work_order.not_editable");
        assert_eq!(wo.repair_tasks().len(), 1);
    }

    #[test]
    fn update_labor_sets_new_labor_id() {
        let mut wo = scheduled_order();
        let new_labor = labor_id();

        assert_eq!(wo.update_labor(new_labor), Ok(Updated));
        assert_eq!(wo.labor_id(), new_labor);
    }

    #[test]
    fn update_labor_rejects_empty_reference() {
        let mut wo = scheduled_order();
        let before = wo.labor_id();

        let err = wo.update_labor(LaborId::new(nil())).unwrap_err();

        assert_eq!(err.top().code, "work_order.labor_id_empty");
        assert_eq!(wo.labor_id(), before);
    }

    #[test]
    fn update_spot_moves_the_order() {
        let mut wo = scheduled_order();

        assert_eq!(wo.update_spot(Spot::B), Ok(Updated));
        assert_eq!(wo.spot(), Spot::B);
    }

    #[test]
    fn update_timing_sets_new_window() {
        let mut wo = scheduled_order();
        let new_start = wo.start_at() + Duration::hours(2);
        let new_end = new_start + Duration::hours(1);

        assert_eq!(wo.update_timing(new_start, new_end), Ok(Updated));
        assert_eq!(wo.start_at(), new_start);
        assert_eq!(wo.end_at(), new_end);
    }

    #[test]
    fn update_timing_rejects_inverted_window_and_leaves_order_unchanged() {
        let mut wo = scheduled_order();
        let before = wo.clone();

        let err = wo
            .update_timing(wo.start_at() + Duration::hours(2), wo.start_at())
            .unwrap_err();

        assert_eq!(err.top().code, "work_order.invalid_timing");
        assert_eq!(wo, before);
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        let wo = scheduled_order();

        assert!(!wo.overlaps(wo.end_at(), wo.end_at() + Duration::hours(1)));
        assert!(!wo.overlaps(wo.start_at() - Duration::hours(1), wo.start_at()));
        assert!(wo.overlaps(wo.start_at() + Duration::minutes(30), wo.end_at()));
    }

    #[test]
    fn total_cost_sums_all_tasks() {
        let mut wo = scheduled_order();
        wo.add_repair_task(repair_task()).unwrap();

        assert_eq!(wo.total_cost_cents(), Ok(24000));
    }

    #[test]
    fn total_cost_reports_overflow_instead_of_wrapping() {
        let expensive = |name: &str| {
            RepairTask::create(
                RepairTaskId::new(AggregateId::new()),
                name,
                u64::MAX,
                60,
                vec![],
            )
            .unwrap()
        };
        let mut wo = scheduled_order();
        wo.add_repair_task(expensive("Restoration, phase 1")).unwrap();
        wo.add_repair_task(expensive("Restoration, phase 2")).unwrap();

        let err = wo.total_cost_cents().unwrap_err();
        assert_eq!(err.top().code, "work_order.cost_overflow");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_positive_window_schedules(offset_mins in 0i64..10_000, len_mins in 1i64..10_000) {
                let start = Utc::now() + Duration::minutes(offset_mins);
                let end = start + Duration::minutes(len_mins);

                let result = WorkOrder::create(
                    work_order_id(),
                    vehicle_id(),
                    start,
                    end,
                    labor_id(),
                    Spot::C,
                    vec![repair_task()],
                );
                prop_assert!(result.is_ok());
            }

            #[test]
            fn any_non_positive_window_is_invalid_timing(len_mins in 0i64..10_000) {
                let start = Utc::now();
                let end = start - Duration::minutes(len_mins);

                let err = WorkOrder::create(
                    work_order_id(),
                    vehicle_id(),
                    start,
                    end,
                    labor_id(),
                    Spot::C,
                    vec![repair_task()],
                )
                .unwrap_err();
                prop_assert_eq!(err.top().code.as_ref(), "work_order.invalid_timing");
            }
        }
    }
}
