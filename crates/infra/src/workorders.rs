//! Work-order application service: scheduling, conflicts, lifecycle.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bayline_auth::{Principal, ensure_labor_assigned};
use bayline_core::AggregateId;
use bayline_customers::VehicleId;
use bayline_workorders::{
    LaborId, Part, RepairTask, RepairTaskId, Spot, SpotSchedule, WorkOrder, WorkOrderId,
    WorkOrderState, schedule,
};

use crate::cache::{TagCache, WORK_ORDER_TAG};
use crate::error::{AppError, labor_occupied, spot_occupied, work_order_not_removable};
use crate::pipeline::Timed;
use crate::store::WorkOrderStore;

/// Incoming part fields, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartData {
    pub name: String,
    pub cost_cents: u64,
    pub quantity: u32,
}

/// Incoming repair-task fields, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairTaskData {
    pub repair_task_id: Option<RepairTaskId>,
    pub name: String,
    pub labor_cost_cents: u64,
    pub estimated_minutes: u32,
    pub parts: Vec<PartData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleWorkOrderCommand {
    pub vehicle_id: VehicleId,
    pub labor_id: LaborId,
    /// Bay letter as it arrives from the outside; parsed through the
    /// [`Spot`] seam so an unknown bay fails with the structured spot error.
    pub spot: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub repair_tasks: Vec<RepairTaskData>,
}

pub struct WorkOrderService {
    store: Arc<dyn WorkOrderStore>,
    cache: Arc<dyn TagCache>,
}

impl WorkOrderService {
    pub fn new(store: Arc<dyn WorkOrderStore>, cache: Arc<dyn TagCache>) -> Self {
        Self { store, cache }
    }

    /// Schedule a new work order, refusing to double-book the bay or the
    /// laborer anywhere inside the requested window.
    pub fn schedule_work_order(
        &self,
        command: ScheduleWorkOrderCommand,
    ) -> Result<WorkOrderId, AppError> {
        let _timed = Timed::start("schedule_work_order");

        let spot: Spot = command.spot.parse().map_err(AppError::from)?;
        let tasks = validate_repair_tasks(&command.repair_tasks)?;

        let busy = self
            .store
            .list_overlapping(command.start_at, command.end_at)?;
        if schedule::has_spot_conflict(&busy, spot, command.start_at, command.end_at, None) {
            warn!(%spot, "rejected double-booked spot");
            return Err(spot_occupied(spot).into());
        }
        if schedule::has_labor_conflict(
            &busy,
            command.labor_id,
            command.start_at,
            command.end_at,
            None,
        ) {
            warn!(labor_id = %command.labor_id, "rejected double-booked labor");
            return Err(labor_occupied().into());
        }

        let id = WorkOrderId::new(AggregateId::new());
        let work_order = WorkOrder::create(
            id,
            command.vehicle_id,
            command.start_at,
            command.end_at,
            command.labor_id,
            spot,
            tasks,
        )?;

        self.store.upsert(work_order)?;
        self.cache.remove_by_tag(WORK_ORDER_TAG);
        info!(work_order_id = %id, %spot, "work order scheduled");
        Ok(id)
    }

    /// Move an order to a new window and bay, checking conflicts against
    /// everything except the order itself.
    pub fn relocate_work_order(
        &self,
        id: WorkOrderId,
        new_spot: &str,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let _timed = Timed::start("relocate_work_order");

        let mut work_order = self.load(id)?;
        let spot: Spot = new_spot.parse().map_err(AppError::from)?;

        let busy = self.store.list_overlapping(new_start, new_end)?;
        if schedule::has_spot_conflict(&busy, spot, new_start, new_end, Some(id)) {
            return Err(spot_occupied(spot).into());
        }
        if schedule::has_labor_conflict(&busy, work_order.labor_id(), new_start, new_end, Some(id))
        {
            return Err(labor_occupied().into());
        }

        work_order.update_timing(new_start, new_end)?;
        work_order.update_spot(spot)?;

        self.store.upsert(work_order)?;
        self.cache.remove_by_tag(WORK_ORDER_TAG);
        info!(work_order_id = %id, %spot, "work order relocated");
        Ok(())
    }

    /// Hand the order to another laborer, unless they are booked elsewhere
    /// during its window.
    pub fn assign_labor(&self, id: WorkOrderId, labor_id: LaborId) -> Result<(), AppError> {
        let _timed = Timed::start("assign_labor");

        let mut work_order = self.load(id)?;

        let busy = self
            .store
            .list_overlapping(work_order.start_at(), work_order.end_at())?;
        if schedule::has_labor_conflict(
            &busy,
            labor_id,
            work_order.start_at(),
            work_order.end_at(),
            Some(id),
        ) {
            return Err(labor_occupied().into());
        }

        work_order.update_labor(labor_id)?;
        self.store.upsert(work_order)?;
        self.cache.remove_by_tag(WORK_ORDER_TAG);
        info!(work_order_id = %id, labor_id = %labor_id, "labor reassigned");
        Ok(())
    }

    /// Advance the lifecycle. Labor-scoped: only the assigned laborer or a
    /// manager may move the order forward.
    pub fn update_state(
        &self,
        principal: &Principal,
        id: WorkOrderId,
        target: WorkOrderState,
    ) -> Result<(), AppError> {
        let _timed = Timed::start("update_state");

        let mut work_order = self.load(id)?;
        ensure_labor_assigned(principal, &work_order)?;

        work_order.update_state(target)?;
        self.store.upsert(work_order)?;
        self.cache.remove_by_tag(WORK_ORDER_TAG);
        info!(work_order_id = %id, state = %target, "work order state advanced");
        Ok(())
    }

    pub fn add_repair_task(
        &self,
        id: WorkOrderId,
        task: RepairTaskData,
    ) -> Result<(), AppError> {
        let _timed = Timed::start("add_repair_task");

        let mut work_order = self.load(id)?;
        let task = validate_repair_task(&task)?;
        work_order.add_repair_task(task)?;

        self.store.upsert(work_order)?;
        self.cache.remove_by_tag(WORK_ORDER_TAG);
        Ok(())
    }

    pub fn get_work_order(&self, id: WorkOrderId) -> Result<WorkOrder, AppError> {
        let _timed = Timed::start("get_work_order");
        self.load(id)
    }

    /// Availability of every bay for one working day.
    pub fn day_schedule(&self, day: NaiveDate) -> Result<Vec<SpotSchedule>, AppError> {
        let _timed = Timed::start("day_schedule");

        let start = day.and_time(NaiveTime::MIN).and_utc();
        let orders = self.store.list_overlapping(start, start + Duration::days(1))?;
        Ok(schedule::day_schedule(day, &orders))
    }

    /// Remove an order from the schedule. Once work has started the order is
    /// a record, not a booking, and stays.
    pub fn remove_work_order(&self, id: WorkOrderId) -> Result<(), AppError> {
        let _timed = Timed::start("remove_work_order");

        let work_order = self.load(id)?;
        if work_order.state() != WorkOrderState::Scheduled {
            return Err(work_order_not_removable().into());
        }

        self.store.remove(id)?;
        self.cache.remove_by_tag(WORK_ORDER_TAG);
        info!(work_order_id = %id, "work order removed");
        Ok(())
    }

    fn load(&self, id: WorkOrderId) -> Result<WorkOrder, AppError> {
        self.store
            .get(id)?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }
}

fn validate_repair_task(data: &RepairTaskData) -> Result<RepairTask, AppError> {
    let mut parts = Vec::with_capacity(data.parts.len());
    for part in &data.parts {
        parts.push(Part::create(part.name.clone(), part.cost_cents, part.quantity)?);
    }

    let id = data
        .repair_task_id
        .unwrap_or_else(|| RepairTaskId::new(AggregateId::new()));
    Ok(RepairTask::create(
        id,
        data.name.clone(),
        data.labor_cost_cents,
        data.estimated_minutes,
        parts,
    )?)
}

/// Validate every incoming task before touching the aggregate; the first
/// invalid one fails the whole command.
fn validate_repair_tasks(incoming: &[RepairTaskData]) -> Result<Vec<RepairTask>, AppError> {
    incoming.iter().map(validate_repair_task).collect()
}
