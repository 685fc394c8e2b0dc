//! Pure spot/labor availability over a set of work orders.
//!
//! Bays and laborers are scarce resources: two work orders may not hold the
//! same spot, or the same laborer, over overlapping windows. These functions
//! carry no IO; the scheduling services feed them the orders loaded from the
//! persistence boundary.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::spot::Spot;
use crate::workorder::{LaborId, WorkOrder, WorkOrderId};

/// Shop opening hour (UTC).
pub const OPENING_HOUR: u32 = 9;
/// Shop closing hour (UTC).
pub const CLOSING_HOUR: u32 = 18;
/// Granularity of the day schedule.
pub const SLOT_MINUTES: i64 = 30;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Occupied,
}

/// One slice of a spot's working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: SlotStatus,
}

/// A spot's sliced working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotSchedule {
    pub spot: Spot,
    pub slots: Vec<AvailabilitySlot>,
}

/// Whether `spot` is already taken anywhere inside `[start_at, end_at)`.
///
/// `exclude` skips the order being rescheduled so it does not collide with
/// itself. Completed orders still block the bay: the vehicle occupies it
/// until picked up.
pub fn has_spot_conflict(
    orders: &[WorkOrder],
    spot: Spot,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    exclude: Option<WorkOrderId>,
) -> bool {
    orders
        .iter()
        .filter(|wo| Some(wo.id_typed()) != exclude)
        .any(|wo| wo.spot() == spot && wo.overlaps(start_at, end_at))
}

/// Whether the laborer is already booked anywhere inside `[start_at, end_at)`.
pub fn has_labor_conflict(
    orders: &[WorkOrder],
    labor_id: LaborId,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    exclude: Option<WorkOrderId>,
) -> bool {
    orders
        .iter()
        .filter(|wo| Some(wo.id_typed()) != exclude)
        .any(|wo| wo.labor_id() == labor_id && wo.overlaps(start_at, end_at))
}

/// Slice one spot's working day (`OPENING_HOUR..CLOSING_HOUR`) into
/// `SLOT_MINUTES` steps, marking each slice occupied when any order holds the
/// spot during it.
pub fn spot_schedule(spot: Spot, day: NaiveDate, orders: &[WorkOrder]) -> SpotSchedule {
    let midnight = day.and_time(NaiveTime::MIN).and_utc();
    let mut cursor = midnight + Duration::hours(i64::from(OPENING_HOUR));
    let closing = midnight + Duration::hours(i64::from(CLOSING_HOUR));

    let mut slots = Vec::new();
    while cursor < closing {
        let slot_end = cursor + Duration::minutes(SLOT_MINUTES);
        let taken = has_spot_conflict(orders, spot, cursor, slot_end, None);
        slots.push(AvailabilitySlot {
            start_at: cursor,
            end_at: slot_end,
            status: if taken {
                SlotStatus::Occupied
            } else {
                SlotStatus::Available
            },
        });
        cursor = slot_end;
    }

    SpotSchedule { spot, slots }
}

/// Day schedule for every bay.
pub fn day_schedule(day: NaiveDate, orders: &[WorkOrder]) -> Vec<SpotSchedule> {
    Spot::ALL
        .iter()
        .map(|spot| spot_schedule(*spot, day, orders))
        .collect()
}
