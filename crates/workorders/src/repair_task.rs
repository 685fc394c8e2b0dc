use serde::{Deserialize, Serialize};

use bayline_core::{AggregateId, DomainErrors, DomainResult, Entity, ValueObject};

use crate::errors;

/// Repair task identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepairTaskId(pub AggregateId);

impl RepairTaskId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for RepairTaskId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A part consumed by a repair task. Compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    name: String,
    cost_cents: u64,
    quantity: u32,
}

impl Part {
    pub fn create(name: impl Into<String>, cost_cents: u64, quantity: u32) -> DomainResult<Self> {
        let name = name.into();

        let mut violations = Vec::new();
        if name.trim().is_empty() {
            violations.push(errors::part_name_required());
        }
        if quantity == 0 {
            violations.push(errors::part_invalid_quantity());
        }
        if let Some(errors) = DomainErrors::from_vec(violations) {
            return Err(errors);
        }

        Ok(Self {
            name,
            cost_cents,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost_cents(&self) -> u64 {
        self.cost_cents
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn total_cents(&self) -> DomainResult<u64> {
        self.cost_cents
            .checked_mul(u64::from(self.quantity))
            .ok_or_else(|| errors::cost_overflow().into())
    }
}

impl ValueObject for Part {}

/// A unit of work attached to a work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairTask {
    id: RepairTaskId,
    name: String,
    /// Labor charge in smallest currency unit (cents).
    labor_cost_cents: u64,
    estimated_minutes: u32,
    parts: Vec<Part>,
}

impl RepairTask {
    /// Validate and create a repair task; collects every field violation.
    pub fn create(
        id: RepairTaskId,
        name: impl Into<String>,
        labor_cost_cents: u64,
        estimated_minutes: u32,
        parts: Vec<Part>,
    ) -> DomainResult<Self> {
        let name = name.into();

        let mut violations = Vec::new();
        if id.0.is_nil() {
            violations.push(errors::repair_task_id_required());
        }
        if name.trim().is_empty() {
            violations.push(errors::repair_task_name_required());
        }
        if estimated_minutes == 0 {
            violations.push(errors::repair_task_invalid_duration());
        }
        if let Some(errors) = DomainErrors::from_vec(violations) {
            return Err(errors);
        }

        Ok(Self {
            id,
            name,
            labor_cost_cents,
            estimated_minutes,
            parts,
        })
    }

    pub fn id_typed(&self) -> RepairTaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labor_cost_cents(&self) -> u64 {
        self.labor_cost_cents
    }

    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Labor plus all parts. Checked: money never wraps.
    pub fn total_cost_cents(&self) -> DomainResult<u64> {
        let mut total = self.labor_cost_cents;
        for part in &self.parts {
            total = total
                .checked_add(part.total_cents()?)
                .ok_or_else(errors::cost_overflow)?;
        }
        Ok(total)
    }
}

impl Entity for RepairTask {
    type Id = RepairTaskId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_id() -> RepairTaskId {
        RepairTaskId::new(AggregateId::new())
    }

    #[test]
    fn create_succeeds_with_valid_data() {
        let part = Part::create("oil filter", 900, 2).unwrap();
        let task = RepairTask::create(task_id(), "Oil change", 4500, 30, vec![part]).unwrap();

        assert_eq!(task.name(), "Oil change");
        assert_eq!(task.estimated_minutes(), 30);
        // 4500 labor + 2 * 900 parts
        assert_eq!(task.total_cost_cents(), Ok(6300));
    }

    #[test]
    fn part_total_reports_overflow_instead_of_wrapping() {
        let part = Part::create("filter", u64::MAX, 2).unwrap();

        let err = part.total_cents().unwrap_err();
        assert_eq!(err.top().code, "work_order.cost_overflow");
    }

    #[test]
    fn task_total_reports_overflow_across_labor_and_parts() {
        let part = Part::create("engine block", u64::MAX, 1).unwrap();
        let task = RepairTask::create(task_id(), "Engine swap", 1, 30, vec![part]).unwrap();

        let err = task.total_cost_cents().unwrap_err();
        assert_eq!(err.top().code, "work_order.cost_overflow");
    }

    #[test]
    fn create_rejects_nil_id_and_blank_name() {
        let nil = RepairTaskId::new(AggregateId::from_uuid(uuid::Uuid::nil()));
        let err = RepairTask::create(nil, " ", 4500, 30, vec![]).unwrap_err();

        assert_eq!(err.all()[0].code, "repair_task.id_required");
        assert_eq!(err.all()[1].code, "repair_task.name_required");
    }

    #[test]
    fn create_rejects_zero_duration() {
        let err = RepairTask::create(task_id(), "Oil change", 4500, 0, vec![]).unwrap_err();
        assert_eq!(err.top().code, "repair_task.invalid_duration");
    }

    #[test]
    fn part_rejects_blank_name_and_zero_quantity() {
        let err = Part::create("  ", 900, 0).unwrap_err();
        assert!(err.contains_code("part.name_required"));
        assert!(err.contains_code("part.invalid_quantity"));
    }
}
