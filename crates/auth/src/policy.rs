use thiserror::Error;

use bayline_workorders::WorkOrder;

use crate::principal::{Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("principal {principal} is not assigned to work order {work_order}")]
    NotAssigned {
        principal: String,
        work_order: String,
    },
}

/// Labor-scoped action check: the principal must be the laborer assigned to
/// the work order, or hold the manager role.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn ensure_labor_assigned(principal: &Principal, work_order: &WorkOrder) -> Result<(), AuthzError> {
    let assigned = principal.user_id.as_uuid() == work_order.labor_id().0.as_uuid();
    if assigned || principal.has_role(Role::Manager) {
        return Ok(());
    }

    Err(AuthzError::NotAssigned {
        principal: principal.user_id.to_string(),
        work_order: work_order.id_typed().to_string(),
    })
}
