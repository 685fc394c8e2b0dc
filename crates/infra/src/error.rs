//! Error mapping at the application boundary.
//!
//! Domain failures stay structured values all the way up; this enum only adds
//! the failure modes the services themselves introduce (missing aggregates,
//! store faults, policy denials). Callers (the excluded web layer) decide
//! status mapping and user messaging.

use thiserror::Error;

use bayline_auth::AuthzError;
use bayline_core::{DomainError, DomainErrors};
use bayline_workorders::Spot;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Deterministic domain validation/invariant failure.
    #[error("{0}")]
    Domain(DomainErrors),

    /// The targeted aggregate does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Labor-scoped policy denial.
    #[error(transparent)]
    Unauthorized(#[from] AuthzError),

    /// The persistence boundary failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainErrors> for AppError {
    fn from(errors: DomainErrors) -> Self {
        AppError::Domain(errors)
    }
}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        AppError::Domain(error.into())
    }
}

impl AppError {
    /// Convenience for tests and callers inspecting structured codes.
    pub fn domain_code(&self) -> Option<&str> {
        match self {
            AppError::Domain(errors) => Some(errors.top().code.as_ref()),
            _ => None,
        }
    }
}

/// The bay already holds another work order during the requested window.
pub fn spot_occupied(spot: Spot) -> DomainError {
    DomainError::conflict(
        "schedule.spot_occupied",
        format!("spot {spot} is occupied during the requested window"),
    )
}

/// The laborer is already booked during the requested window.
pub fn labor_occupied() -> DomainError {
    DomainError::conflict(
        "schedule.labor_occupied",
        "the laborer is already booked during the requested window",
    )
}

/// Only orders that have not started yet can be removed from the schedule.
pub fn work_order_not_removable() -> DomainError {
    DomainError::invariant(
        "work_order.not_removable",
        "only a Scheduled work order can be removed",
    )
}
