//! `bayline-auth` — principals, roles, and labor-scoped policy checks.

pub mod policy;
pub mod principal;

pub use policy::{AuthzError, ensure_labor_assigned};
pub use principal::{Principal, Role};
