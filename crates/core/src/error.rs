//! Domain error model.
//!
//! Domain failures are **values**, never panics: each one carries a stable
//! machine-readable `code` plus a human-readable `description`. Operations
//! that can fail in several ways return a non-empty ordered list
//! ([`DomainErrors`]); callers decide how to surface them.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainErrors>;

/// Broad classification of a domain failure.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A value failed validation (e.g. malformed input).
    Validation,
    /// A domain invariant was violated (e.g. an illegal state transition).
    InvariantViolation,
    /// A conflict occurred (e.g. a double-booked resource).
    Conflict,
    /// A requested resource was not found (domain-level).
    NotFound,
    /// Authorization failure at the domain boundary.
    Unauthorized,
}

/// A single structured domain error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code}: {description}")]
pub struct DomainError {
    pub kind: ErrorKind,
    /// Stable machine-readable code, e.g. `work_order.invalid_timing`.
    pub code: Cow<'static, str>,
    pub description: Cow<'static, str>,
}

impl DomainError {
    pub fn new(
        kind: ErrorKind,
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            description: description.into(),
        }
    }

    pub fn validation(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Validation, code, description)
    }

    pub fn invariant(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::InvariantViolation, code, description)
    }

    pub fn conflict(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Conflict, code, description)
    }

    pub fn not_found(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::NotFound, code, description)
    }

    pub fn unauthorized(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Unauthorized, code, description)
    }
}

/// Non-empty ordered list of domain errors.
///
/// Factories collect every field violation rather than short-circuiting on
/// the first, so a caller sees the full picture in one round trip. `top()` is
/// the first error in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainErrors(Vec<DomainError>);

impl DomainErrors {
    pub fn single(error: DomainError) -> Self {
        Self(vec![error])
    }

    /// Wrap a collected error list; `None` when the list is empty.
    pub fn from_vec(errors: Vec<DomainError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// First error in field-validation order.
    pub fn top(&self) -> &DomainError {
        &self.0[0]
    }

    pub fn all(&self) -> &[DomainError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.code == code)
    }
}

impl From<DomainError> for DomainErrors {
    fn from(error: DomainError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for DomainErrors {
    type Item = DomainError;
    type IntoIter = std::vec::IntoIter<DomainError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl core::fmt::Display for DomainErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            core::fmt::Display::fmt(e, f)?;
        }
        Ok(())
    }
}

impl std::error::Error for DomainErrors {}

/// Success marker returned by aggregate mutators.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Updated;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_error_renders_code_and_description() {
        let e = DomainError::validation("customer.name_required", "name is required");
        assert_eq!(e.to_string(), "customer.name_required: name is required");
        assert_eq!(e.kind, ErrorKind::Validation);
    }

    #[test]
    fn from_vec_rejects_empty_list() {
        assert!(DomainErrors::from_vec(vec![]).is_none());
    }

    #[test]
    fn top_is_first_in_order() {
        let errors = DomainErrors::from_vec(vec![
            DomainError::validation("a.first", "first"),
            DomainError::validation("b.second", "second"),
        ])
        .unwrap();

        assert_eq!(errors.top().code, "a.first");
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_code("b.second"));
        assert!(!errors.contains_code("c.third"));
    }

    #[test]
    fn display_joins_errors() {
        let errors = DomainErrors::from_vec(vec![
            DomainError::validation("a", "one"),
            DomainError::invariant("b", "two"),
        ])
        .unwrap();

        assert_eq!(errors.to_string(), "a: one; b: two");
    }
}
