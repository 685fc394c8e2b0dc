//! Aggregate root trait for validated domain models.

/// Aggregate root marker + minimal interface.
///
/// An aggregate is a consistency boundary: its invariants are enforced by its
/// own operations (validating factory plus named mutators), never by external
/// mutation. This trait is intentionally small so each module can decide how
/// it models state transitions without bringing in infrastructure concerns.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;
}
