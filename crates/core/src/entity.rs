//! Entity trait: objects tracked by identity, not by field values.

/// A domain object with a stable identity.
///
/// Two entities are the same entity when their ids match, even if every other
/// field differs; this is what makes vehicle reconciliation ("replace the
/// entry with this id") well defined. Entities live inside an aggregate and
/// are only reachable through it.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
