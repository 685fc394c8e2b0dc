//! Value object marker: compared by value, carries no identity.

/// Marker for immutable domain values.
///
/// A value object is fully described by its fields; two with equal fields are
/// interchangeable. There is no update operation: to "change" one, build a
/// new one through its validating factory (a `Part` with a different quantity
/// is simply a different `Part`).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
