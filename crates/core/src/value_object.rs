//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attributes. A palette
/// entry is one: copying it onto the canvas copies the value, and the copy is
/// unaffected by anything that later happens to the palette.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
