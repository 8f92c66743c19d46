//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity; they are defined entirely by their
/// attribute values and are never mutated in place. Catalog examples:
///
/// - an ordered tuple of option values (`["38", "Black"]`)
/// - a canonicalized variant identifier
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct OptionTuple(Vec<Option<String>>);
///
/// impl ValueObject for OptionTuple {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
