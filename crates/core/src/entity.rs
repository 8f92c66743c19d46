//! Entity trait: identity that survives changes to the other attributes.

/// Entity marker + minimal interface.
///
/// A catalog variant is an entity: two variants with the same identifier are
/// the same purchasable item even if their option labels were edited.
pub trait Entity {
    /// Identifier type. Equality on it decides identity.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
