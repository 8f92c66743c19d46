//! Selection criteria accepted by the resolver.

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

use crate::product::VariantId;

/// Ordered option values aligned to a product's option definitions.
///
/// A `None` slot is a hole: a position nobody selected, or a selected value that
/// was not a string. Holes never equal a variant's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionTuple(Vec<Option<String>>);

impl OptionTuple {
    pub fn new(slots: Vec<Option<String>>) -> Self {
        Self(slots)
    }

    /// Tuple without holes.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(|v| Some(v.into())).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|slot| slot.as_deref())
    }

    pub fn has_holes(&self) -> bool {
        self.0.iter().any(Option::is_none)
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.0
    }

    pub fn into_slots(self) -> Vec<Option<String>> {
        self.0
    }

    /// Write `value` at `index`, growing the tuple with holes as needed.
    pub(crate) fn assign(&mut self, index: usize, value: Option<String>) {
        if self.0.len() <= index {
            self.0.resize(index + 1, None);
        }
        self.0[index] = value;
    }
}

impl ValueObject for OptionTuple {}

impl<S: Into<String>> FromIterator<S> for OptionTuple {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

/// `{ name, value }` pair naming an option and the selected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSelection {
    pub name: String,
    /// `None` when the caller supplied a non-string value; it never matches.
    pub value: Option<String>,
}

impl NamedSelection {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// What the caller wants, in one of the four accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCriterion {
    /// Bare identifier, number or string.
    ById(VariantId),
    /// Object carrying a numeric `id` field (a variant-like record).
    ByIdObject { id: VariantId },
    /// `[{ name: "Size", value: "36" }, ...]`
    ByNamedOptions(Vec<NamedSelection>),
    /// `["36", "Black"]`, positionally aligned to the product's options.
    ByPositionalOptions(OptionTuple),
}

impl SelectionCriterion {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SelectionCriterion::ById(_) => "id",
            SelectionCriterion::ByIdObject { .. } => "id_object",
            SelectionCriterion::ByNamedOptions(_) => "named_options",
            SelectionCriterion::ByPositionalOptions(_) => "positional_options",
        }
    }
}

impl From<VariantId> for SelectionCriterion {
    fn from(id: VariantId) -> Self {
        SelectionCriterion::ById(id)
    }
}

impl From<Vec<NamedSelection>> for SelectionCriterion {
    fn from(selections: Vec<NamedSelection>) -> Self {
        SelectionCriterion::ByNamedOptions(selections)
    }
}

impl From<OptionTuple> for SelectionCriterion {
    fn from(tuple: OptionTuple) -> Self {
        SelectionCriterion::ByPositionalOptions(tuple)
    }
}
