//! Named selections to canonical option tuples.
//!
//! `[{ name: "Size", value: "36" }, { name: "Color", value: "Black" }]` becomes
//! `["36", "Black"]` for a product whose options are `["Size", "Color"]`.

use crate::criterion::{NamedSelection, OptionTuple};
use crate::error::{VariantError, VariantResult};
use crate::product::Product;

/// Incremental builder: entries are pushed in input order and each one is
/// validated before the next.
#[derive(Debug)]
pub struct OptionArrayBuilder<'p> {
    product: &'p Product,
    tuple: OptionTuple,
}

impl<'p> OptionArrayBuilder<'p> {
    pub fn new(product: &'p Product) -> Self {
        Self {
            product,
            tuple: OptionTuple::default(),
        }
    }

    /// Place `value` at the position of the option called `name`.
    ///
    /// The same option named twice keeps the last value.
    pub fn push(&mut self, name: &str, value: Option<String>) -> VariantResult<()> {
        let index = self
            .product
            .option_index(name)
            .ok_or_else(|| VariantError::unknown_option(name))?;
        tracing::trace!(option = name, index, "assigned option position");
        self.tuple.assign(index, value);
        Ok(())
    }

    pub fn finish(self) -> OptionTuple {
        self.tuple
    }
}

/// Build the canonical tuple for `selections`.
///
/// An empty slice yields an empty tuple. Options that are never named stay holes.
pub fn build(product: &Product, selections: &[NamedSelection]) -> VariantResult<OptionTuple> {
    let mut builder = OptionArrayBuilder::new(product);
    for selection in selections {
        builder.push(&selection.name, selection.value.clone())?;
    }
    Ok(builder.finish())
}
