//! Untyped JSON entry points.
//!
//! Storefront themes hand over the product record and the shopper's selection
//! as raw JSON. These functions turn them into the typed model and apply the
//! same rules as the typed API:
//!
//! - a malformed product is an [`VariantError::InvalidProduct`], checked before
//!   anything else
//! - a criterion of no recognised shape resolves to no variant
//! - `build_json` requires an array of `{ name, value }` entries

use serde::Deserialize;
use serde_json::Value;

use crate::criterion::{NamedSelection, OptionTuple, SelectionCriterion};
use crate::error::{VariantError, VariantResult};
use crate::option_array::OptionArrayBuilder;
use crate::product::{Product, Variant, VariantId};
use crate::resolver::VariantResolver;

impl Product {
    /// Parse a storefront product record.
    pub fn from_json(value: &Value) -> VariantResult<Self> {
        if !value.is_object() {
            return Err(VariantError::invalid_product(format!(
                "expected a product object, got {}",
                type_name(value)
            )));
        }
        Product::deserialize(value).map_err(|e| VariantError::invalid_product(e.to_string()))
    }
}

impl SelectionCriterion {
    /// Classify a raw criterion, in priority order:
    ///
    /// 1. string or number: variant id
    /// 2. object with a numeric `id`: variant id
    /// 3. array whose first element is an object or array: named selections
    /// 4. any other array: positional values
    ///
    /// Returns `Ok(None)` for anything else. Named entries without a string
    /// `name` fail with [`VariantError::InvalidOptionName`]; option names are
    /// only looked up later, against a product.
    pub fn from_json(value: &Value) -> VariantResult<Option<Self>> {
        let criterion = match value {
            Value::String(s) => SelectionCriterion::ById(VariantId::Text(s.clone())),
            Value::Number(n) => SelectionCriterion::ById(VariantId::from_json_number(n)),
            Value::Object(map) => match map.get("id") {
                Some(Value::Number(n)) => SelectionCriterion::ByIdObject {
                    id: VariantId::from_json_number(n),
                },
                _ => return Ok(None),
            },
            Value::Array(items) if starts_with_structure(items) => {
                let selections = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| named_entry(index, item))
                    .collect::<VariantResult<Vec<_>>>()?;
                SelectionCriterion::ByNamedOptions(selections)
            }
            Value::Array(items) => SelectionCriterion::ByPositionalOptions(OptionTuple::new(
                items.iter().map(string_slot).collect(),
            )),
            Value::Null | Value::Bool(_) => return Ok(None),
        };
        Ok(Some(criterion))
    }
}

impl VariantResolver {
    /// Resolve a raw criterion against a raw product; the matched variant is
    /// returned as an owned record.
    ///
    /// Named selections go through the same per-entry loop as [`build_json`],
    /// so both report the same error for the same entries.
    pub fn resolve_json(&self, product: &Value, criterion: &Value) -> VariantResult<Option<Variant>> {
        let product = Product::from_json(product)?;
        if let Value::Array(items) = criterion {
            if starts_with_structure(items) {
                tracing::debug!(kind = "named_options", "resolving variant");
                let tuple = tuple_from_entries(&product, items)?;
                return Ok(self.find_by_options(&product, &tuple).variant().cloned());
            }
        }
        let Some(selection) = SelectionCriterion::from_json(criterion)? else {
            tracing::debug!(shape = type_name(criterion), "unrecognised criterion shape");
            return Ok(None);
        };
        Ok(self.resolve(&product, &selection)?.variant().cloned())
    }
}

/// [`VariantResolver::resolve_json`] with the default configuration.
pub fn resolve_json(product: &Value, criterion: &Value) -> VariantResult<Option<Variant>> {
    VariantResolver::default().resolve_json(product, criterion)
}

/// Build the canonical tuple from a raw `[{ name, value }, ...]` array.
///
/// Entries are checked one at a time in input order, so the first bad entry
/// decides the error.
pub fn build_json(product: &Value, selections: &Value) -> VariantResult<OptionTuple> {
    let product = Product::from_json(product)?;
    let Value::Array(items) = selections else {
        return Err(VariantError::invalid_input(format!(
            "expected an array of named selections, got {}",
            type_name(selections)
        )));
    };

    tuple_from_entries(&product, items)
}

/// Check and place entries one at a time; the first bad entry decides the error.
fn tuple_from_entries(product: &Product, items: &[Value]) -> VariantResult<OptionTuple> {
    let mut builder = OptionArrayBuilder::new(product);
    for (index, item) in items.iter().enumerate() {
        let entry = named_entry(index, item)?;
        builder.push(&entry.name, entry.value)?;
    }
    Ok(builder.finish())
}

fn starts_with_structure(items: &[Value]) -> bool {
    matches!(items.first(), Some(Value::Object(_) | Value::Array(_)))
}

fn named_entry(index: usize, item: &Value) -> VariantResult<NamedSelection> {
    match item.get("name") {
        Some(Value::String(name)) => Ok(NamedSelection {
            name: name.clone(),
            value: item.get("value").and_then(string_slot),
        }),
        _ => Err(VariantError::InvalidOptionName { index }),
    }
}

/// Option values are strings; anything else occupies a slot that never matches.
fn string_slot(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
