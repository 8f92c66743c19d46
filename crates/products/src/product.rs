use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use storefront_core::{Entity, ValueObject};

use crate::error::{VariantError, VariantResult};

/// Variant identifier.
///
/// Storefront ids arrive either as JSON numbers or as numeric strings depending
/// on who produced them (theme markup, cart API, URL query). Equality and
/// hashing go through [`VariantId::canonical`], so `1` and `"1"` are the same id.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum VariantId {
    Number(i64),
    Text(String),
}

impl VariantId {
    /// Canonical string form: integers in decimal, text verbatim.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            VariantId::Number(n) => Cow::Owned(n.to_string()),
            VariantId::Text(s) => Cow::Borrowed(s),
        }
    }

    /// Id from a JSON number. Integral floats collapse to integers; anything
    /// outside `i64` keeps its exact decimal text.
    pub fn from_json_number(number: &serde_json::Number) -> Self {
        if let Some(n) = number.as_i64() {
            return VariantId::Number(n);
        }
        if let Some(f) = number.as_f64() {
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                return VariantId::Number(f as i64);
            }
        }
        VariantId::Text(number.to_string())
    }

    /// Id from a JSON scalar; `None` for anything that is not a string or number.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::from_json_number(n)),
            Value::String(s) => Some(VariantId::Text(s.clone())),
            _ => None,
        }
    }
}

impl PartialEq for VariantId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (VariantId::Number(a), VariantId::Number(b)) => a == b,
            _ => self.canonical() == other.canonical(),
        }
    }
}

impl Eq for VariantId {}

impl core::hash::Hash for VariantId {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl core::fmt::Display for VariantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl ValueObject for VariantId {}

impl From<i64> for VariantId {
    fn from(value: i64) -> Self {
        VariantId::Number(value)
    }
}

impl From<i32> for VariantId {
    fn from(value: i32) -> Self {
        VariantId::Number(i64::from(value))
    }
}

impl From<u32> for VariantId {
    fn from(value: u32) -> Self {
        VariantId::Number(i64::from(value))
    }
}

impl From<u64> for VariantId {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => VariantId::Number(n),
            Err(_) => VariantId::Text(value.to_string()),
        }
    }
}

impl From<&str> for VariantId {
    fn from(value: &str) -> Self {
        VariantId::Text(value.to_string())
    }
}

impl From<String> for VariantId {
    fn from(value: String) -> Self {
        VariantId::Text(value)
    }
}

/// A named axis of variation ("Size", "Color").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefinition {
    pub name: String,
}

impl OptionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Case-insensitive name comparison.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// One purchasable combination of option values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    id: VariantId,
    options: Vec<String>,
    /// Remaining keys of the storefront record (title, sku, price, available, ...).
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Variant {
    pub fn new<I, S>(id: impl Into<VariantId>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            options: options.into_iter().map(Into::into).collect(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl Entity for Variant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Catalog product: ordered option definitions plus the variants built from them.
///
/// Every variant's option tuple is positionally aligned to `options`; this is
/// checked on construction and deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    options: Vec<OptionDefinition>,
    variants: Vec<Variant>,
}

impl Product {
    pub fn new(options: Vec<OptionDefinition>, variants: Vec<Variant>) -> VariantResult<Self> {
        let product = Self { options, variants };
        product.validate()?;
        Ok(product)
    }

    pub fn options(&self) -> &[OptionDefinition] {
        &self.options
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.name.as_str())
    }

    /// Position of the first option whose name matches case-insensitively.
    pub fn option_index(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.matches(name))
    }

    /// First variant carrying `id` (loose numeric/string equality).
    pub fn variant_by_id(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == *id)
    }

    /// Check the option/variant alignment invariant.
    ///
    /// Duplicate variant ids are tolerated (lookups return the first one) but
    /// logged.
    pub fn validate(&self) -> VariantResult<()> {
        for (index, option) in self.options.iter().enumerate() {
            if option.name.trim().is_empty() {
                return Err(VariantError::invalid_product(format!(
                    "option at index {index} has an empty name"
                )));
            }
        }

        let expected = self.options.len();
        for variant in &self.variants {
            if variant.options.len() != expected {
                return Err(VariantError::invalid_product(format!(
                    "variant {} has {} option values, product defines {} options",
                    variant.id,
                    variant.options.len(),
                    expected
                )));
            }
        }

        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant.id.canonical()) {
                tracing::warn!(variant_id = %variant.id, "duplicate variant id, first occurrence wins");
            }
        }

        Ok(())
    }
}

/// Wire shape of a product as the storefront emits it.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    options: Vec<OptionRecord>,
    variants: Vec<VariantRecord>,
}

/// Options come either as `{ "name": "Size", "position": 1, "values": [...] }`
/// or as bare names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptionRecord {
    Named { name: String },
    Bare(String),
}

#[derive(Debug, Deserialize)]
struct VariantRecord {
    id: Value,
    options: Vec<String>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = VariantError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let options = record
            .options
            .into_iter()
            .map(|o| match o {
                OptionRecord::Named { name } | OptionRecord::Bare(name) => OptionDefinition { name },
            })
            .collect();

        let variants = record
            .variants
            .into_iter()
            .enumerate()
            .map(|(index, v)| {
                let id = VariantId::from_json(&v.id).ok_or_else(|| {
                    VariantError::invalid_product(format!(
                        "variant at index {index} has no string or numeric id"
                    ))
                })?;
                Ok(Variant {
                    id,
                    options: v.options,
                    attributes: v.attributes,
                })
            })
            .collect::<VariantResult<Vec<_>>>()?;

        Product::new(options, variants)
    }
}
