//! Resolver configuration.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VariantError;

/// Environment variable selecting the [`TupleMatching`] policy.
pub const TUPLE_MATCHING_ENV: &str = "STOREFRONT_TUPLE_MATCHING";

/// How a positional tuple is compared against a variant's option values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TupleMatching {
    /// Only the positions present in the supplied tuple constrain the match.
    #[default]
    Prefix,
    /// The supplied tuple must cover every option position, without holes.
    Exact,
}

impl FromStr for TupleMatching {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(TupleMatching::Prefix),
            "exact" => Ok(TupleMatching::Exact),
            other => Err(VariantError::Config(format!(
                "{TUPLE_MATCHING_ENV}: expected `prefix` or `exact`, got `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub tuple_matching: TupleMatching,
}

impl ResolverConfig {
    pub fn new(tuple_matching: TupleMatching) -> Self {
        Self { tuple_matching }
    }

    /// Read from the process environment; unset variables keep the defaults.
    pub fn from_env() -> Result<Self, VariantError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, VariantError> {
        let tuple_matching = match lookup(TUPLE_MATCHING_ENV) {
            Some(raw) => raw.parse()?,
            None => TupleMatching::default(),
        };
        Ok(Self { tuple_matching })
    }
}
