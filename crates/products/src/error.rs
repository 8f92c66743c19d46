//! Errors raised by variant resolution and option array building.

use thiserror::Error;

use storefront_core::DomainError;

/// Result type used by the products crate.
pub type VariantResult<T> = Result<T, VariantError>;

/// Structural or input failure.
///
/// A resolution that simply finds nothing is not an error; see
/// [`Resolution::NoMatch`](crate::Resolution::NoMatch).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VariantError {
    /// The product record is missing a required structure or breaks the
    /// option/variant alignment invariant.
    #[error("invalid product: {0}")]
    InvalidProduct(String),

    /// A sequence of named selections was required but something else was given.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The entry at `index` (0-based) has no string `name`.
    #[error("invalid value type passed for name of option at index {index}, value should be a string")]
    InvalidOptionName { index: usize },

    /// No product option carries this name (case-insensitive).
    #[error("invalid option name: {name}")]
    UnknownOptionName { name: String },

    /// Resolver configuration could not be read.
    #[error("invalid resolver configuration: {0}")]
    Config(String),
}

impl VariantError {
    pub fn invalid_product(msg: impl Into<String>) -> Self {
        Self::InvalidProduct(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unknown_option(name: impl Into<String>) -> Self {
        Self::UnknownOptionName { name: name.into() }
    }
}

impl From<VariantError> for DomainError {
    fn from(err: VariantError) -> Self {
        match err {
            VariantError::InvalidProduct(msg) => DomainError::invariant(msg),
            other => DomainError::validation(other.to_string()),
        }
    }
}
