//! Products domain module: variant resolution.
//!
//! Given a catalog product (named options plus the variants built from them),
//! resolve a shopper's selection to the matching variant. Pure, deterministic
//! logic (no IO, no HTTP, no storage); safe to share a [`Product`] across
//! threads and resolve concurrently.

pub mod config;
pub mod criterion;
pub mod error;
pub mod json;
pub mod option_array;
pub mod product;
pub mod resolver;

pub use config::{ResolverConfig, TupleMatching};
pub use criterion::{NamedSelection, OptionTuple, SelectionCriterion};
pub use error::{VariantError, VariantResult};
pub use json::{build_json, resolve_json};
pub use option_array::{OptionArrayBuilder, build};
pub use product::{OptionDefinition, Product, Variant, VariantId};
pub use resolver::{Resolution, VariantResolver, resolve};
pub use storefront_core::Entity;
