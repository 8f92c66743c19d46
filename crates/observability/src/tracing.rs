//! Tracing subscriber initialization.
//!
//! Targets worth filtering on:
//!
//! - `storefront_products::resolver` (debug): criterion kind and outcome of
//!   every resolution
//! - `storefront_products::json` (debug): raw criteria of no recognised shape
//! - `storefront_products::option_array` (trace): option name to position
//! - `storefront_products::product` (warn): duplicate variant ids in a product

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable: duplicate-id warnings
/// surface, per-resolution chatter does not.
pub const DEFAULT_FILTER: &str = "info,storefront_products=warn";

/// Filter that shows every resolution decision.
pub const RESOLUTION_DEBUG_FILTER: &str = "info,storefront_products=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing/logging for the process.
///
/// JSON lines with timestamps and targets, filtered by `RUST_LOG` (e.g.
/// `RUST_LOG=info,storefront_products=debug`, see [`RESOLUTION_DEBUG_FILTER`]).
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}
