//! HTTP handlers for combs and honey

pub mod combs;
pub mod honey;
pub mod routes;

pub use routes::{combs_routes, json_config};

use tracing::Span;

use crate::errors::{CombError, Result};

/// Parse the `{comb_id}` path segment; anything but an integer is a bad request
pub(crate) fn parse_comb_id(raw: &str) -> Result<i32> {
    let comb_id = raw
        .trim()
        .parse::<i32>()
        .map_err(|_| CombError::bad_request(format!("Invalid comb id: '{}'", raw)))?;
    Span::current().record("comb.id", comb_id);
    Ok(comb_id)
}

pub(crate) fn record_honey_type(honey_type: &str) {
    Span::current().record("honey.type", honey_type);
}
