//! Static configuration
//!
//! Loaded once at startup from a TOML file plus `COMB__*` environment
//! overrides, then passed by value to whoever needs it.

mod structs;

pub use structs::*;
