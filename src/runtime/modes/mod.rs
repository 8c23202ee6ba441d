//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - Config generation (`config generate`)

pub mod config_gen;
pub mod server;

pub use config_gen::config_generate;
pub use server::run_server;
