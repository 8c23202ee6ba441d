//! combs-of-honey - combs and their honey over HTTP
//!
//! A comb is an empty parent record; honey records hang off a comb and are
//! keyed by `(comb_id, type)`. Reading honey counts a visit.
//!
//! # Architecture
//! - `api`: HTTP handlers, routes and middleware
//! - `services`: business rules, including the visit counter
//! - `storage`: SeaORM gateway (SQLite, MySQL, PostgreSQL)
//! - `config`: TOML + environment configuration
//! - `runtime`: startup, server mode and shutdown
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
