//! Service layer
//!
//! Business rules shared by the HTTP handlers: not-found rules, body
//! validation and the visit-counter side effect of honey reads.

mod comb_service;
mod honey_service;

pub use comb_service::CombService;
pub use honey_service::HoneyService;
