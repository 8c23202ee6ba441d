pub mod logging;
pub mod telemetry;

pub use logging::{LoggingGuard, init_logging};
