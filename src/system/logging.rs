//! Logging system initialization
//!
//! Console or file output (optionally rotated daily), text or JSON lines,
//! filtered by an `EnvFilter` directive from `logging.level`. With
//! `tracing.enabled` the same spans also go to an OTLP collector.

use std::path::Path;

use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use super::telemetry;
use crate::config::{LoggingConfig, TracingConfig};
use crate::errors::{CombError, Result};

/// Keeps the log writer and the span exporter alive
pub struct LoggingGuard {
    _worker: WorkerGuard,
    tracer_provider: Option<SdkTracerProvider>,
}

impl LoggingGuard {
    /// Flush pending spans
    ///
    /// Provider shutdown blocks until the exporter drains, so it runs on the
    /// blocking pool while the runtime keeps the gRPC channel going.
    pub async fn shutdown(mut self) {
        let Some(provider) = self.tracer_provider.take() else {
            return;
        };
        match tokio::task::spawn_blocking(move || provider.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Tracer provider shutdown failed: {}", e),
            Err(e) => warn!("Tracer provider shutdown task failed: {}", e),
        }
    }
}

/// Initialize the global subscriber
///
/// The returned guard must stay alive for the life of the process, otherwise
/// buffered lines are lost.
pub fn init_logging(
    config: &LoggingConfig,
    tracing_config: &TracingConfig,
) -> Result<LoggingGuard> {
    let to_file = !config.file.is_empty();

    let writer: Box<dyn std::io::Write + Send + Sync> = if to_file && config.enable_rotation {
        let log_path = Path::new(&config.file);
        let dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = log_path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("combs-of-honey.log");

        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
            .map_err(|e| {
                CombError::file_operation(format!("Failed to create rolling log appender: {}", e))
            })?;
        Box::new(appender)
    } else if to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.file)?;
        Box::new(file)
    } else {
        Box::new(std::io::stdout())
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level).map_err(|e| {
        CombError::configuration(format!("Invalid logging.level '{}': {}", config.level, e))
    })?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_writer)
        .with_level(true)
        .with_ansi(!to_file);
    let fmt_layer = if config.format == "json" {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    let (tracer_provider, otel_layer) = if tracing_config.enabled {
        let (provider, tracer) = telemetry::init_tracer(tracing_config)?;
        let layer = tracing_opentelemetry::layer().with_tracer(tracer);
        (Some(provider), Some(layer))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| {
            CombError::configuration(format!("Failed to install tracing subscriber: {}", e))
        })?;

    if tracing_config.enabled {
        info!(
            "Exporting spans as '{}' to {}",
            tracing_config.service_name, tracing_config.otlp_endpoint
        );
    }

    Ok(LoggingGuard {
        _worker: guard,
        tracer_provider,
    })
}
