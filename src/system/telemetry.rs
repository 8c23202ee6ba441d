//! OpenTelemetry export
//!
//! 开启 `[tracing]` 后，request / db-call span 通过 OTLP gRPC 导出，
//! 并注册 W3C trace-context + baggage propagator。

use opentelemetry::global;
use opentelemetry::propagation::TextMapCompositePropagator;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::propagation::{BaggagePropagator, TraceContextPropagator};
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};

use crate::config::TracingConfig;
use crate::errors::{CombError, Result};

/// Build the batch-exporting tracer provider and a tracer for the layer
///
/// Must run inside a tokio runtime; the gRPC channel spawns its worker there.
pub fn init_tracer(config: &TracingConfig) -> Result<(SdkTracerProvider, SdkTracer)> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()
        .map_err(|e| {
            CombError::configuration(format!(
                "Failed to build OTLP exporter for '{}': {}",
                config.otlp_endpoint, e
            ))
        })?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            Resource::builder()
                .with_service_name(config.service_name.clone())
                .build(),
        )
        .build();
    let tracer = provider.tracer(config.service_name.clone());

    install_propagator();
    Ok((provider, tracer))
}

/// Register trace-context and baggage as the global text map propagator
pub fn install_propagator() {
    global::set_text_map_propagator(TextMapCompositePropagator::new(vec![
        Box::new(TraceContextPropagator::new()),
        Box::new(BaggagePropagator::new()),
    ]));
}
