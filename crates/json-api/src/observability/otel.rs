//! OpenTelemetry tracer provider setup.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::ServerConfig;

use super::ObservabilityError;

const SERVICE_NAMESPACE: &str = "marketplace";

pub(super) fn build_tracer_provider(
    config: &ServerConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let config = &config.observability;

    let resource = Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.namespace", SERVICE_NAMESPACE),
            KeyValue::new("service.version", config.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build();

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(
            config.otel_exporter_otlp_timeout_seconds,
        ))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
            sample_ratio(config.otel_trace_sample_ratio),
        ))))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

/// Out-of-range ratios are clamped. `NaN` samples everything.
fn sample_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 1.0;
    }

    ratio.clamp(0.0, 1.0)
}
