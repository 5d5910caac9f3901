//! Observability lifecycle.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Owns the tracer provider so buffered spans can be flushed on shutdown.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Install the global subscriber and, when enabled, the OTLP pipeline.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(config);

        let tracer_provider = config
            .observability
            .otel_enabled
            .then(|| otel::build_tracer_provider(config))
            .transpose()?;

        if tracer_provider.is_some() {
            global::set_text_map_propagator(TraceContextPropagator::new());
        }

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        info!(
            log_format = ?config.logging.log_format,
            otel_enabled = tracer_provider.is_some(),
            otel_endpoint = %config.observability.otel_exporter_otlp_endpoint,
            "observability initialised"
        );

        Ok(Self { tracer_provider })
    }

    /// Flush pending spans. Logging keeps working afterwards.
    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(source) = provider.shutdown()
        {
            error!("failed to flush tracer provider: {source}");
        }
    }
}
