//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Dependencies that are noisy at `info`. A directive naming the same target
/// in `RUST_LOG` takes precedence.
const QUIET_TARGETS: &[&str] = &[
    "h2",
    "hyper",
    "hyper_util",
    "opentelemetry",
    "reqwest",
    "tonic",
    "tower",
];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let filter = build_env_filter(&config.logging.log_level)?;

    let otel_layer = tracer_provider.map(|provider| {
        let tracer = provider.tracer(config.observability.otel_service_name.clone());

        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    let subscriber = tracing_subscriber::registry().with(filter).with(otel_layer);

    match config.logging.log_format {
        LogFormat::Compact => subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init()?,
        LogFormat::Pretty => subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_file(true))
            .try_init()?,
        LogFormat::Json => subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true),
            )
            .try_init()?,
    }

    Ok(())
}

fn build_env_filter(log_level: &str) -> Result<EnvFilter, ObservabilityError> {
    Ok(EnvFilter::try_new(filter_directives(log_level))?)
}

fn filter_directives(log_level: &str) -> String {
    let log_level = log_level.trim();

    let quiet = QUIET_TARGETS
        .iter()
        .filter(|target| !log_level.contains(&format!("{target}=")))
        .map(|target| format!("{target}=warn"));

    std::iter::once(log_level.to_string())
        .filter(|level| !level.is_empty())
        .chain(quiet)
        .collect::<Vec<_>>()
        .join(",")
}
