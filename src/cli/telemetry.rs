//! Log subscriber and optional OTLP trace export.
//!
//! Logs always go to stderr through a `fmt` layer filtered by `RUST_LOG` or the
//! verbosity flag. Spans are additionally exported over OTLP/gRPC when
//! `OTEL_EXPORTER_OTLP_ENDPOINT` is set.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_otlp::{Compression, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    trace::{SdkTracerProvider, Tracer},
};
use std::{env::var, time::Duration};
use tonic::transport::ClientTlsConfig;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};
use ulid::Ulid;

const ENV_OTLP_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
const EXPORT_TIMEOUT: Duration = Duration::from_secs(3);

static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Where and as whom spans are exported.
#[derive(Debug, PartialEq, Eq)]
struct Exporter {
    endpoint: String,
    instance_id: String,
}

impl Exporter {
    /// `None` unless `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
    fn from_env() -> Option<Self> {
        let endpoint = var(ENV_OTLP_ENDPOINT).ok()?;

        Some(Self {
            endpoint: with_scheme(endpoint.trim()),
            instance_id: var("OTEL_SERVICE_INSTANCE_ID")
                .unwrap_or_else(|_| Ulid::new().to_string()),
        })
    }

    /// Host for TLS server name checks, only for `https` endpoints.
    fn tls_host(&self) -> Option<&str> {
        let authority = self.endpoint.strip_prefix("https://")?.split('/').next()?;
        authority.split(':').next().filter(|host| !host.is_empty())
    }

    fn tracer(&self) -> Result<Tracer> {
        let mut builder = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&self.endpoint)
            .with_compression(Compression::Gzip)
            .with_timeout(EXPORT_TIMEOUT);

        if let Some(host) = self.tls_host() {
            builder = builder.with_tls_config(
                ClientTlsConfig::new()
                    .domain_name(host.to_string())
                    .with_native_roots(),
            );
        }

        let provider = SdkTracerProvider::builder()
            .with_batch_exporter(builder.build().context("failed to build OTLP exporter")?)
            .with_resource(
                Resource::builder_empty()
                    .with_attributes([
                        KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
                        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                        KeyValue::new("service.instance.id", self.instance_id.clone()),
                    ])
                    .build(),
            )
            .build();

        let _ = TRACER_PROVIDER.set(provider.clone());
        global::set_tracer_provider(provider.clone());
        global::set_text_map_propagator(TraceContextPropagator::new());

        Ok(provider.tracer(env!("CARGO_PKG_NAME")))
    }
}

/// gRPC endpoints given as `host:port` are assumed to be `https`.
fn with_scheme(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint.trim_end_matches('/'))
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the exporter or subscriber cannot be installed
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let verbosity_level = verbosity_level.unwrap_or(Level::ERROR);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("tokio=error".parse()?)
        .add_directive("sqlx=warn".parse()?)
        .add_directive("opentelemetry_sdk=warn".parse()?);

    let otel_layer = Exporter::from_env()
        .map(|exporter| exporter.tracer())
        .transpose()?
        .map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    // `Option<Layer>` is a no-op layer when export is off.
    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(otel_layer)
        .with(filter);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Flush and stop the OTLP exporter, noop when it was never started.
pub fn shutdown_tracer() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        debug!("shutting down tracer provider");
        if let Err(err) = provider.shutdown() {
            debug!("tracer provider shutdown failed: {err}");
        }
    }
}
