use std::time::Duration;

use opentelemetry::{global, trace::TracerProvider as _};
use opentelemetry_otlp::{MetricExporter, Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    metrics::{PeriodicReader, SdkMeterProvider, Temporality},
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
    Resource,
};
use tracing::Level;
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::errors::{Result, TtsError};

const SERVICE_NAME: &str = "qwen-tts-webui";

/// Root sampling decision for a `0.0..=1.0` ratio of traces.
pub fn root_sampler(ratio: f64) -> Sampler {
    if ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(ratio)
    }
}

/// OTLP/HTTP span and metric pipelines sharing one endpoint and resource.
struct OtlpPipelines {
    tracer_provider: SdkTracerProvider,
    meter_provider: SdkMeterProvider,
}

impl OtlpPipelines {
    fn build(url: &str, config: &Config) -> Result<Self> {
        let resource = Resource::builder().with_service_name(SERVICE_NAME).build();

        let span_exporter = SpanExporter::builder()
            .with_http()
            .with_endpoint(url)
            .with_protocol(Protocol::HttpBinary)
            .build()
            .map_err(|e| TtsError::config(format!("OTLP span exporter: {}", e)))?;

        let metric_exporter = MetricExporter::builder()
            .with_http()
            .with_endpoint(url)
            .with_protocol(Protocol::HttpBinary)
            .with_temporality(Temporality::Cumulative)
            .build()
            .map_err(|e| TtsError::config(format!("OTLP metric exporter: {}", e)))?;

        let tracer_provider = SdkTracerProvider::builder()
            .with_sampler(Sampler::ParentBased(Box::new(root_sampler(
                config.otel_sample_ratio,
            ))))
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(resource.clone())
            .with_batch_exporter(span_exporter)
            .build();

        let reader = PeriodicReader::builder(metric_exporter)
            .with_interval(Duration::from_secs(config.otel_export_interval_secs.max(1)))
            .build();
        let meter_provider = SdkMeterProvider::builder()
            .with_resource(resource)
            .with_reader(reader)
            .build();
        global::set_meter_provider(meter_provider.clone());

        Ok(Self {
            tracer_provider,
            meter_provider,
        })
    }
}

/// Install the global subscriber.
///
/// With `otel_http_url` set, spans go to the OTLP collector and the
/// `monotonic_counter.*`/`histogram.*` fields emitted by
/// [`RequestMetrics`](crate::metrics::RequestMetrics) become OTLP metrics.
/// The returned guard must outlive the server.
pub fn init_tracing_subscriber(config: &Config) -> Result<OtelGuard> {
    let registry = tracing_subscriber::registry()
        .with(LevelFilter::from_level(Level::INFO))
        .with(tracing_subscriber::fmt::layer());

    let Some(url) = &config.otel_http_url else {
        registry.init();
        return Ok(OtelGuard { pipelines: None });
    };

    let pipelines = OtlpPipelines::build(url, config)?;
    let tracer = pipelines.tracer_provider.tracer(SERVICE_NAME);

    registry
        .with(MetricsLayer::new(pipelines.meter_provider.clone()))
        .with(OpenTelemetryLayer::new(tracer))
        .init();

    Ok(OtelGuard {
        pipelines: Some(pipelines),
    })
}

/// Keeps the OTLP providers alive and flushes them on drop.
pub struct OtelGuard {
    pipelines: Option<OtlpPipelines>,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Some(pipelines) = self.pipelines.take() {
            let _ = pipelines.tracer_provider.shutdown();
            let _ = pipelines.meter_provider.shutdown();
        }
    }
}
