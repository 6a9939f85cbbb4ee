use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::Serialize;
use tracing::{error, info};

use crate::errors::TtsError;

/// Request counters shared between the web form and the orchestrator.
///
/// Each record call also emits a tracing event whose `monotonic_counter.*` /
/// `histogram.*` fields are picked up by the OTLP metrics layer.
#[derive(Debug, Default, Clone)]
pub struct RequestMetrics {
    pub requests: Arc<AtomicU64>,
    pub successes: Arc<AtomicU64>,
    pub synthesis_failures: Arc<AtomicU64>,
    pub download_failures: Arc<AtomicU64>,
    pub other_failures: Arc<AtomicU64>,
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        info!(monotonic_counter.tts_requests = 1u64, "TTS request started");
    }

    pub fn record_success(&self, bytes_written: usize) {
        self.successes.fetch_add(1, Ordering::Relaxed);
        info!(
            monotonic_counter.tts_successes = 1u64,
            histogram.tts_audio_bytes = bytes_written as u64,
            "TTS request completed"
        );
    }

    /// Count a failed request under the stage that produced it.
    pub fn record_failure(&self, err: &TtsError) {
        let counter = match err {
            TtsError::Synthesis(_) => &self.synthesis_failures,
            TtsError::Download(_) => &self.download_failures,
            _ => &self.other_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        error!(
            monotonic_counter.tts_failures = 1u64,
            stage = err.stage(),
            error = %err,
            "TTS request failed"
        );
    }

    pub fn get_stats(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            synthesis_failures: self.synthesis_failures.load(Ordering::Relaxed),
            download_failures: self.download_failures.load(Ordering::Relaxed),
            other_failures: self.other_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub successes: u64,
    pub synthesis_failures: u64,
    pub download_failures: u64,
    pub other_failures: u64,
}

impl MetricsSnapshot {
    pub fn success_rate(&self) -> f64 {
        if self.requests > 0 {
            self.successes as f64 / self.requests as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Collects the field names of every event it sees.
    struct FieldNames(Arc<Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> Layer<S> for FieldNames {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut names = self.0.lock().unwrap();
            for field in event.metadata().fields() {
                names.push(field.name().to_string());
            }
        }
    }

    #[test]
    fn test_request_metrics_increment() {
        let metrics = RequestMetrics::default();
        assert_eq!(metrics.requests.load(Ordering::Relaxed), 0);

        metrics.record_request();
        metrics.record_request();
        metrics.record_success(44);

        let stats = metrics.get_stats();
        assert_eq!(stats.requests, 2);
        assert_eq!(stats.successes, 1);
    }

    #[test]
    fn test_failures_are_bucketed_by_stage() {
        let metrics = RequestMetrics::new();
        metrics.record_failure(&TtsError::synthesis("x"));
        metrics.record_failure(&TtsError::download("x"));
        metrics.record_failure(&TtsError::download("y"));
        metrics.record_failure(&TtsError::config("x"));

        let stats = metrics.get_stats();
        assert_eq!(stats.synthesis_failures, 1);
        assert_eq!(stats.download_failures, 2);
        assert_eq!(stats.other_failures, 1);
    }

    #[test]
    fn test_records_emit_counter_fields() {
        let names = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(FieldNames(names.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let metrics = RequestMetrics::new();
            metrics.record_request();
            metrics.record_success(8);
            metrics.record_failure(&TtsError::download("404"));
        });

        let names = names.lock().unwrap();
        for expected in [
            "monotonic_counter.tts_requests",
            "monotonic_counter.tts_successes",
            "histogram.tts_audio_bytes",
            "monotonic_counter.tts_failures",
            "stage",
        ] {
            assert!(
                names.iter().any(|name| name == expected),
                "missing field {} in {:?}",
                expected,
                names
            );
        }
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = RequestMetrics::new();
        let clone = metrics.clone();
        clone.record_request();
        assert_eq!(metrics.get_stats().requests, 1);
    }

    #[test]
    fn test_success_rate() {
        let snapshot = MetricsSnapshot {
            requests: 4,
            successes: 3,
            synthesis_failures: 1,
            download_failures: 0,
            other_failures: 0,
        };
        assert!((snapshot.success_rate() - 0.75).abs() < f64::EPSILON);

        let empty = MetricsSnapshot {
            requests: 0,
            successes: 0,
            synthesis_failures: 0,
            download_failures: 0,
            other_failures: 0,
        };
        assert_eq!(empty.success_rate(), 0.0);
    }
}
