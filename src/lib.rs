// Public API for the Qwen-TTS WebUI library

pub mod config;
pub mod errors;
pub mod metrics;
pub mod trace;
pub mod tts;
pub mod web;

// Re-export commonly used types
pub use errors::{Result, TtsError};
pub use metrics::{MetricsSnapshot, RequestMetrics};
pub use tts::{tts::TtsService, voice::Voice, DownloadOutcome, SynthesisResult};
