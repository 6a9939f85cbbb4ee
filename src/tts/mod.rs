pub mod credentials;
pub mod dashscope;
pub mod fetcher;
pub mod tts;
pub mod voice;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::Result;
use dashscope::structs::synthesize_request::SynthesizeRequest;

/// URL of a synthesized audio file. Only built from a validated response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    pub audio_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub saved_path: PathBuf,
    pub bytes_written: usize,
}

/// Turns text into a downloadable audio URL.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SynthesizeRequest) -> Result<SynthesisResult>;
}
