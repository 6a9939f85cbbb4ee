use std::{path::Path, sync::Arc, time::Duration};

use super::{
    credentials::CredentialSource,
    dashscope::{dashscope::DashScopeClient, structs::synthesize_request::SynthesizeRequest},
    fetcher::AudioFetcher,
    voice::Voice,
    DownloadOutcome, SpeechSynthesizer,
};
use crate::config::Config;
use crate::errors::{constants::*, Result};
use crate::metrics::RequestMetrics;

/// Synthesize-then-download workflow behind the form and the console mode.
#[derive(Clone)]
pub struct TtsService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    fetcher: AudioFetcher,
    model: String,
    metrics: RequestMetrics,
}

impl TtsService {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, fetcher: AudioFetcher) -> Self {
        Self {
            synthesizer,
            fetcher,
            model: DEFAULT_MODEL.to_string(),
            metrics: RequestMetrics::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = DashScopeClient::with_base_url(
            CredentialSource::env(config.api_key_env.clone()),
            config.base_url.clone(),
        );
        let fetcher = AudioFetcher::new(Duration::from_secs(config.download_timeout_secs));

        Self::new(Arc::new(client), fetcher).with_model(config.model.clone())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn metrics(&self) -> &RequestMetrics {
        &self.metrics
    }

    /// Synthesize `text` with `voice` and save the audio at `save_path`.
    #[tracing::instrument(skip(self, text, save_path), fields(save_path = %save_path.as_ref().display()))]
    pub async fn run(
        &self,
        text: &str,
        save_path: impl AsRef<Path>,
        voice: Voice,
    ) -> Result<DownloadOutcome> {
        let request = SynthesizeRequest::new(text)
            .with_voice(voice)
            .with_model(self.model.clone());

        let synthesis = self.synthesizer.synthesize(&request).await?;
        self.fetcher
            .download(&synthesis.audio_url, save_path.as_ref())
            .await
    }

    /// Run the workflow and report the result as a status line. Never fails.
    pub async fn handle(&self, text: &str, save_path: &str, voice: Voice) -> String {
        self.metrics.record_request();

        match self.run(text, save_path, voice).await {
            Ok(outcome) => {
                self.metrics.record_success(outcome.bytes_written);
                format!("{}{}", SAVED_PREFIX, save_path)
            }
            Err(err) => {
                self.metrics.record_failure(&err);
                format!("{}{}", ERROR_PREFIX, err)
            }
        }
    }
}
