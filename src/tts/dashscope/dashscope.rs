use crate::errors::{constants::*, Result, TtsError};
use crate::tts::{
    credentials::{ApiKey, CredentialSource},
    dashscope::structs::{
        synthesize_request::SynthesizeRequest, synthesize_response::SynthesizeResponse,
    },
    SpeechSynthesizer, SynthesisResult,
};
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use tracing::{debug, info};

/// Client for the DashScope Qwen-TTS endpoint.
#[derive(Clone, Debug)]
pub struct DashScopeClient {
    http: reqwest::Client,
    base_url: String,
    credentials: CredentialSource,
}

impl DashScopeClient {
    pub fn with_base_url(credentials: CredentialSource, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SYNTHESIS_PATH)
    }

    /// Synthesize text and return the URL of the generated audio file.
    ///
    /// A missing key fails before any request is sent. Everything after that
    /// is reported as [`TtsError::Synthesis`].
    #[tracing::instrument(skip(self), fields(voice = %request.input.voice, model = %request.model))]
    pub async fn synthesize(&self, request: &SynthesizeRequest) -> Result<SynthesisResult> {
        let api_key = self.credentials.resolve()?;

        let audio_url = self
            .request_audio_url(&api_key, request)
            .await
            .map_err(|e| TtsError::synthesis(format!("{:#}", e)))?;

        info!(audio_url = %audio_url, "Speech synthesized");
        Ok(SynthesisResult { audio_url })
    }

    async fn request_audio_url(
        &self,
        api_key: &ApiKey,
        request: &SynthesizeRequest,
    ) -> anyhow::Result<String> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key.as_str())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = %status, len = body.len(), "DashScope response received");

        if !status.is_success() {
            let detail = serde_json::from_slice::<SynthesizeResponse>(&body)
                .ok()
                .map(|r| {
                    format!(
                        "{}: {}",
                        r.code.unwrap_or_default(),
                        r.message.unwrap_or_default()
                    )
                })
                .unwrap_or_default();
            bail!("API call failed with status {}: {}", status, detail);
        }

        let response: Option<SynthesizeResponse> = serde_json::from_slice(&body)?;
        let response = response.ok_or_else(|| anyhow!("API call returned None response"))?;
        let output = response
            .output
            .ok_or_else(|| anyhow!("API call failed: response.output is None"))?;
        let audio = output
            .audio
            .ok_or_else(|| anyhow!("API call failed: response.output.audio is None or missing"))?;

        Ok(audio.url)
    }
}

#[async_trait]
impl SpeechSynthesizer for DashScopeClient {
    async fn synthesize(&self, request: &SynthesizeRequest) -> Result<SynthesisResult> {
        DashScopeClient::synthesize(self, request).await
    }
}
