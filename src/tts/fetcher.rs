use std::{path::Path, time::Duration};

use anyhow::bail;
use bytes::Bytes;
use tracing::info;

use crate::errors::{constants::DOWNLOAD_TIMEOUT_SECS, Result, TtsError};
use crate::tts::DownloadOutcome;

/// Downloads synthesized audio to local storage.
#[derive(Clone, Debug)]
pub struct AudioFetcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl Default for AudioFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
    }
}

impl AudioFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `audio_url` and write the body to `save_path`, replacing any existing file.
    ///
    /// The status is checked before the file is touched, so an error page
    /// never lands on disk.
    #[tracing::instrument(skip(self, save_path), fields(save_path = %save_path.as_ref().display()))]
    pub async fn download(
        &self,
        audio_url: &str,
        save_path: impl AsRef<Path>,
    ) -> Result<DownloadOutcome> {
        let save_path = save_path.as_ref();

        let outcome = self
            .fetch_and_save(audio_url, save_path)
            .await
            .map_err(|e| TtsError::download(format!("{:#}", e)))?;

        info!("Audio file saved to: {}", save_path.display());
        Ok(outcome)
    }

    async fn fetch_and_save(&self, audio_url: &str, save_path: &Path) -> anyhow::Result<DownloadOutcome> {
        let response = self
            .http
            .get(audio_url)
            .timeout(self.timeout)
            .send()
            .await?;

        // Unfollowed 3xx responses are not errors to reqwest.
        let status = response.status();
        if !status.is_success() {
            bail!("HTTP status {} for url ({})", status, response.url());
        }

        let body: Bytes = response.bytes().await?;

        tokio::fs::write(save_path, &body).await?;

        Ok(DownloadOutcome {
            saved_path: save_path.to_path_buf(),
            bytes_written: body.len(),
        })
    }
}
