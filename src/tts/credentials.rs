use std::fmt;

use crate::errors::{constants::API_KEY_ENV_VAR, Result, TtsError};

/// DashScope API key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where the API key comes from.
///
/// `Env` re-reads the variable on every call so a rotated key is picked up
/// by the next request.
#[derive(Clone, Debug)]
pub enum CredentialSource {
    Env(String),
    Static(ApiKey),
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::Env(API_KEY_ENV_VAR.to_string())
    }
}

impl CredentialSource {
    pub fn env(var_name: impl Into<String>) -> Self {
        Self::Env(var_name.into())
    }

    pub fn fixed(key: impl Into<String>) -> Self {
        Self::Static(ApiKey::new(key))
    }

    pub fn resolve(&self) -> Result<ApiKey> {
        match self {
            CredentialSource::Env(var_name) => match std::env::var(var_name) {
                Ok(value) if !value.is_empty() => Ok(ApiKey(value)),
                _ => Err(TtsError::missing_env_var(var_name)),
            },
            CredentialSource::Static(key) if key.0.is_empty() => {
                Err(TtsError::config("API key is empty."))
            }
            CredentialSource::Static(key) => Ok(key.clone()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.resolve().is_ok()
    }
}
