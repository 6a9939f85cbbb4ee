/// Custom error types for the Qwen-TTS front-end
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TtsError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis(message.into())
    }

    pub fn download(message: impl Into<String>) -> Self {
        Self::Download(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    pub fn missing_env_var(var_name: &str) -> Self {
        Self::Config(format!("{} environment variable not set.", var_name))
    }

    /// Workflow stage that produced the error, used as a metric label.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Synthesis(_) => "synthesis",
            Self::Download(_) => "download",
            Self::InvalidInput(_) => "input",
            Self::Server(_) | Self::Io(_) | Self::Toml(_) => "startup",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TtsError>;

/// Constants used throughout the application
pub mod constants {
    // Configuration constants
    pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
    pub const API_KEY_ENV_VAR: &str = "DASHSCOPE_API_KEY";
    pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:7860";
    pub const OTEL_EXPORT_INTERVAL_SECS: u64 = 5;

    // DashScope constants
    pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/api/v1";
    pub const SYNTHESIS_PATH: &str = "/services/aigc/multimodal-generation/generation";
    pub const DEFAULT_MODEL: &str = "qwen-tts-latest";

    // Download constants
    pub const DOWNLOAD_TIMEOUT_SECS: u64 = 10;

    // Form defaults
    pub const DEFAULT_SAVE_PATH: &str = "audio.wav";
    pub const PAGE_TITLE: &str = "Qwen-TTS WebUI";

    // Console mode defaults
    pub const CONSOLE_TEXT: &str = "Hello, I am a Qwen-TTS. How can I help you today?";
    pub const CONSOLE_SAVE_PATH: &str = "downloaded_audio.wav";

    // Status messages
    pub const SAVED_PREFIX: &str = "The audio has been saved to: ";
    pub const ERROR_PREFIX: &str = "An error occurred: ";
}
