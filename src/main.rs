use std::path::PathBuf;

use clap::{Parser, Subcommand};
use qwen_tts_webui::{
    config::Config,
    errors::constants::*,
    trace::init_tracing_subscriber,
    tts::{credentials::CredentialSource, tts::TtsService, voice::Voice},
    web::{self, AppState},
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "qwen-tts-webui", version, about = "Web front-end for Qwen-TTS speech synthesis")]
struct Cli {
    /// Path to the TOML config file. Defaults are used when it does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the web form (default)
    Serve {
        /// Listen address, overrides `listen_addr` from the config
        #[arg(long)]
        addr: Option<String>,
    },
    /// Synthesize once, save the audio and print the outcome
    Say {
        #[arg(long, default_value = CONSOLE_TEXT)]
        text: String,
        #[arg(long, default_value = CONSOLE_SAVE_PATH)]
        save_path: PathBuf,
        #[arg(long)]
        voice: Option<Voice>,
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let _otel_guard = init_tracing_subscriber(&config)?;
    if cli.config.exists() {
        info!(path = %cli.config.display(), "Loaded config file");
    }

    if !CredentialSource::env(config.api_key_env.clone()).is_available() {
        warn!(
            "{} is not set; synthesis requests will fail until it is",
            config.api_key_env
        );
    }

    let service = TtsService::from_config(&config);
    info!(model = service.model(), base_url = %config.base_url, "Synthesis client ready");

    match cli.command.unwrap_or(Command::Serve { addr: None }) {
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.listen_addr.clone());
            let state = AppState::new(service, config.default_voice);
            web::serve(state, &addr).await?;
        }
        Command::Say {
            text,
            save_path,
            voice,
            model,
        } => {
            let service = match model {
                Some(model) => service.with_model(model),
                None => service,
            };
            let voice = voice.unwrap_or(config.default_voice);

            match service.run(&text, &save_path, voice).await {
                Ok(outcome) => println!("Audio file saved to: {}", outcome.saved_path.display()),
                Err(err) => println!("{}", err),
            }
        }
    }

    Ok(())
}
