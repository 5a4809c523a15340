mod app;
mod app_state;
mod config;
mod effects;
mod i18n;
mod keys;
mod oneshot;
mod tui;
mod ui;
mod update;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use karipap_models::DetectionTab;
use karipap_sdk::BackendContract;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Overrides};
use crate::i18n::Locale;

#[derive(Parser, Debug)]
#[command(name = "karipap")]
#[command(about = "ABANG KARIPAP: The Fact Checker")]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags that override the configuration file and environment.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Backend origin (e.g. http://localhost:8000)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Backend API generation
    #[arg(long, global = true)]
    pub contract: Option<BackendContract>,

    /// Largest accepted image, in MB
    #[arg(long, global = true)]
    pub max_image_mb: Option<u64>,

    /// UI language (en, zh)
    #[arg(long, global = true)]
    pub lang: Option<Locale>,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Give up on a request after this many seconds (default: never)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl From<ConfigArgs> for Overrides {
    fn from(args: ConfigArgs) -> Self {
        Self {
            backend_url: args.backend_url,
            contract: args.contract,
            max_image_mb: args.max_image_mb,
            lang: args.lang,
            timeout_secs: args.timeout_secs,
            log_file: args.log_file,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive terminal UI (default)
    Tui,
    /// Check whether the backend is up
    Health,
    /// Run one detection and print the result
    Detect {
        #[command(subcommand)]
        input: DetectInput,
    },
    /// Run the OCR probe on an image
    Ocr {
        /// Image file
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum DetectInput {
    /// Classify a text
    Text {
        /// News text or headline
        text: String,
        /// fake-news or clickbait
        #[arg(long, default_value = "fake-news")]
        tab: DetectionTab,
    },
    /// OCR an image and classify its text
    Image {
        /// Image file
        path: PathBuf,
    },
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (log_file, interactive) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        // Anything written to the terminal would tear the alternate screen.
        (None, true) => {}
        (None, false) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.into())?;

    let command = cli.command.unwrap_or(Commands::Tui);
    init_logging(config.log_file.as_deref(), matches!(command, Commands::Tui))?;

    match command {
        Commands::Tui => {
            app::run(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Health => oneshot::health(&config).await,
        Commands::Detect { input } => match input {
            DetectInput::Text { text, tab } => oneshot::detect_text(&config, text, tab).await,
            DetectInput::Image { path } => oneshot::detect_image(&config, &path).await,
        },
        Commands::Ocr { path } => oneshot::ocr(&config, &path).await,
    }
}
