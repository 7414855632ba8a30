#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use holocard_core::logging::LoggingBuilder;
use holocard_core::SiteConfig;

/// Launch settings, set once from the command line
#[derive(Debug, Clone)]
pub struct LaunchSettings {
    pub data_dir: PathBuf,
    pub config: SiteConfig,
    /// Read cards from this JSON file instead of the API
    pub card_file: Option<PathBuf>,
    /// Card opened on startup
    pub initial_slug: Option<String>,
}

static SETTINGS: OnceLock<LaunchSettings> = OnceLock::new();

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("holocard")
}

/// Launch settings (defaults if `main` has not stored any)
pub fn get_settings() -> LaunchSettings {
    SETTINGS.get().cloned().unwrap_or_else(|| LaunchSettings {
        data_dir: default_data_dir(),
        config: SiteConfig::default(),
        card_file: None,
        initial_slug: None,
    })
}

/// HoloCard - digital business card viewer
#[derive(Parser, Debug)]
#[command(name = "holocard-desktop")]
#[command(about = "HoloCard - view and install digital business cards")]
struct Args {
    /// Data directory for install preferences and logs
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Site configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the card API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Read cards from a JSON file instead of the API
    #[arg(long)]
    card_file: Option<PathBuf>,

    /// Open this card on startup
    #[arg(short, long)]
    slug: Option<String>,
}

fn main() {
    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);

    if let Err(e) = LoggingBuilder::new("desktop")
        .with_logs_dir(data_dir.join("logs"))
        .init()
    {
        eprintln!("logging disabled: {}", e);
    }

    let mut config = match &args.config {
        Some(path) => match SiteConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "invalid config, using defaults");
                SiteConfig::default()
            }
        },
        None => SiteConfig::default(),
    };
    if let Some(url) = args.api_url {
        config.api_url = url;
    }

    tracing::info!(data_dir = %data_dir.display(), api = %config.api_url, "starting HoloCard");

    let _ = SETTINGS.set(LaunchSettings {
        data_dir,
        config: config.normalized(),
        card_file: args.card_file,
        initial_slug: args.slug,
    });

    let window = Config::new().with_window(
        WindowBuilder::new()
            .with_title("HoloCard")
            .with_inner_size(dioxus::desktop::LogicalSize::new(480.0, 860.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .launch(app::App);
}
