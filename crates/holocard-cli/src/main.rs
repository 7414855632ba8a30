//! HoloCard CLI
//!
//! Thin wrapper around holocard-core for inspecting cards and install state.
//!
//! ## Usage
//!
//! ```bash
//! # Fetch a card from the API and print it
//! holocard card show ana-ruiz
//!
//! # Same, from a local JSON file instead of the API
//! holocard --card-file cards.json card show ana-ruiz
//!
//! # Render the page head a card page would publish
//! holocard head ana-ruiz --variant futuristic
//!
//! # Print the per-card install manifest
//! holocard manifest ana-ruiz
//!
//! # Inspect, dismiss or reset the persisted install state
//! holocard install status --user-agent "Mozilla/5.0 (Linux; Android 14) Chrome/124.0" --signal
//! holocard install dismiss
//! holocard install reset
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use holocard_core::install::{ImmediatePrompt, InstallPreferences};
use holocard_core::logging::LoggingBuilder;
use holocard_core::{
    BlobRegistry, CardClient, CardPage, CardSource, CardVariant, DigitalCard, DisplaySignals,
    InstallabilityTracker, MemoryHead, PageState, PlatformCapabilities, SiteConfig, StaticCards,
    Storage, SystemClock,
};

/// HoloCard - digital business cards
#[derive(Parser)]
#[command(name = "holocard")]
#[command(version = "0.1.0")]
#[command(about = "HoloCard - digital business cards")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Data directory (default: platform data dir / holocard)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Site configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the card API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Read cards from a JSON file instead of the API
    #[arg(long, global = true)]
    card_file: Option<PathBuf>,

    /// Also write JSONL logs to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Card lookup
    Card {
        #[command(subcommand)]
        action: CardAction,
    },

    /// Render the page head published for a card
    Head {
        slug: String,
        /// classic, futuristic or tres
        #[arg(long, default_value = "classic")]
        variant: CardVariant,
    },

    /// Print the install manifest generated for a card
    Manifest {
        slug: String,
        #[arg(long, default_value = "classic")]
        variant: CardVariant,
    },

    /// Persisted install state
    Install {
        #[command(subcommand)]
        action: InstallAction,
    },

    /// Print the effective site configuration
    Config,
}

#[derive(Subcommand)]
enum CardAction {
    /// Fetch a card and print its public fields
    Show {
        slug: String,
        /// Print the raw card as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the public URL of a card for every variant
    Urls { slug: String },
}

#[derive(Subcommand)]
enum InstallAction {
    /// Start a session and report whether the install affordance would show
    Status {
        /// User agent to detect the platform from
        #[arg(long, default_value = "")]
        user_agent: String,
        /// Simulate the platform's installable signal
        #[arg(long)]
        signal: bool,
        /// Treat the host as lacking an install prompt API
        #[arg(long)]
        no_prompt_api: bool,
        /// Running inside an installed shell
        #[arg(long)]
        standalone: bool,
        #[arg(long)]
        json: bool,
    },
    /// Record that the user dismissed the install affordance now
    Dismiss,
    /// Record that the platform confirmed installation
    MarkInstalled,
    /// Forget installed, dismissed and visited flags
    Reset,
}

fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("holocard")
}

fn load_config(path: Option<&Path>, api_url: Option<String>) -> Result<SiteConfig> {
    let mut config = match path {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };
    if let Some(url) = api_url {
        config.api_url = url;
    }
    Ok(config.normalized())
}

fn card_source(cli_card_file: Option<&Path>, config: &SiteConfig) -> Result<Arc<dyn CardSource>> {
    let source: Arc<dyn CardSource> = match cli_card_file {
        Some(path) => Arc::new(
            StaticCards::load(path)
                .with_context(|| format!("reading cards from {}", path.display()))?,
        ),
        None => Arc::new(CardClient::new(config)?),
    };
    Ok(source)
}

fn open_store(data_dir: &Path) -> Result<Arc<Storage>> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data dir {}", data_dir.display()))?;
    Ok(Arc::new(Storage::new(data_dir.join("holocard.redb"))?))
}

/// Load `slug` into a fresh page, returning the page and its head
async fn load_page(
    source: Arc<dyn CardSource>,
    config: Arc<SiteConfig>,
    variant: CardVariant,
    slug: &str,
) -> (CardPage<MemoryHead, BlobRegistry>, MemoryHead) {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new(config.site_url.clone());
    let mut page = CardPage::new(source, config, variant, head.clone(), blobs);
    page.load(slug).await;
    (page, head)
}

fn print_card(card: &DigitalCard, config: &SiteConfig) {
    println!("{}", card.name().unwrap_or("(sin nombre)"));
    if let Some(title) = card.job_title() {
        println!("  Title: {}", title);
    }
    if let Some(location) = card.location() {
        println!("  Location: {}", location);
    }
    if let Some(email) = card.email() {
        println!("  Email: {}", email);
    }
    if let Some(phone) = card.phone() {
        println!("  Phone: {}", phone);
    }
    for (network, url) in card.social_links() {
        println!("  {}: {}", network.label(), url);
    }
    let skills = card.skills();
    if !skills.is_empty() {
        println!("  Skills: {}", skills.join(", "));
    }
    println!("  URL: {}", config.card_url(CardVariant::Classic, &card.slug));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingBuilder::new("cli").with_default_filter(verbosity_filter(cli.verbose));
    if let Some(dir) = &cli.log_dir {
        logging = logging.with_logs_dir(dir);
    }
    logging.init()?;

    let config = Arc::new(load_config(cli.config.as_deref(), cli.api_url.clone())?);
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);

    match cli.command {
        Commands::Card { action } => match action {
            CardAction::Show { slug, json } => {
                let source = card_source(cli.card_file.as_deref(), &config)?;
                let card = source.fetch(&slug).await?;
                card.ensure_publicly_viewable()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&card)?);
                } else {
                    print_card(&card, &config);
                }
            }
            CardAction::Urls { slug } => {
                for variant in CardVariant::ALL {
                    println!("{:<11} {}", variant, config.card_url(variant, &slug));
                }
            }
        },

        Commands::Head { slug, variant } => {
            let source = card_source(cli.card_file.as_deref(), &config)?;
            let (page, head) = load_page(source, config.clone(), variant, &slug).await;
            print!("{}", head.to_html());
            if let PageState::NotFound(message) = page.state() {
                anyhow::bail!("{}", message);
            }
        }

        Commands::Manifest { slug, variant } => {
            let source = card_source(cli.card_file.as_deref(), &config)?;
            let (page, _head) = load_page(source, config.clone(), variant, &slug).await;
            match page.published() {
                Some(published) => {
                    println!("{}", serde_json::to_string_pretty(&published.manifest)?)
                }
                None => match page.state() {
                    PageState::NotFound(message) => anyhow::bail!("{}", message),
                    other => anyhow::bail!("card not loaded: {:?}", other),
                },
            }
        }

        Commands::Install { action } => {
            let store = open_store(&data_dir)?;
            match action {
                InstallAction::Status {
                    user_agent,
                    signal,
                    no_prompt_api,
                    standalone,
                    json,
                } => {
                    let signals = DisplaySignals {
                        display_mode_standalone: standalone,
                        ..Default::default()
                    };
                    let capabilities =
                        PlatformCapabilities::detect(&user_agent, &signals, !no_prompt_api);
                    let mut tracker = InstallabilityTracker::new(
                        store,
                        Arc::new(SystemClock),
                        capabilities,
                        &config,
                    );
                    if signal {
                        tracker.on_platform_installable_signal(Box::new(
                            ImmediatePrompt::accepting(),
                        ));
                    }

                    if json {
                        println!("{}", serde_json::to_string_pretty(&tracker.status())?);
                    } else {
                        let status = tracker.status();
                        println!("State: {}", status.state);
                        println!("  Platform: {}", status.platform);
                        println!("  Installed: {}", status.installed);
                        println!("  Returning visitor: {}", tracker.visited_before());
                        match tracker.dismissed_at() {
                            Some(at) => println!("  Dismissed at: {}", at.to_rfc3339()),
                            None => println!("  Dismissed at: never"),
                        }
                        println!("  Promptable: {}", tracker.is_promptable());
                        if !status.supported && !status.installed {
                            println!();
                            println!("{}", tracker.install_instructions());
                        }
                    }
                }
                InstallAction::Dismiss => {
                    let now = chrono::Utc::now();
                    InstallPreferences::mark_dismissed(store.as_ref(), now)?;
                    println!("Install prompt dismissed at {}", now.to_rfc3339());
                }
                InstallAction::MarkInstalled => {
                    let mut tracker = InstallabilityTracker::new(
                        store,
                        Arc::new(SystemClock),
                        PlatformCapabilities::detect("", &DisplaySignals::default(), true),
                        &config,
                    );
                    tracker.on_platform_installed_signal();
                    println!("Marked as installed");
                }
                InstallAction::Reset => {
                    InstallPreferences::clear(store.as_ref())?;
                    println!("Install state reset");
                }
            }
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(config.as_ref())?);
        }
    }

    Ok(())
}
