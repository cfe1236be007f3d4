use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use homeview_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "homeview")]
#[command(author, version, about = "An always-on kiosk display for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the kiosk display
    Run,
    /// Manage the notes shown on the notes panel
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum NoteAction {
    /// Add a note
    Add {
        /// Note text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List all notes
    List,
    /// Remove a note by id (a unique prefix is enough)
    Remove { id: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
}

/// Log to stderr, or to the log file while the TUI owns the terminal
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `config init` must work even when the existing file is broken
    if let Some(Commands::Config {
        action: ConfigAction::Init { force },
    }) = cli.command
    {
        return commands::config::init(force);
    }

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let tui = matches!(cli.command, None | Some(Commands::Run));
    init_logging(&config, tui)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Note { action }) => match action {
            NoteAction::Add { text } => commands::note::add(&config, &text.join(" ")),
            NoteAction::List => commands::note::list(&config),
            NoteAction::Remove { id } => commands::note::remove(&config, &id),
        },
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init(force),
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Show => commands::config::show(&config),
        },
    }
}
