//! Bookmark Vault command-line entry point.
//!
//! Imports a browser bookmarks export into the vault, cleans up duplicate
//! rows, checks bookmark accessibility and manages settings.

use std::error::Error;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use bookmark_vault::app::App;
use bookmark_vault::services::settings_engine::SettingsEngineTrait;

#[derive(Parser)]
#[command(name = "bookmark-vault", version, about = "Browser bookmarks to categorized Markdown tables")]
struct Cli {
    /// Root directory of the note vault
    #[arg(long, default_value = ".")]
    vault: String,
    /// Settings file (default: platform config directory)
    #[arg(long)]
    settings: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a browser bookmarks HTML export
    Import {
        /// Path to the exported HTML file
        file: String,
    },
    /// Remove duplicate rows from the bookmark documents
    Cleanup {
        /// Vault paths of the documents to process (default: all)
        #[arg(long, num_args = 0..)]
        files: Vec<String>,
    },
    /// Re-fetch every bookmark and record whether it is reachable
    Check {
        /// Vault paths of the documents to process (default: all)
        #[arg(long, num_args = 0..)]
        files: Vec<String>,
    },
    /// Show the bookmark count of each document
    Count,
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings as JSON
    Show,
    /// Set one value by its JSON key, e.g. `checkDelayMs 500`
    Set {
        key: String,
        /// JSON value; bare words are taken as strings
        value: String,
    },
    /// Restore the defaults
    Reset,
}

/// Cancels `token` on Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping");
            token.cancel();
        }
    });
}

/// An empty `--files` list means "every document".
fn selection(files: &[String]) -> Option<&[String]> {
    if files.is_empty() {
        None
    } else {
        Some(files)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut app = App::new(&cli.vault, cli.settings)?;

    match cli.command {
        Commands::Import { file } => {
            let html = std::fs::read_to_string(&file)?;
            let summary = app.import_html(&html)?;
            println!(
                "Processed {} bookmarks: {} added, {} already present.",
                summary.processed, summary.added, summary.skipped_existing
            );
            for path in &summary.files_written {
                println!("  wrote {}", path);
            }
        }
        Commands::Cleanup { files } => {
            let cancel = CancellationToken::new();
            cancel_on_ctrl_c(cancel.clone());
            let report = app.cleanup(selection(&files), &cancel)?;
            println!(
                "Processed {} bookmarks, removed {} duplicates across {} files.",
                report.processed,
                report.duplicates_removed,
                report.files_rewritten.len()
            );
            if report.cancelled {
                println!("Cleanup was interrupted.");
            }
        }
        Commands::Check { files } => {
            let cancel = CancellationToken::new();
            cancel_on_ctrl_c(cancel.clone());
            let report = app.check(selection(&files), &cancel).await?;
            println!(
                "Checked {} bookmarks: {} accessible, {} inaccessible.",
                report.checked(),
                report.accessible,
                report.inaccessible
            );
            for failure in &report.errors {
                println!("  {} - {}", failure.url, failure.error);
            }
            if report.cancelled {
                println!("Check was interrupted.");
            }
        }
        Commands::Count => {
            let counts = app.bookmark_counts()?;
            if counts.is_empty() {
                println!("No bookmark documents found.");
            }
            for (path, count) in counts {
                println!("{:>6}  {}", count, path);
            }
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => {
                println!("{}", serde_json::to_string_pretty(app.settings_engine.get_settings())?);
                println!("({})", app.settings_engine.get_config_path());
            }
            SettingsAction::Set { key, value } => {
                let value: serde_json::Value =
                    serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
                app.settings_engine.set_value(&key, value)?;
                println!("Updated {}.", key);
            }
            SettingsAction::Reset => {
                app.settings_engine.reset()?;
                println!("Settings restored to defaults.");
            }
        },
    }

    Ok(())
}
