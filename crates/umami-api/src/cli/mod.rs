//! CLI command definitions for the `umami` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod ingest;
pub mod locale;
pub mod restaurant;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

/// Restaurant chat assistant: server, ingestion and terminal client.
#[derive(Parser)]
#[command(name = "umami", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through the OpenTelemetry stdout exporter.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory holding config.toml, the restaurants file and the
    /// vector store. Defaults to $UMAMI_DATA_DIR, then ~/.umami.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on (default from config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default from config).
        #[arg(long)]
        host: Option<String>,
    },

    /// Index a restaurant's document for retrieval.
    Ingest {
        /// Restaurant id from the restaurants file.
        id: String,
    },

    /// Chat with a running server from the terminal.
    Chat {
        /// Server base URL (default built from the [server] config).
        #[arg(long, env = "UMAMI_URL")]
        url: Option<String>,

        /// Restaurant id to ground answers in.
        #[arg(short, long)]
        restaurant: Option<String>,

        /// Answer language tag (en, ja).
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// List restaurants and whether they are indexed.
    #[command(alias = "ls")]
    Restaurants,

    /// Print the strings for a locale key.
    Locale {
        /// Key such as greeting, placeholder, waiting, footer, exampleMessages.
        key: String,

        /// Language tag; unknown tags fall back to en.
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// A cyan spinner with a message, ticking until cleared.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_chat_flags() {
        let cli = Cli::parse_from(["umami", "chat", "-r", "R1", "--language", "ja", "-v"]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Chat {
                restaurant,
                language,
                ..
            } => {
                assert_eq!(restaurant.as_deref(), Some("R1"));
                assert_eq!(language, "ja");
            }
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn test_parse_serve_defaults_to_config() {
        let cli = Cli::parse_from(["umami", "serve"]);
        assert!(matches!(cli.command, Commands::Serve { port: None, host: None }));
    }
}
