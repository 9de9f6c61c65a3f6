//! GlobalStream assistant CLI
//!
//! Drives the voice assistant's language engine from the terminal.

mod commands;
mod output;
mod telemetry;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::process::ExitCode;
use stream_core::{AppConfig, AppError};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "globalstream",
    author = "GlobalStream Team",
    version,
    about = "GlobalStream voice assistant - natural language commands from the terminal",
    long_about = "A command-line front end for the GlobalStream voice assistant.\n\n\
                  Type the commands you would speak ('go home', 'search for dune',\n\
                  'recommend top comedy') and see how the assistant understands them."
)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(short, long, env = "GLOBALSTREAM_CONFIG")]
    config: Option<String>,

    /// Output format (text, json, yaml)
    #[arg(
        short,
        long,
        default_value = "text",
        value_parser = ["text", "json", "yaml"]
    )]
    format: String,

    /// Seed for response selection (overrides configuration)
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single utterance and print the assistant's reply
    Ask {
        /// What you would say to the assistant
        utterance: String,

        /// Match structured requests ("show me movies with ... from 1990s")
        #[arg(short, long)]
        advanced: bool,
    },

    /// Start an interactive assistant session
    Chat {
        /// First utterance to send
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List the intents the assistant understands
    Intents,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Get a configuration value (e.g. nlp.context_ttl_seconds)
    Get {
        /// Configuration key
        key: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = run(&cli);

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            if cli.verbose {
                for cause in e.chain().skip(1) {
                    eprintln!("{}: {}", "Caused by".yellow(), cause);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config =
        AppConfig::load_with(cli.config.as_deref()).map_err(AppError::from)?;
    if let Some(seed) = cli.seed {
        config.nlp.response_seed = Some(seed);
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    telemetry::init_telemetry(&config.logging)?;

    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;
    tracing::debug!(config = ?config, "Configuration loaded");

    match &cli.command {
        Commands::Ask { utterance, advanced } => {
            commands::ask::run(&config, utterance, *advanced, format)
        }
        Commands::Chat { message } => commands::chat::run(&config, message.clone()),
        Commands::Intents => commands::intents::run(format),
        Commands::Config(cmd) => commands::config::run(&config, cmd, format),
        Commands::Completions { shell } => commands::completions::run(*shell),
    }
}
