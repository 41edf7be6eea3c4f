use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod config;
mod console;
mod env_vars;
mod sub_commands;

use crate::config::Settings;

const DEFAULT_WORK_DIR: &str = ".checkout-cli";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Drive a PromptPay checkout from the terminal
#[derive(Parser)]
#[command(name = "checkout-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Logging level
    #[arg(short, long, default_value = "error")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the QR payload for an amount
    Payload(sub_commands::payload::PayloadSubCommand),
    /// Run the payment form for an order
    Pay(sub_commands::pay::PaySubCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();
    let default_filter = args.log_level;

    let env_filter = EnvFilter::new(format!("{default_filter}"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config_file = match &args.config {
        Some(config_file) => Some(config_file.clone()),
        None => {
            let home_dir =
                home::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
            let default_file = home_dir.join(DEFAULT_WORK_DIR).join(CONFIG_FILE_NAME);
            default_file.exists().then_some(default_file)
        }
    };

    let settings = Settings::new(config_file)?.from_env()?;
    tracing::debug!("Using settings: {:?}", settings);

    match &args.command {
        Commands::Payload(sub_command_args) => {
            sub_commands::payload::payload(&settings, sub_command_args)
        }
        Commands::Pay(sub_command_args) => {
            sub_commands::pay::pay(&settings, sub_command_args).await
        }
    }
}
