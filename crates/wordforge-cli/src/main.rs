//! Wordforge CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use wordforge_core::config::{EnvFile, DEFAULT_ENV_FILE};

mod cli;
mod ui;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // The env file feeds clap's `env` fallbacks, so it is applied before parsing.
    let args: Vec<String> = std::env::args().collect();
    let env_file = cli::env_file_arg(&args).unwrap_or_else(|| DEFAULT_ENV_FILE.into());
    let loaded = EnvFile::load(&env_file).map(|file| file.map(|f| f.apply()));

    let cli = Cli::parse();

    if let Err(e) = wordforge_core::log::init(cli.log_level()) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    match loaded {
        Ok(Some(applied)) => tracing::debug!("Loaded {} variables from {}", applied, env_file.display()),
        Ok(None) => tracing::debug!("No env file at {}", env_file.display()),
        Err(e) => tracing::warn!("{}", e),
    }

    match cli.execute().await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
