//! CLI for the splitfetch downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use splitfetch_core::config;

use commands::run_download;

/// Top-level CLI for splitfetch.
#[derive(Debug, Parser)]
#[command(name = "splitfetch")]
#[command(about = "splitfetch: download one file over concurrent byte-range requests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a file into the configured output directory.
    Download {
        /// Direct HTTP/HTTPS URL to download.
        url: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Download { url } => run_download(&cfg, &url).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
