//! CLI for replica.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use replica_core::config;
use std::path::PathBuf;

use commands::{run_capture, run_completions, run_discover, CaptureArgs};

/// Top-level CLI for replica.
#[derive(Debug, Parser)]
#[command(name = "replica")]
#[command(about = "replica: save a web page and its images and stylesheets as an offline archive", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Capture a page into `<hostname>-replica.zip`.
    Capture {
        /// Absolute URL of the page.
        url: String,
        /// Directory the archive is written to (default: current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Never fall back to the relay when a direct fetch fails.
        #[arg(long, conflicts_with = "relay_endpoint")]
        no_relay: bool,
        /// Relay endpoint overriding the configured one.
        #[arg(long, value_name = "URL")]
        relay_endpoint: Option<String>,
        /// Print the summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Fetch a page and list the assets it references, without downloading them.
    Discover {
        /// Absolute URL of the page.
        url: String,
        /// Print the lists as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Capture {
                url,
                output_dir,
                no_relay,
                relay_endpoint,
                json,
            } => {
                if no_relay {
                    cfg.relay.enabled = false;
                }
                if let Some(endpoint) = relay_endpoint {
                    cfg.relay.endpoint = endpoint;
                }
                let output_dir = match output_dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_capture(&cfg, &CaptureArgs { url, output_dir, json })?;
            }
            CliCommand::Discover { url, json } => run_discover(&cfg, &url, json)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
