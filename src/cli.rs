//! CLI definitions: argument parsing, subcommands, and help text.

use std::net::SocketAddr;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::catalog::Tier;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  model-browser                              Serve the JSON API on MODEL_BROWSER_BIND
  model-browser serve --bind 127.0.0.1:8080  Serve on a specific address
  model-browser models --tier paid           List paid-only NanoGPT models
  model-browser model openai/gpt-4o          Show one NanoGPT model as JSON
  model-browser openrouter list --query llama
  model-browser probe                        Check every NanoGPT tier
  model-browser config                       Show endpoints and API key status
  model-browser completions bash             Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Browse NanoGPT and OpenRouter model catalogs through one JSON API",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the JSON API (default)
    Serve {
        /// Listen address, overrides MODEL_BROWSER_BIND
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// List NanoGPT models for one tier
    Models {
        #[arg(long, value_enum, default_value_t = Tier::All)]
        tier: Tier,
        /// Filter models by id, name, or owner
        #[arg(long)]
        query: Option<String>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one NanoGPT model
    Model {
        /// Model ID (e.g. openai/gpt-4o)
        id: String,
    },
    /// Query the OpenRouter catalog
    Openrouter {
        #[command(subcommand)]
        subcommand: OpenrouterSubcommand,
    },
    /// Fetch every NanoGPT tier and report what came back
    Probe,
    /// Show endpoints, timeout, and API key status
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum OpenrouterSubcommand {
    /// List models
    List {
        /// Filter models by id, name, or owner
        #[arg(long)]
        query: Option<String>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one model
    Show { id: String },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
