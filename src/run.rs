//! Application run modes: logger init, command dispatch.

use clap::CommandFactory;

use crate::cli::{Args, Commands, OpenrouterSubcommand};
use crate::core;
use crate::core::config::Config;
use crate::server;

/// Initialize env_logger. `RUST_LOG` wins over the -v/-q flags.
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .try_init();
}

/// Dispatch the parsed command. No subcommand serves the API.
pub async fn run(args: Args, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        None => server::serve(&config, config.bind).await,
        Some(Commands::Serve { bind }) => {
            server::serve(&config, bind.unwrap_or(config.bind)).await
        }
        Some(Commands::Models { tier, query, json }) => {
            core::cli::run_models(&config, tier, query.as_deref(), json).await
        }
        Some(Commands::Model { id }) => core::cli::run_model(&config, &id).await,
        Some(Commands::Openrouter { subcommand }) => match subcommand {
            OpenrouterSubcommand::List { query, json } => {
                core::cli::run_openrouter_list(&config, query.as_deref(), json).await
            }
            OpenrouterSubcommand::Show { id } => {
                core::cli::run_openrouter_show(&config, &id).await
            }
        },
        Some(Commands::Probe) => core::cli::run_probe(&config).await,
        Some(Commands::Config) => {
            core::cli::run_config(&config);
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            crate::cli::generate(shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
            Ok(())
        }
    }
}
