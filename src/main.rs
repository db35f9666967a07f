//! # Model Browser
//!
//! Fetches model catalogs from NanoGPT (three access tiers) and OpenRouter,
//! normalizes both into one record shape, and serves them as JSON.
//!
//! ## Features
//! - `GET /api/models?type=...` and `GET /api/models/{id}` for NanoGPT
//! - `GET /api/openrouter/models` and `GET /api/openrouter/models/{id}`
//! - CLI listings, single-model lookup, and a per-tier probe

mod cli;
mod core;
mod run;
mod server;

use clap::Parser;
use dotenv::dotenv;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let args = cli::Args::parse();
    run::init_logger(&args);

    // Print user-friendly messages; exit uses Display not Debug
    let config = core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = run::run(args, config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
