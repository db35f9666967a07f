//! CLI-only commands: config info, catalog listings, single-model details, tier probe.
//!
//! These run without starting the API server and produce plain text (or JSON) output.

use std::error::Error;
use std::io;

use chrono::DateTime;

use crate::core::catalog::{
    CatalogResponse, ModelRecord, NanoGptClient, OpenRouterClient, Tier, lookup, probe_tiers,
};
use crate::core::config::{self, Config};

/// Run the `config` command: display endpoints, auth style, timeout, and API key status.
pub fn run_config(config: &Config) {
    let api_key_status = match &config.api_key {
        Some(key) => format!("set ✓ ({})", config::mask_key(key)),
        None => "not set".to_string(),
    };

    println!("NanoGPT:      {}", config.nanogpt_base_url);
    println!("OpenRouter:   {}", config.openrouter_base_url);
    println!("Auth style:   {}", config.auth_style);
    println!("Timeout:      {}s", config.timeout.as_secs());
    println!("Bind:         {}", config.bind);
    println!("API key:      {}", api_key_status);
}

/// Run the `models` command: list one primary tier.
pub async fn run_models(
    config: &Config,
    tier: Tier,
    query: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let client = NanoGptClient::from_config(config)?;
    let catalog = client.fetch_catalog(tier).await?;
    print_catalog(&catalog, query, json)
}

/// Run the `model` command: show one primary record as JSON.
pub async fn run_model(config: &Config, id: &str) -> Result<(), Box<dyn Error>> {
    let client = NanoGptClient::from_config(config)?;
    let record = client.get_model_details(id).await;
    print_record(record, id)
}

/// Run the `openrouter list` command.
pub async fn run_openrouter_list(
    config: &Config,
    query: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let client = OpenRouterClient::from_config(config)?;
    let catalog = client.fetch_catalog().await?;
    print_catalog(&catalog, query, json)
}

/// Run the `openrouter show` command.
pub async fn run_openrouter_show(config: &Config, id: &str) -> Result<(), Box<dyn Error>> {
    let client = OpenRouterClient::from_config(config)?;
    let record = client.get_model_details(id).await;
    print_record(record, id)
}

/// Run the `probe` command: one line per tier.
pub async fn run_probe(config: &Config) -> Result<(), Box<dyn Error>> {
    let client = NanoGptClient::from_config(config)?;
    for (tier, probe) in probe_tiers(&client).await {
        let mark = if probe.success { "ok" } else { "FAIL" };
        println!("{:<13} {:<4} {}", tier.as_str(), mark, probe.message);
    }
    Ok(())
}

fn print_catalog(
    catalog: &CatalogResponse,
    query: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let models = lookup::filter_models(&catalog.data, query.unwrap_or(""));
    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }
    if models.is_empty() {
        println!("No models found.");
        return Ok(());
    }
    for model in models {
        println!("{}", format_model_line(model));
    }
    Ok(())
}

fn print_record(record: Option<ModelRecord>, id: &str) -> Result<(), Box<dyn Error>> {
    let record = record.ok_or_else(|| io::Error::other(format!("Model not found: {}", id)))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Creation date as `YYYY-MM-DD`, or `-` when unknown.
pub fn format_created(created: i64) -> String {
    if created <= 0 {
        return "-".to_string();
    }
    DateTime::from_timestamp(created, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One listing line: id, name, context, prices, created.
pub fn format_model_line(model: &ModelRecord) -> String {
    let vision = if model.has_capability("vision") {
        " [vision]"
    } else {
        ""
    };
    format!(
        "{:<45} {:<35} ctx {:>8}  in {:>8}  out {:>8}  {}{}",
        model.id,
        model.name,
        model.context_length,
        model.pricing.prompt,
        model.pricing.completion,
        format_created(model.created),
        vision
    )
}
