//! Connectivity check across every primary tier.

use std::collections::BTreeMap;

use serde::Serialize;

use super::nanogpt::NanoGptClient;
use super::record::Tier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierProbe {
    pub success: bool,
    pub count: usize,
    pub message: String,
}

/// Fetch each tier in turn. Fallback applies, so a failing tier reports the
/// `all` count when `all` is reachable.
pub async fn probe_tiers(client: &NanoGptClient) -> BTreeMap<Tier, TierProbe> {
    let mut results = BTreeMap::new();
    for tier in Tier::EVERY {
        let probe = match client.fetch_catalog(tier).await {
            Ok(catalog) => TierProbe {
                success: true,
                count: catalog.len(),
                message: format!("Successfully fetched {} models", catalog.len()),
            },
            Err(e) => TierProbe {
                success: false,
                count: 0,
                message: format!("Error: {}", e),
            },
        };
        results.insert(tier, probe);
    }
    results
}
