//! Primary catalog client: tiered model listings with fallback to the `all` tier.

use reqwest::Client;
use tokio::sync::OnceCell;

use crate::core::config::{self, AuthStyle, Config};

use super::error::{ClientError, FetchError};
use super::http;
use super::record::{CatalogResponse, ModelRecord, Tier};

const API_KEY_HEADER: &str = "x-api-key";

pub struct NanoGptClient {
    http: Client,
    base_url: String,
    api_key: String,
    auth_style: AuthStyle,
    /// Full `all`-tier catalog, filled by the first successful id lookup and
    /// never refreshed afterwards.
    lookup_cache: OnceCell<CatalogResponse>,
}

impl NanoGptClient {
    /// Fails when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let api_key = config.require_api_key()?.to_string();
        log::info!(
            "NanoGPT client initialized with API key: {}",
            config::mask_key(&api_key)
        );
        Ok(Self {
            http: http::client(config.timeout)?,
            base_url: config.nanogpt_base_url.clone(),
            api_key,
            auth_style: config.auth_style,
            lookup_cache: OnceCell::new(),
        })
    }

    fn tier_url(&self, tier: Tier) -> String {
        format!("{}{}?detailed=true", self.base_url, tier.path())
    }

    /// One request against one tier, no fallback.
    async fn fetch_tier(&self, tier: Tier) -> Result<CatalogResponse, FetchError> {
        let url = self.tier_url(tier);
        log::info!("Fetching {} models from: {}", tier, url);

        let request = self.http.get(&url);
        let request = match self.auth_style {
            AuthStyle::ApiKeyHeader => request.header(API_KEY_HEADER, &self.api_key),
            AuthStyle::Bearer => request.bearer_auth(&self.api_key),
        };

        let mut catalog: CatalogResponse = http::get_json(request).await?;
        catalog.data = catalog
            .data
            .into_iter()
            .map(ModelRecord::normalized)
            .collect();
        catalog.tag_tier(tier);
        if catalog.is_empty() {
            log::warn!("NanoGPT {} listing contains no models", tier);
        }
        log::info!(
            "Successfully fetched {} models for type: {}",
            catalog.len(),
            tier
        );
        Ok(catalog)
    }

    /// Fetch the listing for `tier`. When a `subscription` or `paid` request
    /// fails for any reason, the `all` listing is returned in its place, tagged
    /// `all`. A failed `all` request is returned as the error.
    pub async fn fetch_catalog(&self, tier: Tier) -> Result<CatalogResponse, FetchError> {
        match self.fetch_tier(tier).await {
            Ok(catalog) => Ok(catalog),
            Err(e) if tier != Tier::All => {
                if e.is_timeout() {
                    log::warn!("NanoGPT {} request timed out", tier);
                } else {
                    log::warn!("NanoGPT {} request failed: {}", tier, e);
                }
                log::warn!("Falling back to all models for {}", tier);
                self.fetch_tier(Tier::All).await
            }
            Err(e) => {
                log::warn!("NanoGPT {} request failed: {}", tier, e);
                Err(e)
            }
        }
    }

    /// Look up one model in the cached `all` catalog, fetching it on first use.
    /// `None` when the id is unknown or the catalog could not be fetched; a
    /// failed fetch leaves the cache empty so the next lookup retries.
    pub async fn get_model_details(&self, id: &str) -> Option<ModelRecord> {
        let catalog = match self
            .lookup_cache
            .get_or_try_init(|| self.fetch_catalog(Tier::All))
            .await
        {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("Lookup of {} failed, catalog unavailable: {}", id, e);
                return None;
            }
        };

        let found = catalog.find(id).cloned();
        match &found {
            Some(_) => log::debug!("Found model details for: {}", id),
            None => log::info!("Model not found in cache: {}", id),
        }
        found
    }

    /// The lookup cache, if a lookup has populated it.
    #[cfg(test)]
    pub fn cached_catalog(&self) -> Option<&CatalogResponse> {
        self.lookup_cache.get()
    }
}
