//! Secondary catalog client. Converts every OpenRouter model into the canonical
//! record shape so callers never see the upstream schema.

use std::collections::BTreeMap;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::config::Config;

use super::error::FetchError;
use super::http;
use super::lenient;
use super::lookup;
use super::record::{CatalogResponse, ModelRecord, Pricing};

/// `owned_by` for ids without a `provider/` prefix.
pub const FALLBACK_OWNER: &str = "OpenRouter";
/// Value of `_original_source` on converted records.
pub const SOURCE_TAG: &str = "openrouter";

const IMAGE_MODALITY: &str = "image";

/// One model as OpenRouter lists it. Only the fields the conversion reads.
#[derive(Debug, Default, Deserialize)]
pub struct OpenRouterModel {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub canonical_slug: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub created: i64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub context_length: u64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub pricing: Pricing,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub architecture: Architecture,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub supported_parameters: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Architecture {
    #[serde(default, deserialize_with = "lenient::strings")]
    pub input_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OpenRouterListing {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    data: Vec<OpenRouterModel>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Provider prefix of `provider/model`, or [`FALLBACK_OWNER`].
pub fn owner_of(id: &str) -> &str {
    id.split_once('/').map_or(FALLBACK_OWNER, |(owner, _)| owner)
}

impl From<OpenRouterModel> for ModelRecord {
    fn from(model: OpenRouterModel) -> Self {
        let owned_by = owner_of(&model.id).to_string();

        let mut capabilities = BTreeMap::new();
        if model
            .architecture
            .input_modalities
            .iter()
            .any(|m| m == IMAGE_MODALITY)
        {
            capabilities.insert("vision".to_string(), true);
        }

        let name = if model.name.is_empty() {
            model.id.clone()
        } else {
            model.name
        };
        let id = if model.canonical_slug.is_empty() {
            model.id
        } else {
            model.canonical_slug
        };

        ModelRecord {
            id,
            name,
            created: model.created,
            owned_by,
            context_length: model.context_length,
            pricing: Pricing::new(model.pricing.prompt, model.pricing.completion),
            description: model.description,
            capabilities,
            requested_type: None,
            original_source: Some(SOURCE_TAG.to_string()),
            supported_parameters: Some(model.supported_parameters),
            extra: Map::new(),
        }
    }
}

pub struct OpenRouterClient {
    http: Client,
    base_url: String,
}

impl OpenRouterClient {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: http::client(config.timeout)?,
            base_url: config.openrouter_base_url.clone(),
        })
    }

    /// Fetch the full listing, converted to canonical records. No auth, no
    /// fallback.
    pub async fn fetch_catalog(&self) -> Result<CatalogResponse, FetchError> {
        let url = format!("{}/models", self.base_url);
        log::info!("Fetching OpenRouter models from: {}", url);

        let listing: OpenRouterListing = http::get_json(self.http.get(&url))
            .await
            .inspect_err(|e| log::warn!("OpenRouter request failed: {}", e))?;

        let data: Vec<ModelRecord> = listing.data.into_iter().map(ModelRecord::from).collect();
        log::info!("Successfully fetched {} OpenRouter models", data.len());
        Ok(CatalogResponse {
            data,
            extra: listing.extra,
        })
    }

    /// Fetch a fresh listing and return the first record with this id.
    /// A failed fetch is logged and reported as `None`.
    pub async fn get_model_details(&self, id: &str) -> Option<ModelRecord> {
        let catalog = match self.fetch_catalog().await {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("OpenRouter lookup of {} failed: {}", id, e);
                return None;
            }
        };
        let found = lookup::take_by_id(catalog.data, id);
        if found.is_none() {
            log::info!("OpenRouter model not found: {}", id);
        }
        found
    }
}
