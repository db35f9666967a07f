//! Canonical model record shared by both catalogs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// Pricing unit reported for every record, whatever the source.
pub const PRICE_UNIT: &str = "per_million_tokens";

/// Access tier of the primary catalog. Each tier has its own upstream path.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    All,
    Subscription,
    Paid,
}

impl Tier {
    pub const EVERY: [Tier; 3] = [Tier::All, Tier::Subscription, Tier::Paid];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::All => "all",
            Tier::Subscription => "subscription",
            Tier::Paid => "paid",
        }
    }

    /// Path below the primary base URL, without the query string.
    pub fn path(self) -> &'static str {
        match self {
            Tier::All => "/personalized/v1/models",
            Tier::Subscription => "/subscription/v1/models",
            Tier::Paid => "/paid/v1/models",
        }
    }

    /// Parse a `?type=` value. Anything unrecognised means `all`.
    pub fn from_query(raw: &str) -> Tier {
        match raw.trim().to_ascii_lowercase().as_str() {
            "subscription" => Tier::Subscription,
            "paid" => Tier::Paid,
            _ => Tier::All,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn price_unit() -> String {
    PRICE_UNIT.to_string()
}

/// Prompt and completion rates. `unit` is always [`PRICE_UNIT`]; an upstream
/// `unit` is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub prompt: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub completion: f64,
    #[serde(skip_deserializing, default = "price_unit")]
    pub unit: String,
}

impl Pricing {
    pub fn new(prompt: f64, completion: f64) -> Self {
        Self {
            prompt,
            completion,
            unit: price_unit(),
        }
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// One model in canonical shape.
///
/// Decoding never rejects a record for a missing or wrong-typed canonical
/// field: defaults are substituted. Fields the primary catalog sends beyond
/// the canonical set are kept in `extra` and serialised back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub created: i64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub owned_by: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub context_length: u64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub pricing: Pricing,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::flags")]
    pub capabilities: BTreeMap<String, bool>,
    /// Primary tier query that produced this record.
    #[serde(
        rename = "_requested_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub requested_type: Option<Tier>,
    /// Set on records converted from the secondary catalog.
    #[serde(
        rename = "_original_source",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_source: Option<String>,
    #[serde(
        rename = "_supported_parameters",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub supported_parameters: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelRecord {
    /// Fill display defaults that depend on other fields.
    pub fn normalized(mut self) -> Self {
        if self.name.is_empty() {
            self.name = self.id.clone();
        }
        self
    }

    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.get(name).copied().unwrap_or(false)
    }
}

/// Envelope both clients return: `{"data": [...]}`. Other top-level members of
/// the upstream envelope are passed through.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub data: Vec<ModelRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogResponse {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Mark every record with the tier that was queried.
    pub fn tag_tier(&mut self, tier: Tier) {
        for record in &mut self.data {
            record.requested_type = Some(tier);
        }
    }

    /// First record with exactly this id.
    pub fn find(&self, id: &str) -> Option<&ModelRecord> {
        super::lookup::find_by_id(&self.data, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tier_paths_are_distinct() {
        assert_eq!(Tier::All.path(), "/personalized/v1/models");
        assert_eq!(Tier::Subscription.path(), "/subscription/v1/models");
        assert_eq!(Tier::Paid.path(), "/paid/v1/models");
    }

    #[test]
    fn tier_from_query_falls_back_to_all() {
        assert_eq!(Tier::from_query("paid"), Tier::Paid);
        assert_eq!(Tier::from_query(" Subscription "), Tier::Subscription);
        assert_eq!(Tier::from_query("all"), Tier::All);
        assert_eq!(Tier::from_query("premium"), Tier::All);
        assert_eq!(Tier::from_query(""), Tier::All);
    }

    #[test]
    fn sparse_record_gets_every_canonical_field() {
        let record: ModelRecord = serde_json::from_value(json!({"id": "m"})).unwrap();
        let out = serde_json::to_value(&record).unwrap();
        for field in [
            "id",
            "name",
            "created",
            "owned_by",
            "context_length",
            "pricing",
            "description",
            "capabilities",
        ] {
            assert!(out.get(field).is_some(), "missing {field}");
        }
        assert_eq!(out["pricing"], json!({"prompt": 0.0, "completion": 0.0, "unit": PRICE_UNIT}));
        assert!(out.get("_requested_type").is_none());
        assert!(out.get("_original_source").is_none());
    }

    #[test]
    fn native_fields_survive_roundtrip() {
        let record: ModelRecord = serde_json::from_value(json!({
            "id": "chatgpt-4o-latest",
            "name": "ChatGPT 4o",
            "context_length": null,
            "pricing": {"prompt": 2.5, "completion": 10, "currency": "USD", "unit": "per_thousand"},
            "capabilities": {"vision": true, "reasoning": false, "max_images": 10},
            "icon_url": "/icons/openai.svg",
            "cost_estimate": 0.01
        }))
        .unwrap();
        assert_eq!(record.context_length, 0);
        assert_eq!(record.pricing, Pricing::new(2.5, 10.0));
        assert!(record.has_capability("vision"));
        assert!(!record.has_capability("reasoning"));
        assert!(!record.has_capability("max_images"));

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["icon_url"], "/icons/openai.svg");
        assert_eq!(out["cost_estimate"], 0.01);
        assert_eq!(out["pricing"]["unit"], PRICE_UNIT);
    }

    #[test]
    fn normalized_uses_id_for_missing_name() {
        let record = ModelRecord {
            id: "x/y".to_string(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(record.name, "x/y");
    }

    #[test]
    fn envelope_without_data_is_empty() {
        let empty: CatalogResponse = serde_json::from_value(json!({"object": "list"})).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.extra["object"], "list");

        let null: CatalogResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert_eq!(null.len(), 0);
    }

    #[test]
    fn tag_tier_marks_every_record() {
        let mut catalog = CatalogResponse {
            data: vec![ModelRecord::default(), ModelRecord::default()],
            ..Default::default()
        };
        catalog.tag_tier(Tier::Paid);
        assert!(catalog.data.iter().all(|m| m.requested_type == Some(Tier::Paid)));
        let out = serde_json::to_value(&catalog).unwrap();
        assert_eq!(out["data"][0]["_requested_type"], "paid");
    }
}
