//! Engine Protocol Definitions
//!
//! Request and response bodies for the REST endpoints the client talks to, plus the
//! single decoding step that turns a raw search response into typed records.
//!
//! Only the fields the demo reads are modelled; everything else in the engine's
//! responses is ignored.

use crate::config::types::DecodePolicy;
use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

pub const ENDPOINT_SEARCH: &str = "_search";
pub const PARAM_REFRESH: &str = "refresh";
pub const PARAM_PRETTY: &str = "pretty";

// ============================================================
// REQUESTS
// ============================================================

/// A single document write: `PUT /{index}/{doc_type}/{id}`.
#[derive(Debug, Clone)]
pub struct IndexRequest {
    pub index: String,
    pub doc_type: String,
    pub id: String,
    pub body: serde_json::Value,
    /// Make the document visible to search before the call returns.
    pub refresh: bool,
}

impl IndexRequest {
    pub fn path(&self) -> String {
        format!("/{}/{}/{}", self.index, self.doc_type, self.id)
    }
}

/// Exact match on the raw value of one field.
///
/// Serializes as `{"term": {"<field>": "<value>"}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    pub field: String,
    pub value: String,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Serialize for TermQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut term = serde_json::Map::new();
        term.insert(
            self.field.clone(),
            serde_json::Value::String(self.value.clone()),
        );

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("term", &term)?;
        map.end()
    }
}

/// Serializes as `{"<field>": {"order": "asc" | "desc"}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub ascending: bool,
}

impl Serialize for SortField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let order = if self.ascending { "asc" } else { "desc" };
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &serde_json::json!({ "order": order }))?;
        map.end()
    }
}

/// `POST /{index}/_search`. Only the body fields are serialized.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    #[serde(skip)]
    pub index: String,
    #[serde(skip)]
    pub pretty: bool,

    pub query: TermQuery,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortField>,
    pub from: usize,
    pub size: usize,
}

impl SearchRequest {
    pub fn new(index: impl Into<String>, query: TermQuery) -> Self {
        Self {
            index: index.into(),
            pretty: false,
            query,
            sort: Vec::new(),
            from: 0,
            size: 10,
        }
    }

    pub fn sort(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.sort.push(SortField {
            field: field.into(),
            ascending,
        });
        self
    }

    pub fn from(mut self, from: usize) -> Self {
        self.from = from;
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> String {
        format!("/{}/{}", self.index, ENDPOINT_SEARCH)
    }
}

// ============================================================
// RESPONSES
// ============================================================

/// Body of index create/delete responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcknowledgedResponse {
    #[serde(default)]
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexResponse {
    #[serde(rename = "_index", default)]
    pub index: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_version", default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub result: Option<String>,
}

/// `hits.total` is a bare number on older engines and an object on newer ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Object {
        value: u64,
        #[serde(default)]
        relation: Option<String>,
    },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Object { value, .. } => *value,
        }
    }
}

impl Default for TotalHits {
    fn default() -> Self {
        TotalHits::Count(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_source", default)]
    pub source: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub total: TotalHits,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Server-side query time in milliseconds.
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub hits: HitsEnvelope,
}

// ============================================================
// HIT DECODING
// ============================================================

/// Search results decoded into `T`, in the order the engine returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedHits<T> {
    pub took: u64,
    pub total: u64,
    pub items: Vec<T>,
}

#[derive(Debug, Error)]
#[error("failed to decode hit `{id}`: {source}")]
pub struct HitDecodeError {
    pub id: String,
    #[source]
    pub source: serde_json::Error,
}

impl SearchResponse {
    /// Decodes every hit's `_source` into `T`.
    ///
    /// `total` always comes from `hits.total`, so it can be larger than `items.len()`
    /// (paging, or hits dropped under `DecodePolicy::Skip`).
    pub fn decode_hits<T: DeserializeOwned>(
        self,
        policy: DecodePolicy,
    ) -> Result<DecodedHits<T>, HitDecodeError> {
        let total = self.hits.total.value();
        let mut items = Vec::with_capacity(self.hits.hits.len());

        for hit in self.hits.hits {
            let id = hit.id.unwrap_or_default();
            let decoded = match hit.source {
                Some(source) => serde_json::from_value::<T>(source),
                None => Err(serde_json::Error::custom("hit has no _source")),
            };

            match decoded {
                Ok(item) => items.push(item),
                Err(source) => match policy {
                    DecodePolicy::Skip => {
                        tracing::warn!("Skipping hit {}: {}", id, source);
                    }
                    DecodePolicy::Fail => return Err(HitDecodeError { id, source }),
                },
            }
        }

        Ok(DecodedHits {
            took: self.took,
            total,
            items,
        })
    }
}
