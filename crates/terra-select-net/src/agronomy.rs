//! Client for the agronomy backend.
//!
//! The backend exposes three endpoints this crate consumes:
//!
//! | Endpoint | Shape |
//! |----------|-------|
//! | `GET <search_url>?q=&limit=` | `{ success: true, results: [...] }` or a bare array |
//! | `GET /api/crops` | `{ crops: [{ name, value, season, duration }] }` |
//! | `POST /api/recommend` | `{ success, recommendations: [{ type, product, quantity, reason, priority }] }` |
//!
//! Search records are kept as raw JSON objects: the fields beyond the label
//! (location, pH, nutrient levels, ...) vary by dataset and are forwarded
//! untouched to whoever consumes the selection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{NetworkError, Result};
use crate::http::HttpClient;

/// A search result record.
pub type Record = Map<String, Value>;

/// A decoded search response body.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPayload {
    /// `{ "success": true, "results": [...] }`
    Wrapped(Vec<Value>),
    /// A bare JSON array.
    Bare(Vec<Value>),
    /// Any other document; treated as zero results.
    Unrecognized,
}

impl SearchPayload {
    /// Classify a response document.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Bare(items),
            Value::Object(mut body) => {
                let succeeded = body.get("success").and_then(Value::as_bool) == Some(true);
                match body.remove("results") {
                    Some(Value::Array(items)) if succeeded => Self::Wrapped(items),
                    _ => Self::Unrecognized,
                }
            }
            _ => Self::Unrecognized,
        }
    }

    /// Check whether the document had one of the two accepted shapes.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }

    /// The object records of the payload, in order.
    ///
    /// Entries that are not JSON objects are skipped.
    pub fn into_records(self) -> Vec<Record> {
        let items = match self {
            Self::Wrapped(items) | Self::Bare(items) => items,
            Self::Unrecognized => return Vec::new(),
        };
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect()
    }
}

/// A crop offered by the backend catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Deserialize)]
struct CropCatalog {
    #[serde(default)]
    crops: Vec<Crop>,
}

/// Body of a recommendation request.
///
/// Optional parameters are omitted from the wire body when unset, and the
/// backend substitutes its own defaults for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub crop_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub soil_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub soil_type: String,
    pub soil_ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organic_matter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// One fertilizer recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub priority: String,
    /// Set on entries that report a problem instead of a product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct RecommendationResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    recommendations: Vec<Recommendation>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the agronomy backend.
#[derive(Debug, Clone)]
pub struct AgronomyClient {
    http: HttpClient,
    backend_url: String,
}

impl AgronomyClient {
    /// Create a client for the backend at `backend_url`.
    pub fn new(http: HttpClient, backend_url: impl Into<String>) -> Self {
        let backend_url = backend_url.into().trim_end_matches('/').to_string();
        Self { http, backend_url }
    }

    /// The backend base URL, without a trailing slash.
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// The absolute URL of a backend path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.backend_url, path.trim_start_matches('/'))
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Search `search_url` for `query`, returning at most what the server
    /// sends for `limit`.
    ///
    /// An unrecognized document is not an error; it yields no records.
    pub async fn search(&self, search_url: &str, query: &str, limit: usize) -> Result<Vec<Record>> {
        let response = self
            .http
            .get(search_url)
            .query("q", query)
            .query("limit", limit.to_string())
            .send()
            .await?
            .ensure_success()
            .await?;

        let payload = SearchPayload::from_value(response.json().await?);
        if !payload.is_recognized() {
            tracing::debug!(target: "terra_select_net::agronomy", query, "unrecognized search payload");
        }
        let records = payload.into_records();
        tracing::debug!(
            target: "terra_select_net::agronomy",
            query,
            count = records.len(),
            "search completed"
        );
        Ok(records)
    }

    /// Fetch the crop catalog.
    pub async fn crops(&self) -> Result<Vec<Crop>> {
        let catalog: CropCatalog = self
            .http
            .get(self.endpoint("/api/crops"))
            .send()
            .await?
            .ensure_success()
            .await?
            .json()
            .await?;
        Ok(catalog.crops)
    }

    /// Request fertilizer recommendations.
    pub async fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<Recommendation>> {
        let response: RecommendationResponse = self
            .http
            .post(self.endpoint("/api/recommend"))
            .json(request)
            .send()
            .await?
            .ensure_success()
            .await?
            .json()
            .await?;

        if !response.success {
            let reason = response
                .error
                .unwrap_or_else(|| "backend reported failure".to_string());
            tracing::warn!(target: "terra_select_net::agronomy", %reason, "recommendation failed");
            return Err(NetworkError::InvalidBody(reason));
        }
        tracing::debug!(
            target: "terra_select_net::agronomy",
            crop = %request.crop_type,
            count = response.recommendations.len(),
            "recommendations received"
        );
        Ok(response.recommendations)
    }
}
