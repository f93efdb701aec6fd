//! HTTP client for terra-select.
//!
//! A cloneable wrapper over `reqwest` for talking to JSON backends, with
//! builder-style requests.
//!
//! # Example
//!
//! ```ignore
//! use terra_select_net::http::HttpClient;
//!
//! let client = HttpClient::new()?;
//!
//! let response = client
//!     .get("http://localhost:5000/api/soils")
//!     .query("q", "Kurnool")
//!     .query("limit", "15")
//!     .send()
//!     .await?
//!     .ensure_success()
//!     .await?;
//!
//! let body: serde_json::Value = response.json().await?;
//! ```

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig, MAX_REDIRECTS};
pub use request::{HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody};
pub use response::HttpResponse;
