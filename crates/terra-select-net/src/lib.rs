//! Networking for terra-select.
//!
//! This crate provides:
//!
//! - **HTTP Client**: A cloneable `reqwest` wrapper with builder-style requests
//! - **Agronomy Client**: The soil search, crop catalog and recommendation
//!   endpoints of the agronomy backend, with their wire types
//!
//! # Example
//!
//! ```ignore
//! use terra_select_net::{AgronomyClient, HttpClient};
//!
//! let client = AgronomyClient::new(HttpClient::new()?, "http://localhost:5000");
//!
//! let soils = client
//!     .search("http://localhost:5000/api/soils", "Kurnool", 15)
//!     .await?;
//! let crops = client.crops().await?;
//! ```
//!
//! ## Configuration
//!
//! ```ignore
//! let http = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("field-app/1.0")
//!     .build()?;
//! ```

pub mod agronomy;
pub mod error;
pub mod http;

pub use agronomy::{
    AgronomyClient, Crop, Recommendation, RecommendationRequest, Record, SearchPayload,
};
pub use error::{NetworkError, Result};
pub use http::{HttpClient, HttpClientBuilder, HttpClientConfig, HttpMethod, HttpResponse};
