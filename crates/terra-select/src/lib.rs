//! terra-select - searchable selection controls for agronomy forms.
//!
//! This is the umbrella crate: it re-exports the core primitives and adds
//! the [`Combobox`](combobox::Combobox) control, its configuration and the
//! recommendation form it feeds.
//!
//! # Example
//!
//! ```no_run
//! use terra_select::prelude::*;
//! use terra_select::net::{AgronomyClient, HttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FormConfig::default();
//!     let client = AgronomyClient::new(HttpClient::new()?, config.backend_url.clone());
//!     let backend = HttpSearchBackend::new(client, config.soil_search_url());
//!
//!     let mut soil = Combobox::mount(
//!         RemoteSource::new(backend).with_label_key(config.soil_search.label_key.clone()),
//!         config.soil_search.control_options(),
//!         &PointerEvents::global(),
//!     )?;
//!
//!     soil.set_query("Kurnool");
//!     soil.run_until_settled().await;
//!     for row in soil.candidate_rows() {
//!         println!("{}", row.label);
//!     }
//!     Ok(())
//! }
//! ```

pub use terra_select_core::*;

#[cfg(feature = "networking")]
pub use terra_select_net as net;

pub mod combobox;
pub mod config;
pub mod error;
#[cfg(feature = "networking")]
pub mod form;
pub mod prelude;

pub use error::SelectError;
