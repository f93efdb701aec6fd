//! Interactive soil search against an agronomy backend.
//!
//! Each line typed on stdin is fed to a remote combobox as the new query;
//! the candidates are printed once the query has settled. Enter a number to
//! pick that candidate and print the form it fills.
//!
//! ```text
//! cargo run -p terra-select --example soil_lookup -- [config.toml]
//! RUST_LOG=terra_select=debug cargo run -p terra-select --example soil_lookup
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use terra_select::combobox::{Combobox, HttpSearchBackend, RemoteSource};
use terra_select::config::FormConfig;
use terra_select::form::{RecommendationForm, bind_soil_search};
use terra_select::net::{AgronomyClient, HttpClient};
use terra_select::PointerEvents;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => FormConfig::load(path)?,
        None => FormConfig::default(),
    };
    tracing::info!(backend = %config.backend_url, "starting soil lookup");

    let client = AgronomyClient::new(HttpClient::new()?, config.backend_url.clone());
    let backend = HttpSearchBackend::new(client, config.soil_search_url());
    let mut soil = Combobox::mount(
        RemoteSource::new(backend).with_label_key(config.soil_search.label_key.clone()),
        config.soil_search.control_options(),
        &PointerEvents::global(),
    )?;

    let form = Arc::new(Mutex::new(RecommendationForm::new()));
    bind_soil_search(&soil, form.clone());

    println!("{}", soil.placeholder());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Ok(index) = line.trim().parse::<usize>() {
            if soil.activate(index) {
                println!("{:#?}", *form.lock());
            } else {
                println!("no candidate #{index}");
            }
            continue;
        }

        soil.set_query(line);
        soil.run_until_settled().await;

        if let Some(status) = soil.status_text() {
            println!("{status}");
        }
        for (index, row) in soil.candidate_rows().into_iter().enumerate() {
            println!("{index:>2}  {}", row.label);
        }
    }

    soil.unmount();
    Ok(())
}
