//! Publishes one event to the gateway and prints the gateway's receipt.
//!
//! Configured through `GATEWAY_URL`, `TOPIC`, `EVENT_ID`, `API_KEY` and `PAYLOAD`; log verbosity through `RUST_LOG`.

use anyhow::Context;
use ssegate::{client::GatewayClient, config::PublisherConfig, gateway::PublishStatus};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = PublisherConfig::from_env().context("invalid publisher configuration")?;
    let client = GatewayClient::new(config.gateway_url);

    let published = client
        .publish(&config.publication)
        .context("could not publish event")?;

    match published.receipt() {
        Ok(receipt) if receipt.status == PublishStatus::Dropped => {
            tracing::warn!(
                id = %receipt.id,
                dropped = ?receipt.dropped_topics,
                "no subscribers, event was dropped"
            );
        }
        Ok(receipt) => {
            tracing::info!(id = %receipt.id, delivered = ?receipt.delivered, "event accepted");
        }
        Err(e) => tracing::warn!(error = %e, "could not parse publish receipt"),
    }

    println!("{}", published.body);
    Ok(())
}
