//! Subscribes to the gateway, waits for the first complete event and prints it as one line of JSON.
//!
//! Configured through `GATEWAY_URL`, `TOPIC` and `SUBSCRIBER_ID`; log verbosity through `RUST_LOG`.

use anyhow::Context;
use ssegate::{client::GatewayClient, config::SubscriberConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = SubscriberConfig::from_env().context("invalid subscriber configuration")?;
    let client = GatewayClient::new(config.gateway_url);

    let event = client
        .subscribe_first(&config.subscription)
        .context("could not read an event from the gateway")?;

    println!("{}", event.to_json().context("could not render event")?);
    Ok(())
}
