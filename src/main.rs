//! `localcloud` command-line front end.
//!
//! Runs a single middleware operation against the instance configured by
//! the `LOCALCLOUD_*` environment variables and exits.
//!
//! ```text
//! localcloud ping [group]
//! localcloud register <entry.json>
//! localcloud remove <entry.json>
//! localcloud clear-registry
//! localcloud orchestrate <request.json>
//! localcloud subscribe <filter.json>
//! localcloud unsubscribe <filter.json>
//! localcloud publish <event-type> <payload> <source.json> [delivery-uri]
//! localcloud authorize-intercloud <request.json>
//! localcloud authorize-intracloud <request.json>
//! ```

use std::path::Path;

use anyhow::{Context, bail};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use localcloud_client::domain::{
    EventFilter, IntercloudAuthRequest, IntracloudAuthRequest, Service, ServiceRegistryEntry,
    ServiceRequestForm,
};
use localcloud_client::{ClientConfig, MediationClient, ServiceGroup};

const USAGE: &str = "usage: localcloud <ping|register|remove|clear-registry|orchestrate|\
subscribe|unsubscribe|publish|authorize-intercloud|authorize-intracloud> [args]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ClientConfig::from_env().context("loading configuration")?;
    tracing::info!(middleware = %config.base_url(), debug = config.debug, "using middleware");

    let client = MediationClient::new(config)?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    match (command.as_str(), rest) {
        ("ping", []) => println!("{}", client.echo(ServiceGroup::ServiceRegistry).await?),
        ("ping", [group]) => {
            let group: ServiceGroup = group.parse().map_err(anyhow::Error::msg)?;
            println!("{}", client.echo(group).await?);
        }
        ("register", [path]) => {
            let entry: ServiceRegistryEntry = read_json(path)?;
            client.register_service(&entry).await?;
        }
        ("remove", [path]) => {
            let entry: ServiceRegistryEntry = read_json(path)?;
            client.remove_service(&entry).await?;
        }
        ("clear-registry", []) => client.clear_registry().await?,
        ("orchestrate", [path]) => {
            let request: ServiceRequestForm = read_json(path)?;
            for form in client.request_orchestration(&request).await? {
                println!("{}", serde_json::to_string(&form)?);
            }
        }
        ("subscribe", [path]) => {
            let filter: EventFilter = read_json(path)?;
            client.subscribe(&filter).await?;
        }
        ("unsubscribe", [path]) => {
            let filter: EventFilter = read_json(path)?;
            client.unsubscribe(&filter).await?;
        }
        ("publish", [event_type, payload, source, delivery @ ..]) if delivery.len() <= 1 => {
            let source: Service = read_json(source)?;
            let event = client
                .publish(source, event_type, payload, delivery.first().cloned())
                .await?;
            println!("{}", serde_json::to_string(&event)?);
        }
        ("authorize-intercloud", [path]) => {
            let request: IntercloudAuthRequest = read_json(path)?;
            client.authorize_intercloud(&request).await?;
        }
        ("authorize-intracloud", [path]) => {
            let request: IntracloudAuthRequest = read_json(path)?;
            client.authorize_intracloud(&request).await?;
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

/// Reads and decodes a JSON file.
fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
