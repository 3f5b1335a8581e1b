//! # localcloud-client
//!
//! Typed client for a local cloud middleware: service registry,
//! orchestrator, event handler and authorization APIs over HTTP/JSON.
//!
//! The crate is a mediation layer. Callers hand in domain values, the
//! client serializes them, calls the right endpoint with the right verb,
//! and reports the outcome as a typed result or a [`ClientError`]. It keeps
//! no state between calls besides its configuration, and never retries.
//!
//! ## Architecture
//!
//! ```text
//! Caller
//!     │
//!     ├── MediationClient (client/)
//!     │       ├── Endpoint catalog (client/endpoint.rs)
//!     │       └── WireLog debug echo (client/diagnostics.rs)
//!     │
//!     ├── Domain values (domain/)
//!     │
//!     └── reqwest ──► http(s)://address:port/<service-group>/<subpath>
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use localcloud_client::{ClientConfig, MediationClient};
//! use localcloud_client::domain::{Service, ServiceDescription, ServiceRegistryEntry};
//!
//! # async fn run() -> Result<(), localcloud_client::ClientError> {
//! let client = MediationClient::new(ClientConfig::new("172.18.0.3", 8440))?;
//! let entry = ServiceRegistryEntry::new(
//!     ServiceDescription::new("Thermometer").with_metadata("unit", "celsius"),
//!     Service::new("RPI3-Garden2", "10.0.0.5", 8080),
//!     "/temperature",
//! )
//! .with_ttl(3600);
//! client.register_service(&entry).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;

pub use client::MediationClient;
pub use client::endpoint::ServiceGroup;
pub use config::ClientConfig;
pub use error::ClientError;
