//! Service identity, service descriptions, and registry entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named endpoint exposed by one system (e.g. `RPI3-Garden2`).
///
/// `address` and `port` locate the system's API. The authentication token
/// is only present when the system requires security.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// System name as known to the middleware.
    pub system_name: String,
    /// Network address (IP or hostname).
    pub address: String,
    /// TCP/UDP port of the system's API.
    pub port: u16,
    /// Public key or token used by secure systems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_info: Option<String>,
    /// Whether the system is only reachable over a secure channel.
    #[serde(default, skip_serializing_if = "is_false")]
    pub secure: bool,
}

impl Service {
    /// Creates an insecure service with no authentication info.
    #[must_use]
    pub fn new(system_name: impl Into<String>, address: impl Into<String>, port: u16) -> Self {
        Self {
            system_name: system_name.into(),
            address: address.into(),
            port,
            authentication_info: None,
            secure: false,
        }
    }

    /// Marks the service as secure and attaches its authentication info.
    #[must_use]
    pub fn with_authentication(mut self, authentication_info: impl Into<String>) -> Self {
        self.authentication_info = Some(authentication_info.into());
        self.secure = true;
        self
    }
}

/// The abstract capability a [`Service`] provides.
///
/// `service_metadata` is always sent, even when empty; the middleware
/// distinguishes a missing map from an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescription {
    /// Definition name, e.g. `"Thermometer"`.
    pub service_definition: String,
    /// Supported interface identifiers, e.g. `"REST-JSON"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    /// Key/value pairs further qualifying the service (`unit=celsius`).
    #[serde(default)]
    pub service_metadata: BTreeMap<String, String>,
}

impl ServiceDescription {
    /// Creates a description with no interfaces and empty metadata.
    #[must_use]
    pub fn new(service_definition: impl Into<String>) -> Self {
        Self {
            service_definition: service_definition.into(),
            interfaces: Vec::new(),
            service_metadata: BTreeMap::new(),
        }
    }

    /// Adds a supported interface.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds (or replaces) a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.service_metadata.insert(key.into(), value.into());
        self
    }
}

/// Registration record binding a [`ServiceDescription`] to its provider.
///
/// `version` must increase when the same (description, provider) pair is
/// registered again. A `ttl` of zero means the entry never expires and is
/// left off the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRegistryEntry {
    /// The capability being registered.
    pub provided_service: ServiceDescription,
    /// The system providing it.
    pub provider: Service,
    /// Path of the service on the provider, e.g. `"/temperature"`.
    pub service_uri: String,
    /// Registration version.
    pub version: u32,
    /// `true` for UDP, `false` for TCP.
    pub udp: bool,
    /// Time to live in seconds (0 = no expiry).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

impl ServiceRegistryEntry {
    /// Creates a TCP entry with version 1 and no expiry.
    #[must_use]
    pub fn new(
        provided_service: ServiceDescription,
        provider: Service,
        service_uri: impl Into<String>,
    ) -> Self {
        Self {
            provided_service,
            provider,
            service_uri: service_uri.into(),
            version: 1,
            udp: false,
            ttl: 0,
        }
    }

    /// Sets the registration version.
    #[must_use]
    pub const fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Sets the transport flag.
    #[must_use]
    pub const fn with_udp(mut self, udp: bool) -> Self {
        self.udp = udp;
        self
    }

    /// Sets the time to live in seconds.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) const fn is_false(value: &bool) -> bool {
    !*value
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &u32) -> bool {
    *value == 0
}
