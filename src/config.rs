//! Client configuration.
//!
//! A [`ClientConfig`] is built once and handed to
//! [`crate::client::MediationClient::new`]. The client never reads the
//! environment on its own; [`ClientConfig::from_env`] exists for binaries
//! that want 12-factor style settings (optionally via a `.env` file).

use std::net::Ipv6Addr;
use std::time::Duration;

use reqwest::Url;

use crate::error::ClientError;

/// Default middleware address.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1";

/// Default middleware port.
pub const DEFAULT_PORT: u16 = 8440;

/// Default per-call deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Address, port and behavior of one middleware target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Middleware host (IP address or DNS name).
    pub address: String,

    /// Middleware port (1–65535).
    pub port: u16,

    /// Use `https` instead of `http`.
    pub secure: bool,

    /// Echo request URLs, payloads and response bodies to the wire log.
    pub debug: bool,

    /// Upper bound on one call, including reading the response body.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a plain-HTTP configuration with debug off and the default
    /// timeout.
    #[must_use]
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            secure: false,
            debug: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Enables or disables the wire log.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Selects `https` (`true`) or `http` (`false`).
    #[must_use]
    pub const fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets the per-call deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL scheme implied by [`ClientConfig::secure`].
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        if self.secure { "https" } else { "http" }
    }

    /// `scheme://address:port`, without a trailing slash.
    ///
    /// IPv6 literals are bracketed (`http://[::1]:8440`).
    #[must_use]
    pub fn base_url(&self) -> String {
        let address = self.address.trim();
        if address.parse::<Ipv6Addr>().is_ok() {
            format!("{}://[{}]:{}", self.scheme(), address, self.port)
        } else {
            format!("{}://{}:{}", self.scheme(), address, self.port)
        }
    }

    /// Checks the invariants the client relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the address is empty or
    /// not a valid host, the port is zero, or the timeout is zero.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.address.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "address must not be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(ClientError::InvalidConfig(
                "port must be in 1..=65535".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "timeout must be non-zero".to_string(),
            ));
        }
        let base_url = self.base_url();
        match Url::parse(&base_url) {
            Ok(url) if url.host().is_some() => Ok(()),
            Ok(_) => Err(ClientError::InvalidConfig(format!(
                "{base_url} has no host"
            ))),
            Err(e) => Err(ClientError::InvalidConfig(format!(
                "address {:?} is not a valid host: {e}",
                self.address
            ))),
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// Reads `LOCALCLOUD_ADDRESS`, `LOCALCLOUD_PORT`, `LOCALCLOUD_SECURE`,
    /// `LOCALCLOUD_DEBUG` and `LOCALCLOUD_TIMEOUT_SECS`, falling back to
    /// defaults for anything unset. Calls `dotenvy::dotenv().ok()` first to
    /// optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if `LOCALCLOUD_PORT` is set
    /// but is not a valid port, or if the result fails
    /// [`ClientConfig::validate`].
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let address =
            std::env::var("LOCALCLOUD_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_string());

        let port = match std::env::var("LOCALCLOUD_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ClientError::InvalidConfig(format!("LOCALCLOUD_PORT={raw:?}: {e}"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let config = Self {
            address,
            port,
            secure: parse_env_bool("LOCALCLOUD_SECURE", false),
            debug: parse_env_bool("LOCALCLOUD_DEBUG", false),
            timeout: Duration::from_secs(parse_env(
                "LOCALCLOUD_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS, DEFAULT_PORT)
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean.
fn parse_env_bool(key: &str, default: bool) -> bool {
    parse_bool(std::env::var(key).ok().as_deref(), default)
}

/// Accepts `"true"`, `"1"`, `"false"`, `"0"` (case-insensitive).
fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value.map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_follows_secure_flag() {
        let config = ClientConfig::new("172.18.0.3", 8440);
        assert_eq!(config.base_url(), "http://172.18.0.3:8440");
        assert_eq!(
            config.with_secure(true).base_url(),
            "https://172.18.0.3:8440"
        );
    }

    #[test]
    fn ipv6_address_is_bracketed() {
        let config = ClientConfig::new("::1", 8440);
        assert_eq!(config.base_url(), "http://[::1]:8440");
        assert!(config.validate().is_ok());
        assert_eq!(
            ClientConfig::new("fe80::1", 8441)
                .with_secure(true)
                .base_url(),
            "https://[fe80::1]:8441"
        );
    }

    #[test]
    fn hostnames_and_ipv4_pass_validation() {
        assert!(ClientConfig::new("cloud.local", 8440).validate().is_ok());
        assert!(ClientConfig::new("172.18.0.3", 8440).validate().is_ok());
    }

    #[test]
    fn unparseable_host_is_rejected() {
        let result = ClientConfig::new("not a host", 8440).validate();
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.debug);
        assert!(!config.secure);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        let result = ClientConfig::new("localhost", 0).validate();
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn blank_address_is_rejected() {
        let result = ClientConfig::new("  ", 8440).validate();
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = ClientConfig::new("localhost", 8440)
            .with_timeout(Duration::ZERO)
            .validate();
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool(Some("TRUE"), false));
        assert!(parse_bool(Some("1"), false));
        assert!(!parse_bool(Some("False"), true));
        assert!(!parse_bool(Some("0"), true));
        assert!(parse_bool(Some("yes"), true));
        assert!(!parse_bool(None, false));
    }
}
