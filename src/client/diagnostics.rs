//! Wire log: optional echo of request and response bodies.
//!
//! Enabled by [`crate::config::ClientConfig::debug`]. Records are emitted as
//! `tracing` events under the `localcloud::wire` target, so they can be
//! routed or filtered independently of the client's own diagnostics
//! (`RUST_LOG=localcloud::wire=info`). The sink only observes; it never
//! touches the request or the returned result.

use reqwest::StatusCode;

use super::endpoint::Verb;

/// Conditional sink for outgoing and incoming payloads.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WireLog {
    enabled: bool,
}

impl WireLog {
    pub(crate) const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Echoes the outgoing URL and payload.
    pub(crate) fn request(self, verb: Verb, url: &str, payload: Option<&[u8]>) {
        if !self.enabled {
            return;
        }
        let payload = payload.map(String::from_utf8_lossy).unwrap_or_default();
        tracing::info!(
            target: "localcloud::wire",
            %verb,
            url,
            payload = %payload,
            "request"
        );
    }

    /// Echoes the full incoming body.
    pub(crate) fn response(self, url: &str, status: StatusCode, body: &str) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            target: "localcloud::wire",
            url,
            status = status.as_u16(),
            body,
            "response"
        );
    }
}
