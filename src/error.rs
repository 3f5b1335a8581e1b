//! Client error types.
//!
//! [`ClientError`] is the single error type returned by every
//! [`crate::client::MediationClient`] operation. The variants separate
//! failures that happened before any network activity, failures of the
//! network itself, and answers the middleware gave that the caller cannot
//! use.
//!
//! | Variant          | Raised when                                   | Network I/O |
//! |------------------|-----------------------------------------------|-------------|
//! | `InvalidConfig`  | the client or a request cannot be constructed | none        |
//! | `Encode`         | the request body cannot be serialized          | none        |
//! | `Transport`      | the HTTP exchange does not complete           | partial     |
//! | `Middleware`     | the middleware answers with a non-2xx status  | complete    |
//! | `ResponseFormat` | a typed answer does not decode                 | complete    |

use reqwest::StatusCode;

/// Errors returned by the mediation client.
///
/// No variant is fatal to the client: a failed call leaves the handle
/// usable for subsequent calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configuration was rejected while building the client, or a
    /// request URL could not be built from it.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The outgoing request could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The HTTP call could not be completed (connect, timeout, TLS, body read).
    #[error("transport error calling {url}: {source}")]
    Transport {
        /// Endpoint that was being called.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The middleware answered with a non-success status.
    #[error("middleware returned {status} for {url}")]
    Middleware {
        /// Endpoint that was called.
        url: String,
        /// HTTP status returned.
        status: StatusCode,
        /// Raw response body, usually a JSON error description.
        body: String,
    },

    /// The response body did not decode into the expected type.
    #[error("malformed response from {url}: {source}")]
    ResponseFormat {
        /// Endpoint that was called.
        url: String,
        /// Raw response body.
        body: String,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Returns the HTTP status for [`ClientError::Middleware`] errors.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Middleware { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the call failed because its deadline expired.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }

    /// Returns `true` if the request was never sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::Encode(_))
    }
}
