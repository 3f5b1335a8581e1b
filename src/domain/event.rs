//! Publish/subscribe types for the event handler.
//!
//! An [`EventFilter`] registers a consumer for an event type; an [`Event`]
//! is one published occurrence, wrapped in a [`PublishEvent`] together with
//! its source system.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Service;

/// `chrono` format string for event timestamps (`YYYY-MM-DDTHH:MM:SS`).
///
/// Receivers parse this as a zone-less local date-time and drop events that
/// are older than their freshness window (typically 60 seconds).
pub const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Subscription descriptor.
///
/// An empty `sources` list subscribes to the event type from any source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    /// Event type name, e.g. `"temperature-update"`.
    pub event_type: String,
    /// The subscribing system.
    pub consumer: Service,
    /// Systems whose events are wanted (empty = any).
    #[serde(default)]
    pub sources: Vec<Service>,
    /// Callback path on the consumer where notifications are delivered.
    pub notify_uri: String,
    /// Only deliver events whose metadata matches the filter.
    #[serde(default)]
    pub match_metadata: bool,
}

impl EventFilter {
    /// Creates a filter accepting events from any source.
    #[must_use]
    pub fn new(
        event_type: impl Into<String>,
        consumer: Service,
        notify_uri: impl Into<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            consumer,
            sources: Vec::new(),
            notify_uri: notify_uri.into(),
            match_metadata: false,
        }
    }

    /// Restricts the filter to the given sources.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<Service>) -> Self {
        self.sources = sources;
        self
    }

    /// Sets the metadata-match flag.
    #[must_use]
    pub const fn with_match_metadata(mut self, match_metadata: bool) -> Self {
        self.match_metadata = match_metadata;
        self
    }
}

/// A single published occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type name.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Opaque string payload.
    pub payload: String,
    /// Creation time in [`EVENT_TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

impl Event {
    /// Creates an event stamped with the current local time.
    #[must_use]
    pub fn now(event_type: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::at(event_type, payload, Local::now().naive_local())
    }

    /// Creates an event stamped with the given local date-time.
    #[must_use]
    pub fn at(
        event_type: impl Into<String>,
        payload: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            payload: payload.into(),
            timestamp: timestamp.format(EVENT_TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Parses the timestamp back into a local date-time.
    ///
    /// Returns `None` if the event was built with a foreign format.
    #[must_use]
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, EVENT_TIMESTAMP_FORMAT).ok()
    }
}

/// Body of a publish request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishEvent {
    /// The system emitting the event.
    pub source: Service,
    /// The event itself.
    pub event: Event,
    /// Callback notified once delivery to all subscribers completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_complete_uri: Option<String>,
}
