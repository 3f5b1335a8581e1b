//! Service discovery (orchestration) request and response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Cloud, Service, ServiceDescription};

/// Behavioral switches for a discovery request.
///
/// The seven flags are independent; every flag is always sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestrationFlags {
    /// Ignore the orchestrator's stored rules and compute a fresh result.
    pub override_store: bool,
    /// The request originates from another cloud.
    pub external_service_request: bool,
    /// Allow providers from other clouds when none are found locally.
    pub enable_inter_cloud: bool,
    /// Return a single best match instead of every candidate.
    pub matchmaking: bool,
    /// Filter providers by the requested service metadata.
    pub metadata_search: bool,
    /// Go straight to inter-cloud discovery.
    pub trigger_inter_cloud: bool,
    /// Ping candidate providers and drop unreachable ones.
    pub ping_providers: bool,
}

/// A provider the requester would like to be matched with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferredProvider {
    /// Preferred providing system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_system: Option<Service>,
    /// Preferred providing cloud.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_cloud: Option<Cloud>,
}

/// Body of an orchestration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestForm {
    /// The system asking for a provider.
    pub requester_system: Service,
    /// Set when the request is forwarded from another cloud.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_cloud: Option<Cloud>,
    /// The wanted capability. Absent means "use the stored rules".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_service: Option<ServiceDescription>,
    /// Discovery switches.
    #[serde(default)]
    pub orchestration_flags: OrchestrationFlags,
    /// Providers to try first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_providers: Vec<PreferredProvider>,
    /// Requested quality-of-service parameters.
    #[serde(
        default,
        rename = "requestedQoS",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub requested_qos: BTreeMap<String, String>,
    /// Free-form commands forwarded to the orchestrator.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, String>,
}

impl ServiceRequestForm {
    /// Creates a request for `requested_service` on behalf of `requester`.
    #[must_use]
    pub fn new(
        requester: Service,
        requested_service: ServiceDescription,
        flags: OrchestrationFlags,
    ) -> Self {
        Self {
            requester_system: requester,
            requester_cloud: None,
            requested_service: Some(requested_service),
            orchestration_flags: flags,
            preferred_providers: Vec::new(),
            requested_qos: BTreeMap::new(),
            commands: BTreeMap::new(),
        }
    }

    /// Appends a preferred provider.
    #[must_use]
    pub fn with_preferred_provider(mut self, provider: PreferredProvider) -> Self {
        self.preferred_providers.push(provider);
        self
    }
}

/// One candidate returned by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationForm {
    /// The resolved capability.
    pub service: ServiceDescription,
    /// The resolved provider.
    pub provider: Service,
    /// Path of the service on the provider.
    #[serde(rename = "serviceURI", alias = "serviceUri", default)]
    pub service_uri: String,
    /// Usage instruction from the orchestrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Token the consumer presents to a secure provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_token: Option<String>,
    /// Signature over the authorization token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Non-fatal remarks (e.g. `"TTL_EXPIRING"`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Envelope wrapping the orchestrator's candidates.
///
/// A missing `response` field decodes as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationResponse {
    /// Candidates in the orchestrator's preference order.
    #[serde(default)]
    pub response: Vec<OrchestrationForm>,
}
