//! Mediation client: one method per middleware operation.
//!
//! Every operation follows the same round trip:
//!
//! ```text
//! domain value ──serialize──► JSON bytes ──► Endpoint::url
//!                                               │
//!                                   one HTTP call (verb from catalog)
//!                                               │
//!          transport error ◄── send fails       │
//!        middleware error ◄── non-2xx status ◄──┤
//!                                               ▼
//!                         body discarded, or decoded into a typed result
//! ```
//!
//! There are no retries and no caching. A failed call is reported to the
//! caller and leaves the client usable.

mod diagnostics;
pub mod endpoint;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::domain::{
    Event, EventFilter, IntercloudAuthRequest, IntracloudAuthRequest, OrchestrationForm,
    OrchestrationResponse, PublishEvent, Service, ServiceRegistryEntry, ServiceRequestForm,
};
use crate::error::ClientError;

use self::diagnostics::WireLog;
use self::endpoint::{Endpoint, ServiceGroup};

/// Handle bound to one middleware instance.
///
/// Cheap to clone; clones share the underlying connection pool. Calls may
/// be issued concurrently from several tasks since the handle holds no
/// mutable state.
#[derive(Debug, Clone)]
pub struct MediationClient {
    http: reqwest::Client,
    config: ClientConfig,
    base_url: String,
    wire: WireLog,
}

/// URL and body of a successful exchange.
#[derive(Debug)]
struct Reply {
    url: String,
    body: String,
}

impl MediationClient {
    /// Creates a client for the middleware described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the configuration fails
    /// validation or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        let base_url = config.base_url();
        let wire = WireLog::new(config.debug);
        tracing::debug!(%base_url, debug = config.debug, "mediation client created");
        Ok(Self {
            http,
            config,
            base_url,
            wire,
        })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL of `endpoint` on this client's middleware.
    #[must_use]
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        endpoint.url(&self.base_url)
    }

    /// Registers a service with the service registry.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] if the registry rejects the entry.
    pub async fn register_service(&self, entry: &ServiceRegistryEntry) -> Result<(), ClientError> {
        self.send(endpoint::REGISTER_SERVICE, Some(entry)).await?;
        tracing::info!(
            service = %entry.provided_service.service_definition,
            provider = %entry.provider.system_name,
            version = entry.version,
            "service registered"
        );
        Ok(())
    }

    /// Removes a previously registered service.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] if the registry rejects the request.
    pub async fn remove_service(&self, entry: &ServiceRegistryEntry) -> Result<(), ClientError> {
        self.send(endpoint::REMOVE_SERVICE, Some(entry)).await?;
        tracing::info!(
            service = %entry.provided_service.service_definition,
            provider = %entry.provider.system_name,
            "service removed"
        );
        Ok(())
    }

    /// Deletes every entry in the service registry.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] if the registry refuses.
    pub async fn clear_registry(&self) -> Result<(), ClientError> {
        self.send(endpoint::CLEAR_REGISTRY, None::<&()>).await?;
        tracing::info!("service registry cleared");
        Ok(())
    }

    /// Asks the orchestrator for providers of a service.
    ///
    /// Returns the candidate forms in the order the orchestrator sent them.
    /// A 2xx answer with an empty body (e.g. `204 No Content`) means no
    /// candidates, like an envelope without a `response` field.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete,
    /// [`ClientError::Middleware`] on a non-2xx answer, and
    /// [`ClientError::ResponseFormat`] if the answer is not a valid
    /// orchestration response.
    pub async fn request_orchestration(
        &self,
        request: &ServiceRequestForm,
    ) -> Result<Vec<OrchestrationForm>, ClientError> {
        let reply = self.send(endpoint::ORCHESTRATION, Some(request)).await?;
        let envelope: OrchestrationResponse = if reply.body.trim().is_empty() {
            OrchestrationResponse::default()
        } else {
            decode(reply)?
        };
        tracing::debug!(
            requester = %request.requester_system.system_name,
            candidates = envelope.response.len(),
            "orchestration completed"
        );
        Ok(envelope.response)
    }

    /// Subscribes a consumer to an event type.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] if the event handler rejects the filter.
    pub async fn subscribe(&self, filter: &EventFilter) -> Result<(), ClientError> {
        self.send(endpoint::SUBSCRIBE, Some(filter)).await?;
        tracing::info!(
            event_type = %filter.event_type,
            consumer = %filter.consumer.system_name,
            "subscribed"
        );
        Ok(())
    }

    /// Removes a subscription. The filter must match the one subscribed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] if the event handler rejects the filter.
    pub async fn unsubscribe(&self, filter: &EventFilter) -> Result<(), ClientError> {
        self.send(endpoint::UNSUBSCRIBE, Some(filter)).await?;
        tracing::info!(
            event_type = %filter.event_type,
            consumer = %filter.consumer.system_name,
            "unsubscribed"
        );
        Ok(())
    }

    /// Publishes an event stamped with the current local time.
    ///
    /// Returns the event as sent, including its timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] if the event handler rejects the event.
    pub async fn publish(
        &self,
        source: Service,
        event_type: &str,
        payload: &str,
        delivery_complete_uri: Option<String>,
    ) -> Result<Event, ClientError> {
        let request = PublishEvent {
            source,
            event: Event::now(event_type, payload),
            delivery_complete_uri,
        };
        self.publish_event(&request).await?;
        Ok(request.event)
    }

    /// Publishes a pre-built event as is.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] if the event handler rejects the event.
    pub async fn publish_event(&self, request: &PublishEvent) -> Result<(), ClientError> {
        self.send(endpoint::PUBLISH, Some(request)).await?;
        tracing::debug!(
            event_type = %request.event.event_type,
            source = %request.source.system_name,
            timestamp = %request.event.timestamp,
            "event published"
        );
        Ok(())
    }

    /// Grants a remote cloud access to local services.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] if the rule is rejected.
    pub async fn authorize_intercloud(
        &self,
        request: &IntercloudAuthRequest,
    ) -> Result<(), ClientError> {
        self.send(endpoint::AUTHORIZE_INTERCLOUD, Some(request))
            .await?;
        tracing::info!(
            cloud = %request.cloud.cloud_name,
            operator = %request.cloud.operator,
            services = request.service_list.len(),
            "inter-cloud access granted"
        );
        Ok(())
    }

    /// Grants a consumer access to a service on the listed providers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] if the rule is rejected.
    pub async fn authorize_intracloud(
        &self,
        request: &IntracloudAuthRequest,
    ) -> Result<(), ClientError> {
        self.send(endpoint::AUTHORIZE_INTRACLOUD, Some(request))
            .await?;
        tracing::info!(
            consumer = %request.consumer.system_name,
            service = %request.service.service_definition,
            providers = request.providers.len(),
            "intra-cloud access granted"
        );
        Ok(())
    }

    /// Fetches the liveness banner of a service group.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the call does not complete and
    /// [`ClientError::Middleware`] on a non-2xx answer.
    pub async fn echo(&self, group: ServiceGroup) -> Result<String, ClientError> {
        let reply = self.send(endpoint::echo(group), None::<&()>).await?;
        Ok(reply.body)
    }

    /// Performs one HTTP exchange.
    ///
    /// The body is serialized before anything touches the network and is
    /// only sent for verbs that carry one; the response body is always read
    /// in full so the wire log can echo it.
    async fn send<B>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<Reply, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let payload = body
            .filter(|_| endpoint.verb.has_body())
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ClientError::Encode)?;
        let url = self.url_for(endpoint);
        self.wire.request(endpoint.verb, &url, payload.as_deref());

        let mut request = self.http.request(endpoint.verb.method(), &url);
        if let Some(payload) = payload {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .header(CONTENT_LENGTH, payload.len())
                .body(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|source| call_failure(&url, source))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| call_failure(&url, source))?;
        self.wire.response(&url, status, &body);

        if !status.is_success() {
            tracing::warn!(
                verb = %endpoint.verb,
                %url,
                status = status.as_u16(),
                "middleware rejected request"
            );
            return Err(ClientError::Middleware { url, status, body });
        }

        tracing::debug!(
            verb = %endpoint.verb,
            %url,
            status = status.as_u16(),
            "middleware call completed"
        );
        Ok(Reply { url, body })
    }
}

/// Classifies a reqwest failure. Builder errors mean the request was never
/// sent, so they are reported as local configuration errors.
fn call_failure(url: &str, source: reqwest::Error) -> ClientError {
    if source.is_builder() {
        tracing::debug!(%url, error = %source, "request could not be built");
        return ClientError::InvalidConfig(format!("cannot build request for {url}: {source}"));
    }
    tracing::debug!(%url, error = %source, "transport failure");
    ClientError::Transport {
        url: url.to_string(),
        source,
    }
}

fn decode<T: DeserializeOwned>(reply: Reply) -> Result<T, ClientError> {
    serde_json::from_str(&reply.body).map_err(|source| ClientError::ResponseFormat {
        url: reply.url,
        body: reply.body,
        source,
    })
}
