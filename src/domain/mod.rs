//! Domain layer: value types exchanged with the middleware.
//!
//! Every type here is plain data with a fixed camelCase JSON shape. Empty
//! optional fields are left off the wire rather than sent as `null`, and
//! unknown fields in responses are ignored.

pub mod authorization;
pub mod cloud;
pub mod event;
pub mod orchestration;
pub mod service;

pub use authorization::{IntercloudAuthRequest, IntracloudAuthRequest};
pub use cloud::Cloud;
pub use event::{EVENT_TIMESTAMP_FORMAT, Event, EventFilter, PublishEvent};
pub use orchestration::{
    OrchestrationFlags, OrchestrationForm, OrchestrationResponse, PreferredProvider,
    ServiceRequestForm,
};
pub use service::{Service, ServiceDescription, ServiceRegistryEntry};
