//! Authorization policy requests.

use serde::{Deserialize, Serialize};

use super::{Cloud, Service, ServiceDescription};

/// Grants a remote cloud access to a list of local services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntercloudAuthRequest {
    /// The cloud being authorized.
    pub cloud: Cloud,
    /// Services the cloud may consume.
    #[serde(default)]
    pub service_list: Vec<ServiceDescription>,
}

/// Grants a consumer access to a service on the given providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntracloudAuthRequest {
    /// The system being authorized.
    pub consumer: Service,
    /// Providers the consumer may call.
    #[serde(default)]
    pub providers: Vec<Service>,
    /// The service covered by the rule.
    pub service: ServiceDescription,
}
