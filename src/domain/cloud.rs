//! Remote local cloud descriptor used for inter-cloud authorization.

use serde::{Deserialize, Serialize};

use super::service::is_false;

/// A remote middleware instance, identified by its address and port.
///
/// The gatekeeper URI is the remote cloud's inter-cloud entry point; this
/// crate only forwards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cloud {
    /// Organization operating the cloud.
    pub operator: String,
    /// Cloud name, unique per operator.
    pub cloud_name: String,
    /// Gatekeeper address.
    pub address: String,
    /// Gatekeeper port.
    pub port: u16,
    /// Gatekeeper service path.
    pub gatekeeper_service_uri: String,
    /// Public key or token of the remote cloud.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_info: Option<String>,
    /// Whether the gatekeeper must be reached over a secure channel.
    #[serde(default, skip_serializing_if = "is_false")]
    pub secure: bool,
}

impl Cloud {
    /// Creates an insecure cloud descriptor.
    #[must_use]
    pub fn new(
        operator: impl Into<String>,
        cloud_name: impl Into<String>,
        address: impl Into<String>,
        port: u16,
        gatekeeper_service_uri: impl Into<String>,
    ) -> Self {
        Self {
            operator: operator.into(),
            cloud_name: cloud_name.into(),
            address: address.into(),
            port,
            gatekeeper_service_uri: gatekeeper_service_uri.into(),
            authentication_info: None,
            secure: false,
        }
    }

    /// Marks the cloud as secure and attaches its authentication info.
    #[must_use]
    pub fn with_authentication(mut self, authentication_info: impl Into<String>) -> Self {
        self.authentication_info = Some(authentication_info.into());
        self.secure = true;
        self
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn insecure_cloud_wire_shape() {
        let cloud = Cloud::new("aitia", "testcloud2", "10.0.0.9", 8446, "gatekeeper");
        let json = serde_json::to_value(&cloud).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({
                "operator": "aitia",
                "cloudName": "testcloud2",
                "address": "10.0.0.9",
                "port": 8446,
                "gatekeeperServiceUri": "gatekeeper"
            })
        );
    }

    #[test]
    fn secure_cloud_round_trip() {
        let cloud = Cloud::new("aitia", "testcloud2", "10.0.0.9", 8447, "gatekeeper")
            .with_authentication("MIIBIjANBgkq");
        let Ok(json) = serde_json::to_string(&cloud) else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"secure\":true"));
        let Ok(decoded) = serde_json::from_str::<Cloud>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(cloud, decoded);
    }
}
