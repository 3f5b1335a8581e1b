//! Endpoint catalog: which verb and path each operation uses.
//!
//! Every middleware call is described by an [`Endpoint`] constant. Adding a
//! new middleware endpoint means adding one constant here and one thin
//! method on [`super::MediationClient`].

use std::fmt;
use std::str::FromStr;

use reqwest::Method;

/// Middleware sub-API addressed by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceGroup {
    /// Service registration and removal.
    ServiceRegistry,
    /// Service discovery.
    Orchestrator,
    /// Publish/subscribe eventing.
    EventHandler,
    /// Access policy management.
    Authorization,
}

impl ServiceGroup {
    /// All service groups, in catalog order.
    pub const ALL: [Self; 4] = [
        Self::ServiceRegistry,
        Self::Orchestrator,
        Self::EventHandler,
        Self::Authorization,
    ];

    /// First path segment of the group's endpoints.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServiceRegistry => "serviceregistry",
            Self::Orchestrator => "orchestrator",
            Self::EventHandler => "eventhandler",
            Self::Authorization => "authorization",
        }
    }
}

impl fmt::Display for ServiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown service group: {s}"))
    }
}

/// HTTP verb of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Verb {
    /// The matching [`reqwest::Method`].
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }

    /// Whether requests with this verb carry a JSON body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// One middleware action: verb, service group and sub-path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// HTTP verb.
    pub verb: Verb,
    /// Target sub-API.
    pub group: ServiceGroup,
    /// Path below the group, without leading slash. Empty for the group root.
    pub subpath: &'static str,
}

impl Endpoint {
    /// Creates an endpoint description.
    #[must_use]
    pub const fn new(verb: Verb, group: ServiceGroup, subpath: &'static str) -> Self {
        Self {
            verb,
            group,
            subpath,
        }
    }

    /// `<group>/<subpath>`, or just `<group>` for the group root.
    #[must_use]
    pub fn path(&self) -> String {
        if self.subpath.is_empty() {
            self.group.as_str().to_string()
        } else {
            format!("{}/{}", self.group, self.subpath)
        }
    }

    /// Full URL below `base_url` (`scheme://address:port`).
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// `POST serviceregistry/register`
pub const REGISTER_SERVICE: Endpoint =
    Endpoint::new(Verb::Post, ServiceGroup::ServiceRegistry, "register");

/// `PUT serviceregistry/remove`
pub const REMOVE_SERVICE: Endpoint =
    Endpoint::new(Verb::Put, ServiceGroup::ServiceRegistry, "remove");

/// `DELETE serviceregistry/mgmt/all`
pub const CLEAR_REGISTRY: Endpoint =
    Endpoint::new(Verb::Delete, ServiceGroup::ServiceRegistry, "mgmt/all");

/// `POST orchestrator/orchestration`
pub const ORCHESTRATION: Endpoint =
    Endpoint::new(Verb::Post, ServiceGroup::Orchestrator, "orchestration");

/// `POST eventhandler/subscription`
pub const SUBSCRIBE: Endpoint =
    Endpoint::new(Verb::Post, ServiceGroup::EventHandler, "subscription");

/// `PUT eventhandler/subscription`
pub const UNSUBSCRIBE: Endpoint =
    Endpoint::new(Verb::Put, ServiceGroup::EventHandler, "subscription");

/// `POST eventhandler/publish`
pub const PUBLISH: Endpoint = Endpoint::new(Verb::Post, ServiceGroup::EventHandler, "publish");

/// `POST authorization/mgmt/intercloud`
pub const AUTHORIZE_INTERCLOUD: Endpoint =
    Endpoint::new(Verb::Post, ServiceGroup::Authorization, "mgmt/intercloud");

/// `POST authorization/mgmt/intracloud`
pub const AUTHORIZE_INTRACLOUD: Endpoint =
    Endpoint::new(Verb::Post, ServiceGroup::Authorization, "mgmt/intracloud");

/// `GET <group>` liveness banner.
#[must_use]
pub const fn echo(group: ServiceGroup) -> Endpoint {
    Endpoint::new(Verb::Get, group, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://172.18.0.3:8440";

    #[test]
    fn operation_table() {
        let table = [
            (REGISTER_SERVICE, "POST", "serviceregistry/register"),
            (REMOVE_SERVICE, "PUT", "serviceregistry/remove"),
            (CLEAR_REGISTRY, "DELETE", "serviceregistry/mgmt/all"),
            (ORCHESTRATION, "POST", "orchestrator/orchestration"),
            (SUBSCRIBE, "POST", "eventhandler/subscription"),
            (UNSUBSCRIBE, "PUT", "eventhandler/subscription"),
            (PUBLISH, "POST", "eventhandler/publish"),
            (AUTHORIZE_INTERCLOUD, "POST", "authorization/mgmt/intercloud"),
            (AUTHORIZE_INTRACLOUD, "POST", "authorization/mgmt/intracloud"),
        ];
        for (endpoint, verb, path) in table {
            assert_eq!(endpoint.verb.to_string(), verb);
            assert_eq!(endpoint.verb.method().as_str(), verb);
            assert_eq!(endpoint.path(), path);
        }
    }

    #[test]
    fn url_composition() {
        assert_eq!(
            REGISTER_SERVICE.url(BASE),
            "http://172.18.0.3:8440/serviceregistry/register"
        );
        assert_eq!(
            CLEAR_REGISTRY.url("https://cloud.local:8441/"),
            "https://cloud.local:8441/serviceregistry/mgmt/all"
        );
    }

    #[test]
    fn echo_targets_group_root() {
        let endpoint = echo(ServiceGroup::Orchestrator);
        assert_eq!(endpoint.verb, Verb::Get);
        assert_eq!(endpoint.url(BASE), "http://172.18.0.3:8440/orchestrator");
    }

    #[test]
    fn only_post_and_put_carry_bodies() {
        assert!(Verb::Post.has_body());
        assert!(Verb::Put.has_body());
        assert!(!Verb::Delete.has_body());
        assert!(!Verb::Get.has_body());
    }

    #[test]
    fn service_group_parses_case_insensitively() {
        assert_eq!(
            "EventHandler".parse::<ServiceGroup>(),
            Ok(ServiceGroup::EventHandler)
        );
        assert!("gatekeeper".parse::<ServiceGroup>().is_err());
        for group in ServiceGroup::ALL {
            assert_eq!(group.as_str().parse::<ServiceGroup>(), Ok(group));
        }
    }
}
