//! Route targets and the inputs handed to them.
//!
//! # Responsibilities
//! - Declare, per route, which request pieces a handler receives
//! - Build the handler input from a match, the query string and the body
//!
//! # Design Decisions
//! - Capabilities are fixed when the route is registered; the request path
//!   only assembles what was declared
//! - The body is read only for routes that ask for it

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::RouteConfig;

/// A request piece a handler can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Variables extracted from the path.
    Params,
    /// Decoded query string.
    Query,
    /// Request body as text.
    Body,
}

/// The set of pieces a route wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    params: bool,
    query: bool,
    body: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        params: false,
        query: false,
        body: false,
    };

    pub fn wants(&self, capability: Capability) -> bool {
        match capability {
            Capability::Params => self.params,
            Capability::Query => self.query,
            Capability::Body => self.body,
        }
    }

    pub fn with(mut self, capability: Capability) -> Self {
        match capability {
            Capability::Params => self.params = true,
            Capability::Query => self.query = true,
            Capability::Body => self.body = true,
        }
        self
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Capabilities::NONE, Capabilities::with)
    }
}

/// The value stored in the routing trees for each registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    pub name: String,
    pub capabilities: Capabilities,
    pub status: u16,
    /// Fixed response body. Without one the handler echoes its input.
    pub body: Option<String>,
}

impl From<&RouteConfig> for RouteTarget {
    fn from(route: &RouteConfig) -> Self {
        Self {
            name: route.name.clone(),
            capabilities: route.wants.iter().copied().collect(),
            status: route.status,
            body: route.body.clone(),
        }
    }
}

/// A captured path variable, owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParam {
    pub name: String,
    pub value: String,
}

/// What a handler receives. Pieces the route did not declare stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerInput {
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<PathParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl HandlerInput {
    /// Assemble the input for `target` from the request pieces.
    ///
    /// `query` and `body` are only consulted when the target wants them.
    pub fn build(
        target: &RouteTarget,
        params: Vec<(String, String)>,
        query: impl FnOnce() -> BTreeMap<String, String>,
        body: Option<String>,
    ) -> Self {
        let caps = target.capabilities;
        Self {
            route: target.name.clone(),
            params: caps.wants(Capability::Params).then(|| {
                params
                    .into_iter()
                    .map(|(name, value)| PathParam { name, value })
                    .collect()
            }),
            query: caps.wants(Capability::Query).then(query),
            body: if caps.wants(Capability::Body) { body } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(wants: &[Capability]) -> RouteTarget {
        RouteTarget {
            name: "user".into(),
            capabilities: wants.iter().copied().collect(),
            status: 200,
            body: None,
        }
    }

    #[test]
    fn test_capabilities_from_list() {
        let caps: Capabilities = [Capability::Params, Capability::Body].into_iter().collect();
        assert!(caps.wants(Capability::Params));
        assert!(!caps.wants(Capability::Query));
        assert!(caps.wants(Capability::Body));
        assert_eq!(Capabilities::default(), Capabilities::NONE);
    }

    #[test]
    fn test_build_only_declared_pieces() {
        let params = vec![("id".to_string(), "7".to_string())];
        let input = HandlerInput::build(
            &target(&[Capability::Params]),
            params,
            || panic!("query not requested"),
            Some("ignored".into()),
        );
        assert_eq!(input.route, "user");
        assert_eq!(
            input.params,
            Some(vec![PathParam { name: "id".into(), value: "7".into() }])
        );
        assert_eq!(input.query, None);
        assert_eq!(input.body, None);
    }

    #[test]
    fn test_build_query_and_body() {
        let input = HandlerInput::build(
            &target(&[Capability::Query, Capability::Body]),
            Vec::new(),
            || BTreeMap::from([("page".to_string(), "2".to_string())]),
            Some("hello".into()),
        );
        assert_eq!(input.params, None);
        assert_eq!(input.query.unwrap()["page"], "2");
        assert_eq!(input.body.as_deref(), Some("hello"));
    }

    #[test]
    fn test_serialized_shape() {
        let input = HandlerInput {
            route: "r".into(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&input).unwrap(), serde_json::json!({ "route": "r" }));
    }
}
