//! Compiled route table.
//!
//! Turns the `[[routes]]` section into a [`Router`] of [`RouteTarget`]s.
//! A table is immutable; reloads build a fresh one and swap it in.

use std::collections::HashSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::http::handler::RouteTarget;
use crate::routing::{RouteError, Router};

/// A route table shared with request handlers and the config watcher.
pub type SharedTable = Arc<ArcSwap<RouteTable>>;

/// A route from the config that could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route `{name}`: {source}")]
pub struct TableError {
    pub name: String,
    pub source: RouteError,
}

/// Routes compiled into per-method trees.
#[derive(Debug)]
pub struct RouteTable {
    router: Router<RouteTarget>,
}

impl RouteTable {
    /// Build the table, collecting every route that fails to register.
    pub fn from_config(config: &ServerConfig) -> Result<Self, Vec<TableError>> {
        let mut router = if config.router.parameters {
            Router::new()
        } else {
            Router::literal_only()
        };
        let mut seen = HashSet::new();
        let mut errors = Vec::new();

        for route in &config.routes {
            if !seen.insert((route.method, route.pattern.as_str())) {
                tracing::warn!(
                    route = %route.name,
                    method = %route.method,
                    pattern = %route.pattern,
                    "Duplicate route pattern, last definition wins"
                );
            }
            if let Err(source) = router.insert(route.method, &route.pattern, RouteTarget::from(route)) {
                errors.push(TableError {
                    name: route.name.clone(),
                    source,
                });
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        tracing::debug!(routes = router.route_count(), "Route table compiled");
        Ok(Self { router })
    }

    pub fn router(&self) -> &Router<RouteTarget> {
        &self.router
    }

    pub fn route_count(&self) -> usize {
        self.router.route_count()
    }

    /// Wrap the table for sharing between the server and the watcher.
    pub fn into_shared(self) -> SharedTable {
        Arc::new(ArcSwap::from_pointee(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::routing::{InsertError, Method};

    fn route(name: &str, method: Method, pattern: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            method,
            pattern: pattern.into(),
            wants: Vec::new(),
            status: 200,
            body: None,
        }
    }

    #[test]
    fn test_build_table() {
        let mut config = ServerConfig::default();
        config.routes.push(route("show", Method::Get, "/user/:id"));
        config.routes.push(route("update", Method::Put, "/user/:id"));

        let table = RouteTable::from_config(&config).unwrap();
        assert_eq!(table.route_count(), 2);
        let matched = table.router().resolve(Method::Put, "/user/3");
        assert_eq!(matched.value().map(|t| t.name.as_str()), Some("update"));
    }

    #[test]
    fn test_duplicate_pattern_keeps_last() {
        let mut config = ServerConfig::default();
        config.routes.push(route("first", Method::Get, "/a"));
        config.routes.push(route("second", Method::Get, "/a"));

        let table = RouteTable::from_config(&config).unwrap();
        assert_eq!(table.route_count(), 1);
        let matched = table.router().resolve(Method::Get, "/a");
        assert_eq!(matched.value().map(|t| t.name.as_str()), Some("second"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.routes.push(route("ok", Method::Get, "/user/:id"));
        config.routes.push(route("conflict", Method::Get, "/user/new"));
        config.routes.push(route("broken", Method::Get, "/files/*path/x"));

        let errors = RouteTable::from_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].name, "conflict");
        assert!(matches!(errors[0].source.source, InsertError::ConflictingRoute { .. }));
        assert_eq!(errors[1].name, "broken");
    }

    #[test]
    fn test_literal_only_table() {
        let mut config = ServerConfig::default();
        config.router.parameters = false;
        config.routes.push(route("raw", Method::Get, "/a/:b"));

        let table = RouteTable::from_config(&config).unwrap();
        assert!(table.router().resolve(Method::Get, "/a/:b").is_match());
        assert!(!table.router().resolve(Method::Get, "/a/x").is_match());
    }
}
