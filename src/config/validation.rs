//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, status codes, addresses)
//! - Detect invalid and conflicting route patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::table::{RouteTable, TableError};

/// A semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route name `{0}` is used more than once")]
    DuplicateRouteName(String),

    #[error("route `{name}` has invalid status code {status}")]
    InvalidStatus { name: String, status: u16 },

    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("invalid metrics address `{0}`")]
    InvalidMetricsAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error(transparent)]
    Route(#[from] TableError),
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut names = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
        if !(100..=599).contains(&route.status) {
            errors.push(ValidationError::InvalidStatus {
                name: route.name.clone(),
                status: route.status,
            });
        }
    }

    if let Err(route_errors) = RouteTable::from_config(config) {
        errors.extend(route_errors.into_iter().map(ValidationError::from));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::routing::Method;

    fn route(name: &str, pattern: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            method: Method::Get,
            pattern: pattern.into(),
            wants: Vec::new(),
            status: 200,
            body: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_problem() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.routes.push(route("", "/a"));
        config.routes.push(route("dup", "/b"));
        config.routes.push(route("dup", "/c"));
        let mut teapot = route("teapot", "/d");
        teapot.status = 1000;
        config.routes.push(teapot);
        config.routes.push(route("bad", "/e/:"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&ValidationError::InvalidBindAddress("not-an-address".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::EmptyRouteName { index: 0 }));
        assert!(errors.contains(&ValidationError::DuplicateRouteName("dup".into())));
        assert!(errors.contains(&ValidationError::InvalidStatus { name: "teapot".into(), status: 1000 }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::Route(err) if err.name == "bad")));
    }
}
