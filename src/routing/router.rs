//! Per-method route lookup.
//!
//! # Responsibilities
//! - Keep one tree per HTTP method
//! - Register routes with method context on errors
//! - Report which methods accept a path (for 405 responses)
//!
//! # Design Decisions
//! - Trees are a fixed array indexed by method, no hashing
//! - Immutable after construction (shared across requests without locks)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routing::matched::Matched;
use crate::routing::tree::{InsertError, Tree};

/// Number of methods a [`Router`] dispatches on.
pub const METHOD_COUNT: usize = 9;

/// HTTP request methods understood by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Method {
    pub const ALL: [Method; METHOD_COUNT] = [
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Connect,
        Method::Options,
        Method::Trace,
        Method::Patch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Method name not in [`Method::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown HTTP method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl TryFrom<String> for Method {
    type Error = UnknownMethod;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route that could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot register {method} {pattern}: {source}")]
pub struct RouteError {
    pub method: Method,
    pub pattern: String,
    pub source: InsertError,
}

/// Method-aware router built from one [`Tree`] per method.
#[derive(Debug, Clone)]
pub struct Router<V> {
    trees: [Tree<V>; METHOD_COUNT],
}

impl<V> Router<V> {
    pub fn new() -> Self {
        Self {
            trees: std::array::from_fn(|_| Tree::new()),
        }
    }

    /// A router whose trees ignore `:`/`*` markers.
    pub fn literal_only() -> Self {
        Self {
            trees: std::array::from_fn(|_| Tree::literal_only()),
        }
    }

    pub fn insert(&mut self, method: Method, pattern: &str, value: V) -> Result<(), RouteError> {
        self.trees[method.index()]
            .insert(pattern, value)
            .map_err(|source| RouteError {
                method,
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn resolve<'a>(&'a self, method: Method, path: &'a str) -> Matched<'a, V> {
        self.trees[method.index()].resolve(path)
    }

    /// Methods with a route for `path`, in [`Method::ALL`] order.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| self.trees[m.index()].resolve(path).is_match())
            .collect()
    }

    pub fn tree(&self, method: Method) -> &Tree<V> {
        &self.trees[method.index()]
    }

    pub fn route_count(&self) -> usize {
        self.trees.iter().map(Tree::len).sum()
    }
}

impl<V> Default for Router<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::grammar::PatternError;

    #[test]
    fn test_method_parsing() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("PATCH".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!("BREW".parse::<Method>(), Err(UnknownMethod("BREW".into())));
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_methods_are_isolated() {
        let mut router = Router::new();
        router.insert(Method::Get, "/user/:id", "show").unwrap();
        router.insert(Method::Delete, "/user/:id", "remove").unwrap();

        let matched = router.resolve(Method::Get, "/user/1");
        assert_eq!(matched.value(), Some(&"show"));
        assert_eq!(matched.get("id"), Some("1"));
        assert_eq!(router.resolve(Method::Delete, "/user/1").value(), Some(&"remove"));
        assert!(!router.resolve(Method::Post, "/user/1").is_match());
        assert_eq!(router.route_count(), 2);
    }

    #[test]
    fn test_allowed_methods() {
        let mut router = Router::new();
        router.insert(Method::Put, "/item", ()).unwrap();
        router.insert(Method::Get, "/item", ()).unwrap();

        assert_eq!(router.allowed_methods("/item"), vec![Method::Get, Method::Put]);
        assert!(router.allowed_methods("/other").is_empty());
    }

    #[test]
    fn test_error_context() {
        let mut router = Router::new();
        let err = router.insert(Method::Post, "/a/:", ()).unwrap_err();
        assert_eq!(err.method, Method::Post);
        assert_eq!(err.pattern, "/a/:");
        assert_eq!(err.source, InsertError::Pattern(PatternError::EmptyVariable));
        assert_eq!(err.to_string(), "cannot register POST /a/:: variable marker has no name");
    }

    #[test]
    fn test_method_serde() {
        let method: Method = serde_json::from_str("\"post\"").unwrap();
        assert_eq!(method, Method::Post);
        assert_eq!(serde_json::to_string(&Method::Options).unwrap(), "\"OPTIONS\"");
    }
}
