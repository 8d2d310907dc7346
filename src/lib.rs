//! Radix tree URL router.
//!
//! Route patterns made of literal text, `:name` segments and a trailing
//! `*name` catch-all are compiled into compressed prefix trees. Resolving a
//! path walks one branch of the tree and extracts the named variables on the
//! way.
//!
//! ```
//! use radix_router::routing::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert("/user/:id", "user").unwrap();
//! tree.insert("/files/*path", "files").unwrap();
//!
//! let matched = tree.resolve("/files/a/b");
//! assert_eq!(matched.value(), Some(&"files"));
//! assert_eq!(matched.get("path"), Some("a/b"));
//! assert!(!tree.resolve("/user/1/extra").is_match());
//! ```
//!
//! The rest of the crate hosts route tables over HTTP: TOML configuration,
//! hot reload, logging and metrics.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Matched, Method, Router, Tree};
