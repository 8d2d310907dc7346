//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, trial route registration)
//!     → table.rs (compile routes into per-method trees)
//!     → RouteTable (immutable) shared via Arc<ArcSwap<_>>
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → table.rs compiles a new RouteTable
//!     → atomic swap; in-flight requests keep the old table
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once compiled; changes require a full rebuild
//! - All sections have defaults to allow minimal route files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod table;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RouteConfig, RouterConfig, ServerConfig, TimeoutConfig};
pub use table::{RouteTable, SharedTable, TableError};
pub use validation::ValidationError;
