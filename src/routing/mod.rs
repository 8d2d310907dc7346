//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     (method, pattern, target)
//!     → grammar.rs (split pattern into literal / variable segments)
//!     → tree.rs (split, wrap or extend nodes of the method's tree)
//!     → Freeze as immutable Router
//!
//! Incoming Request (method, path):
//!     → router.rs (pick the method's tree)
//!     → tree.rs (walk nodes, capture variables)
//!     → Return: Matched { value, params } or a miss
//! ```
//!
//! # Design Decisions
//! - Trees are built once and then only read (no locks on the read path)
//! - No regex in the hot path; one pass over the path bytes
//! - Deterministic: literal edges win over a variable at the same position
//! - Reloading swaps whole routers, see `config::watcher`

pub mod grammar;
pub mod matched;
pub mod node;
pub mod router;
pub mod tree;

pub use grammar::{PatternError, Variable, VariableKind, VariableParser};
pub use matched::{Matched, Param, DEFAULT_MAX_VARIABLES};
pub use node::Node;
pub use router::{Method, RouteError, Router, UnknownMethod};
pub use tree::{InsertError, Tree};
