//! HTTP host for route tables.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, span)
//!     → routing layer resolves (method, path) to a RouteTarget
//!     → handler.rs (assemble declared params / query / body)
//!     → response.rs (echo, fixed body, 404, 405)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{Capabilities, Capability, HandlerInput, RouteTarget};
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
