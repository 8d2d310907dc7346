//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum app with a single dispatching fallback
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve every request against the active route table
//! - Build handler input from the route's declared capabilities
//! - Observability (metrics, request spans)

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode, Uri},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{ConfigError, RouteTable, ServerConfig, SharedTable};
use crate::http::handler::{Capability, HandlerInput, RouteTarget};
use crate::http::request::{make_span, propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::Method;

/// State injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub table: SharedTable,
    pub max_body_bytes: usize,
}

/// HTTP server answering from a route table.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    table: SharedTable,
}

impl HttpServer {
    /// Compile the configured routes and build the app.
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        let table = RouteTable::from_config(&config).map_err(ConfigError::from)?;
        Ok(Self::with_table(config, table.into_shared()))
    }

    /// Build the app around an existing shared table.
    pub fn with_table(config: ServerConfig, table: SharedTable) -> Self {
        metrics::record_routes(table.load().route_count());
        let state = AppState {
            table: table.clone(),
            max_body_bytes: config.listener.max_body_bytes,
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            table,
        }
    }

    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new().fallback(dispatch).with_state(state).layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(propagate_request_id_layer())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Handle to the live table, for the config watcher.
    pub fn table(&self) -> SharedTable {
        self.table.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.table.load().route_count(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

enum Lookup {
    Found {
        target: RouteTarget,
        params: Vec<(String, String)>,
    },
    Missing {
        allowed: Vec<Method>,
    },
}

/// Resolve the request against the active table and answer it.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method_name = request.method().as_str().to_owned();

    let Ok(method) = method_name.parse::<Method>() else {
        let response = response::not_implemented(&method_name);
        metrics::record_request(&method_name, response.status().as_u16(), start);
        return response;
    };
    let path = request.uri().path().to_owned();

    // The table guard must not be held across an await.
    let lookup = {
        let table = state.table.load();
        let matched = table.router().resolve(method, &path);
        let lookup = match matched.value() {
            Some(target) => Lookup::Found {
                target: target.clone(),
                params: matched.to_owned_params(),
            },
            None => Lookup::Missing {
                allowed: table.router().allowed_methods(&path),
            },
        };
        lookup
    };

    let response = match lookup {
        Lookup::Found { target, params } => {
            tracing::debug!(
                request_id = %request_id(request.headers()),
                route = %target.name,
                "Route matched"
            );
            respond(&state, target, params, request).await
        }
        Lookup::Missing { allowed } if allowed.is_empty() => {
            tracing::debug!(
                request_id = %request_id(request.headers()),
                path = %path,
                "No route matched"
            );
            response::not_found(&path)
        }
        Lookup::Missing { allowed } => response::method_not_allowed(&allowed),
    };

    metrics::record_request(&method_name, response.status().as_u16(), start);
    response
}

async fn respond(
    state: &AppState,
    target: RouteTarget,
    params: Vec<(String, String)>,
    request: Request<Body>,
) -> Response {
    let status = StatusCode::from_u16(target.status).unwrap_or(StatusCode::OK);
    if let Some(body) = &target.body {
        return response::fixed(status, body.clone());
    }

    let uri = request.uri().clone();
    let body = if target.capabilities.wants(Capability::Body) {
        match axum::body::to_bytes(request.into_body(), state.max_body_bytes).await {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                tracing::warn!(route = %target.name, error = %e, "Failed to read request body");
                return response::payload_too_large();
            }
        }
    } else {
        None
    };

    let input = HandlerInput::build(&target, params, || query_map(&uri), body);
    response::echo(status, &input)
}

fn query_map(uri: &Uri) -> BTreeMap<String, String> {
    Query::<BTreeMap<String, String>>::try_from_uri(uri)
        .map(|Query(query)| query)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_map() {
        let uri: Uri = "/search?q=rust&page=2".parse().unwrap();
        let query = query_map(&uri);
        assert_eq!(query["q"], "rust");
        assert_eq!(query["page"], "2");

        let uri: Uri = "/search".parse().unwrap();
        assert!(query_map(&uri).is_empty());
    }
}
