//! HTTP dispatch layer.
//!
//! Routes, relative to the configured API path (`/api/v0` by default):
//!
//! | Route | Service call |
//! |-------|--------------|
//! | `GET /movies` | [`MovieService::all`] |
//! | `GET /movies/{id}` | [`MovieService::by_id`] |
//! | `GET /movies/acted_in_by/{id}` | [`MovieService::by_actor`] |
//! | `GET /movies/name/{name}` | [`MovieService::by_name`] |
//! | `GET /people` | [`PeopleService::all`] |
//! | `GET /people/{id}` | [`PeopleService::by_id`] |
//! | `GET /people/acting_in_by/{id}` | [`PeopleService::by_movie`] |
//! | `GET /people/bacon?name1=&name2=` | [`PeopleService::bacon`] |
//! | `GET /people/name/{name}` | [`PeopleService::by_name`] |
//! | `GET /people/search/{name}` | [`PeopleService::search`] |
//!
//! Every route accepts `?output=d3` for graph output. `GET /health` sits
//! outside the API path.

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};

use crate::config::MoviegraphConfig;
use crate::observability::{REQUEST_ID_HEADER, RequestContext, scope_request_context};
use crate::services::{MovieService, PeopleService};
use crate::storage::GraphExecutor;
use crate::{Error, Result};
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

/// Shared state behind every route.
#[derive(Debug)]
pub struct AppState<E> {
    /// Executor all queries run against.
    pub executor: Arc<E>,
    /// Movie lookups.
    pub movies: MovieService,
    /// People lookups.
    pub people: PeopleService,
}

impl<E: GraphExecutor> AppState<E> {
    /// Creates state with services configured from `config`.
    #[must_use]
    pub fn new(executor: Arc<E>, config: &MoviegraphConfig) -> Self {
        Self {
            executor,
            movies: MovieService::new(&config.presentation),
            people: PeopleService::new(&config.presentation),
        }
    }
}

/// Builds the application router.
pub fn router<E: GraphExecutor + 'static>(state: AppState<E>, api_path: &str) -> Router {
    let api = Router::new()
        .route("/movies", get(handlers::movies_all::<E>))
        .route("/movies/{id}", get(handlers::movie_by_id::<E>))
        .route("/movies/acted_in_by/{id}", get(handlers::movies_acted_in_by::<E>))
        .route("/movies/name/{name}", get(handlers::movie_by_name::<E>))
        .route("/people", get(handlers::people_all::<E>))
        .route("/people/{id}", get(handlers::person_by_id::<E>))
        .route("/people/acting_in_by/{id}", get(handlers::people_acting_in::<E>))
        .route("/people/bacon", get(handlers::people_bacon::<E>))
        .route("/people/name/{name}", get(handlers::person_by_name::<E>))
        .route("/people/search/{name}", get(handlers::people_search::<E>))
        .with_state(Arc::new(state));

    let prefix = api_path.trim_matches('/');
    let app = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&format!("/{prefix}"), api)
    };

    app.route("/health", get(handlers::health))
        .layer(middleware::from_fn(track_request))
        // Cross-origin headers for browser clients
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,HEAD,OPTIONS,POST,PUT,DELETE"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(
                "Origin, X-Requested-With, Content-Type, Accept, Authorization",
            ),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Scopes a request id over the handler, echoes it back, and counts the request.
async fn track_request(request: Request, next: Next) -> Response {
    let context = RequestContext::from_header(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    let request_id = context.request_id().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!("request", request_id = %request_id, %method, %path);
    let mut response = scope_request_context(context, next.run(request))
        .instrument(span)
        .await;

    let status = response.status().as_u16();
    metrics::counter!(
        "moviegraph_http_requests_total",
        "method" => method.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    tracing::info!(request_id = %request_id, %method, %path, status, "Request handled");

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

/// Serves the API until ctrl-c.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve<E: GraphExecutor + 'static>(
    executor: Arc<E>,
    config: &MoviegraphConfig,
) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .map_err(|e| Error::operation("bind", format!("invalid bind address: {e}")))?;
    let app = router(AppState::new(executor, config), &config.server.api_path);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::operation("bind", e))?;
    tracing::info!(%addr, api_path = %config.server.api_path, "Movie graph API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::operation("serve", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
