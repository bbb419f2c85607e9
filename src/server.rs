//! HTTP server.
//!
//! Exposes the corpus through a read-only JSON API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/{id}?findEnd=true` | Verse by id, optionally extended to the end of its passage |
//! | `GET`  | `/verses/{book}/{chapter}/{range}` | Verses `N` or `N-M` of one chapter |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! Every error response has the same body:
//!
//! ```json
//! { "error": "ID inválido" }
//! ```
//!
//! Status codes: `400` for invalid input, `404` when nothing matches
//! (including an extension that finds no following verse), `500` for
//! storage faults.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, Query, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

use scripture_core::lookup::{self, find_end_flag, LookupError, RangeQuery};
use scripture_core::passage::{PassageResponse, RangeResponse};
use scripture_core::store::VerseStore;

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn VerseStore>,
}

/// Build the router over any [`VerseStore`].
///
/// The store is injected rather than opened here, so tests can serve an
/// in-memory corpus through the same routes.
pub fn router(store: Arc<dyn VerseStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/{id}", get(handle_passage))
        .route("/verses/{book}/{chapter}/{range}", get(handle_range))
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(AppState { store })
}

/// Starts the HTTP server.
///
/// Opens the configured database, binds to `[server].bind` and serves until
/// Ctrl-C, then closes the pool.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(SqliteStore::open(config).await?);
    let app = router(store.clone());

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        bind = %config.server.bind,
        db = %config.db.path.display(),
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down");
    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Logs every request with method, URI, status and duration.
async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(%method, %uri, status = status.as_u16(), duration_ms, "request failed");
    } else if status.is_client_error() {
        tracing::warn!(%method, %uri, status = status.as_u16(), duration_ms, "request rejected");
    } else {
        tracing::info!(%method, %uri, status = status.as_u16(), duration_ms, "request completed");
    }

    response
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        let status = match &err {
            LookupError::Validation(_) => StatusCode::BAD_REQUEST,
            LookupError::NotFound(_) | LookupError::Exhausted => StatusCode::NOT_FOUND,
            LookupError::Storage(e) => {
                tracing::error!(error = %e, "storage fault");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        AppError {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /{id} ============

/// Handler for `GET /{id}`.
///
/// The id is taken as a raw string and path rejections (such as a segment
/// that is not valid UTF-8) are mapped to `ID inválido`, so malformed ids
/// get the JSON error body instead of Axum's plain-text rejection.
async fn handle_passage(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PassageResponse>, AppError> {
    let Path(id) = id.map_err(|_| LookupError::Validation(lookup::INVALID_ID))?;
    let find_end = find_end_flag(params.get("findEnd").map(String::as_str));
    let passage = lookup::passage_by_id(state.store.as_ref(), &id, find_end).await?;
    Ok(Json(passage))
}

// ============ GET /verses/{book}/{chapter}/{range} ============

async fn handle_range(
    State(state): State<AppState>,
    segments: Result<Path<(String, String, String)>, PathRejection>,
) -> Result<Json<RangeResponse>, AppError> {
    let Path((book, chapter, range)) =
        segments.map_err(|_| LookupError::Validation(lookup::INVALID_PARAMS))?;
    let query = RangeQuery::parse(&book, &chapter, &range)?;
    let verses = lookup::verses_by_range(state.store.as_ref(), &query).await?;
    Ok(Json(verses))
}
