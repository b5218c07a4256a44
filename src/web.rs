//! HTTP surface: landing page, form submission, redirect and JSON API.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Path, Query, State},
    response::{Json, Redirect},
    routing::{get, post},
};
use maud::Markup;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::page::{PageView, render_page};
use crate::tables::Directory;
use crate::types::Resolution;
use crate::zipcode::format_location;

/// Application state shared across all requests
#[derive(Clone)]
struct AppState {
    directory: Arc<Directory>,
    metrics: Arc<Metrics>,
}

/// Server metrics
struct Metrics {
    total_lookups: AtomicU64,
    matched: AtomicU64,
    fallback: AtomicU64,
    start_time: Instant,
}

impl Metrics {
    fn record(&self, resolution: &Resolution) {
        self.total_lookups.fetch_add(1, Ordering::Relaxed);
        if resolution.matched {
            self.matched.fetch_add(1, Ordering::Relaxed);
        } else {
            self.fallback.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Build the Axum application with routes and middleware
pub fn build_app(directory: Arc<Directory>) -> Router {
    let metrics = Arc::new(Metrics {
        total_lookups: AtomicU64::new(0),
        matched: AtomicU64::new(0),
        fallback: AtomicU64::new(0),
        start_time: Instant::now(),
    });

    let state = AppState { directory, metrics };

    Router::new()
        // Landing page
        .route("/", get(landing_page))
        .route("/search", get(search))
        .route("/go/", get(go_empty))
        .route("/go/:zip", get(go))
        // Health check
        .route("/health", get(health_check))
        // API routes
        .route("/api/resolve", post(resolve_zip))
        .route("/api/metrics", get(get_metrics))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

fn lookup(state: &AppState, zip: &str) -> Resolution {
    let resolution = state.directory.lookup(zip);
    state.metrics.record(&resolution);
    tracing::info!(
        "Resolved zip {:?} to {} (matched: {})",
        zip,
        resolution.url,
        resolution.matched
    );
    resolution
}

/// Request bodies are a single small JSON object
const MAX_BODY_BYTES: usize = 16 * 1024;

async fn landing_page() -> Markup {
    render_page(&PageView::default())
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    zip: String,
    /// Collected by the form but not used for resolution
    #[serde(default)]
    full_name: String,
}

/// Form submission: the landing page again, with the result link
async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Markup {
    let result = lookup(&state, &params.zip);
    let view = PageView {
        location: format_location(&params.zip),
        zip: params.zip,
        full_name: params.full_name,
        result: Some(result),
    };
    render_page(&view)
}

/// Redirect straight to the resolved portal
async fn go(State(state): State<AppState>, Path(zip): Path<String>) -> Redirect {
    let resolution = lookup(&state, &zip);
    Redirect::to(&resolution.url)
}

/// `/go/` with nothing after it is an empty zip
async fn go_empty(State(state): State<AppState>) -> Redirect {
    let resolution = lookup(&state, "");
    Redirect::to(&resolution.url)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Resolve a zip code to its portal
async fn resolve_zip(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> Json<ResolveResponse> {
    Json(ResolveResponse {
        success: true,
        data: lookup(&state, &request.zip),
    })
}

#[derive(Deserialize)]
struct ResolveRequest {
    #[serde(default)]
    zip: String,
}

#[derive(Serialize)]
struct ResolveResponse {
    success: bool,
    data: Resolution,
}

/// Get server metrics
async fn get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        total_lookups: state.metrics.total_lookups.load(Ordering::Relaxed),
        matched: state.metrics.matched.load(Ordering::Relaxed),
        fallback: state.metrics.fallback.load(Ordering::Relaxed),
        uptime_seconds: state.metrics.start_time.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
struct MetricsResponse {
    total_lookups: u64,
    matched: u64,
    fallback: u64,
    uptime_seconds: u64,
}
