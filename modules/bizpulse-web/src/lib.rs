use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::set_header::SetResponseHeaderLayer;

use bizpulse_core::{RecordFetcher, Session};

mod rest;

// --- App State ---

/// One interactive session per process.
pub struct AppState {
    pub session: RwLock<Session>,
}

impl AppState {
    pub fn new(zip_codes: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            session: RwLock::new(Session::new(zip_codes)),
        })
    }
}

/// Run the session's single fetch and record the outcome. Requests made
/// while this is pending see the `loading` status.
pub async fn load(state: Arc<AppState>, fetcher: RecordFetcher, limit: u32) {
    let result = fetcher.fetch(limit).await;
    state.session.write().await.complete_load(result);
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(rest::status))
        .route("/api/filters", get(rest::filters))
        .route(
            "/api/predicate",
            put(rest::set_predicate).delete(rest::reset_predicate),
        )
        .route("/api/list", get(rest::list))
        .route("/api/map", get(rest::map))
        .route("/api/stats", get(rest::stats))
        .route("/api/stats/toggle", post(rest::toggle_stats))
        .route(
            "/api/selection",
            get(rest::selection).delete(rest::dismiss_selection),
        )
        .route("/api/selection/{account}", put(rest::select))
        .route("/api/surface/{surface}", put(rest::set_surface))
        .route("/api/notice", delete(rest::dismiss_notice))
        .with_state(state)
        // Views are derived from live session state; never cache them.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
