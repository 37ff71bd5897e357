use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::debug;

use bizpulse_core::{Surface, ZipSelector};

use crate::AppState;

#[derive(Deserialize)]
pub struct PredicateUpdate {
    search: Option<String>,
    zip: Option<String>,
}

pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.read().await.status_view())
}

pub async fn filters(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.read().await.filter_options())
}

/// Update either predicate cell; omitted fields keep their value.
pub async fn set_predicate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PredicateUpdate>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let mut predicate = session.predicate().clone();
    if let Some(search) = body.search {
        predicate.search = search;
    }
    if let Some(zip) = body.zip {
        predicate.zip = ZipSelector::parse(&zip);
    }
    session.set_predicate(predicate);
    debug!(matched = session.filtered().len(), "Predicate updated");
    Json(session.filter_options())
}

pub async fn reset_predicate(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = state.session.write().await;
    session.reset_filters();
    Json(session.filter_options())
}

pub async fn list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.read().await.list_view())
}

pub async fn map(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.read().await.map_view())
}

pub async fn stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.read().await.stats_view())
}

pub async fn toggle_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = state.session.write().await;
    session.toggle_stats();
    Json(session.status_view())
}

pub async fn selection(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.read().await.detail_view())
}

/// Select a record. An unknown account clears the selection and returns `null`.
pub async fn select(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    session.select(&account);
    Json(session.detail_view())
}

pub async fn dismiss_selection(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.session.write().await.dismiss_selection();
    StatusCode::NO_CONTENT
}

pub async fn set_surface(
    State(state): State<Arc<AppState>>,
    Path(surface): Path<String>,
) -> impl IntoResponse {
    let surface: Surface = match surface.parse() {
        Ok(s) => s,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response();
        }
    };
    let mut session = state.session.write().await;
    session.set_surface(surface);
    Json(session.status_view()).into_response()
}

pub async fn dismiss_notice(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.session.write().await.dismiss_notice();
    StatusCode::NO_CONTENT
}
