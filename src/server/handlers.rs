//! HTTP handlers for the card endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use super::error::ApiError;
use super::AppState;
use crate::core::cards::persist::store_only_new;
use crate::core::cards::Card;
use crate::database::CardReadOps;

fn default_lang() -> String {
    "de-CH".to_string()
}

fn default_category() -> String {
    "family".to_string()
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_count() -> usize {
    50
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_count")]
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct DrawParams {
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    pub count: Option<i64>,
    pub offset: Option<i64>,
    /// Random sampling instead of newest-first paging; offset is
    /// ignored in this mode.
    #[serde(default)]
    pub random: bool,
}

/// Generate a fresh batch, persist the cards that are new, and return
/// the full generated batch (persisted or not).
pub async fn download(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadParams>,
) -> Result<Json<Vec<Card>>, ApiError> {
    info!(
        "HTTP /download lang={} cat={} diff={} n={}",
        params.lang, params.category, params.difficulty, params.count
    );

    let generated = state
        .generator
        .get_or_generate(&params.lang, &params.category, &params.difficulty, params.count)
        .await?;

    let inserted = store_only_new(&state.db, &generated).await?;

    info!(
        "HTTP /download generated={} inserted={} duplicates={}",
        generated.len(),
        inserted.len(),
        generated.len() - inserted.len()
    );

    Ok(Json(generated))
}

/// Serve previously persisted cards.
pub async fn draw(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DrawParams>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let max_draw = state.max_draw_count as i64;
    let requested = params.count.unwrap_or(max_draw);
    let limit = requested.min(max_draw).max(1);
    let offset = params.offset.unwrap_or(0).max(0);

    info!(
        "HTTP /draw lang={} cat={} diff={} n={} offset={} random={}",
        params.lang, params.category, params.difficulty, limit, offset, params.random
    );

    let cards = if params.random {
        state
            .db
            .draw_random(&params.lang, &params.category, &params.difficulty, limit)
            .await?
    } else {
        state
            .db
            .draw_latest(&params.lang, &params.category, &params.difficulty, limit, offset)
            .await?
    };

    info!("HTTP /draw returned={}", cards.len());

    Ok(Json(cards))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
