use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    config::ConfigurationStatus,
    error::{AppError, AppResult},
    models::{
        ContentId, ContentItem, ContentKind, Cover, CoverCategory, DetailRecord, EmotionalState,
        MoodLabel, Recommendations,
    },
    services::classifier::classify,
};

use super::AppState;

/// Covers returned when the caller sets no limit
pub const DEFAULT_COVER_LIMIT: usize = 20;

// Request/Response types

#[derive(Debug, Serialize, Deserialize)]
pub struct MoodResponse {
    pub mood: MoodLabel,
    pub summary: String,
    pub significant_drift: bool,
}

#[derive(Debug, Deserialize)]
pub struct RerollRequest {
    pub kind: String,
    pub mood: String,
    /// Item currently shown in the slot, kept when the reroll fails
    pub current: Option<ContentItem>,
}

#[derive(Debug, Serialize)]
pub struct RerollResponse {
    pub item: Option<ContentItem>,
    pub rerolled: bool,
}

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub mood: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub mood: MoodLabel,
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
pub struct CoversQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy" })),
    )
}

/// Classify an emotional state without touching the catalogs
pub async fn analyze_mood(Json(state): Json<EmotionalState>) -> Json<MoodResponse> {
    let mood = classify(&state);
    Json(MoodResponse {
        mood,
        summary: mood.summary().to_string(),
        significant_drift: state.has_significant_drift(),
    })
}

/// Build a bundle for an emotional state
pub async fn recommend(
    State(state): State<AppState>,
    Json(emotional_state): Json<EmotionalState>,
) -> Json<Recommendations> {
    Json(state.recommendations.get_recommendations(&emotional_state).await)
}

/// Replace one slot of a bundle
pub async fn reroll(
    State(state): State<AppState>,
    Json(request): Json<RerollRequest>,
) -> AppResult<Json<RerollResponse>> {
    let kind: ContentKind = request.kind.parse()?;
    let mood = MoodLabel::parse_or_default(&request.mood);

    if let Some(current) = &request.current {
        if current.kind() != kind {
            return Err(AppError::InvalidInput(format!(
                "current item is a {}, not a {}",
                current.kind(),
                kind
            )));
        }
    }

    let fresh = state.recommendations.reroll_slot(kind, mood).await;
    let rerolled = fresh.is_some();

    Ok(Json(RerollResponse {
        item: fresh.or(request.current),
        rerolled,
    }))
}

/// Detailed record for one item
pub async fn get_detail(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<DetailRecord>> {
    let kind: ContentKind = kind.parse()?;
    let id = ContentId::parse(&id);

    state
        .details
        .get_detail(kind, &id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No {} with id {}", kind, id)))
}

/// TV series matching a mood. Series have no static fallback, so this
/// listing is empty without credentials and a catalog failure is a 502.
pub async fn search_series(
    State(state): State<AppState>,
    Query(params): Query<SeriesQuery>,
) -> AppResult<Json<SeriesResponse>> {
    let mood = MoodLabel::parse_or_default(params.mood.as_deref().unwrap_or_default());

    if !state.configuration.is_configured {
        return Ok(Json(SeriesResponse {
            mood,
            items: Vec::new(),
        }));
    }

    let items = state
        .series
        .search_series_by_mood(mood, params.page.unwrap_or(1))
        .await?;

    Ok(Json(SeriesResponse { mood, items }))
}

/// Which catalog credentials are missing
pub async fn get_configuration(State(state): State<AppState>) -> Json<ConfigurationStatus> {
    Json(state.configuration.clone())
}

/// Popular-content covers for a category
pub async fn get_covers(
    State(state): State<AppState>,
    Query(params): Query<CoversQuery>,
) -> Json<Vec<Cover>> {
    let category = params
        .category
        .as_deref()
        .and_then(|c| c.parse::<CoverCategory>().ok())
        .unwrap_or(CoverCategory::Mixed);
    let limit = params.limit.unwrap_or(DEFAULT_COVER_LIMIT);

    Json(state.showcase.covers(category, limit).await)
}
