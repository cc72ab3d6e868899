use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;
use crate::error::EstimateError;
use crate::estimate::{EstimateView, EstimationSession, ProjectStore};
use crate::models::*;

type ApiError = (StatusCode, String);

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side; clients only see a generic message.
fn internal_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// Map estimation errors to responses. Caller mistakes are returned as-is.
fn estimate_error(e: EstimateError) -> ApiError {
    if e.is_not_found() {
        return (StatusCode::NOT_FOUND, e.to_string());
    }
    if e.is_client_error() {
        tracing::warn!("Validation error: {}", e);
        return (StatusCode::BAD_REQUEST, e.to_string());
    }
    internal_error(e)
}

fn load_session(state: &AppState, id: Uuid) -> Result<EstimationSession, ApiError> {
    EstimationSession::load(&state.db, id).map_err(estimate_error)
}

fn save_session(state: &AppState, session: &EstimationSession) -> Result<(), ApiError> {
    session.save(&state.db).map_err(estimate_error)
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Projects
// ============================================================

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectSummary>>, ApiError> {
    state
        .db
        .get_project_summaries()
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> Result<(StatusCode, Json<EstimateView>), ApiError> {
    if input.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Project name must not be empty".to_string(),
        ));
    }

    let mut session = EstimationSession::create(input.into());
    session.register(&state.db).map_err(estimate_error)?;
    Ok((StatusCode::CREATED, Json(session.view())))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EstimateView>, ApiError> {
    load_session(&state, id).map(|s| Json(s.view()))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProjectInput>,
) -> Result<Json<EstimateView>, ApiError> {
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Project name must not be empty".to_string(),
        ));
    }

    let lock = state.project_lock(id);
    let _guard = lock.lock().await;
    let mut session = load_session(&state, id)?;
    session.update_project(input);
    save_session(&state, &session)?;
    Ok(Json(session.view()))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let lock = state.project_lock(id);
    let _guard = lock.lock().await;
    if state.db.delete_record(id).map_err(internal_error)? {
        state.forget_project(id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Project not found".to_string()))
    }
}

pub async fn update_cost_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCostModelInput>,
) -> Result<Json<EstimateView>, ApiError> {
    let lock = state.project_lock(id);
    let _guard = lock.lock().await;
    let mut session = load_session(&state, id)?;
    session.update_cost_model(input).map_err(estimate_error)?;
    save_session(&state, &session)?;
    Ok(Json(session.view()))
}

// ============================================================
// Features
// ============================================================

pub async fn add_feature(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateFeatureInput>,
) -> Result<(StatusCode, Json<Feature>), ApiError> {
    let lock = state.project_lock(id);
    let _guard = lock.lock().await;
    let mut session = load_session(&state, id)?;
    let feature = session.add_feature(input).map_err(estimate_error)?;
    save_session(&state, &session)?;
    Ok((StatusCode::CREATED, Json(feature)))
}

pub async fn update_feature(
    State(state): State<AppState>,
    Path((id, feature_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateFeatureInput>,
) -> Result<Json<Feature>, ApiError> {
    let lock = state.project_lock(id);
    let _guard = lock.lock().await;
    let mut session = load_session(&state, id)?;
    let feature = session
        .update_feature(feature_id, input)
        .map_err(estimate_error)?;
    save_session(&state, &session)?;
    Ok(Json(feature))
}

pub async fn delete_feature(
    State(state): State<AppState>,
    Path((id, feature_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let lock = state.project_lock(id);
    let _guard = lock.lock().await;
    let mut session = load_session(&state, id)?;
    session.remove_feature(feature_id).map_err(estimate_error)?;
    save_session(&state, &session)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Suggestions
// ============================================================

pub async fn suggest(
    State(state): State<AppState>,
    Json(input): Json<SuggestionRequest>,
) -> Json<SizeSuggestion> {
    Json(
        EstimationSession::request_size_suggestion(
            state.suggester.as_ref(),
            &input.feature_description,
        )
        .await,
    )
}

/// Result of suggesting a size for a stored feature.
#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureSuggestionResponse {
    pub suggestion: SizeSuggestion,
    /// The re-priced feature, or `None` if nothing was applied.
    pub feature: Option<Feature>,
}

pub async fn suggest_for_feature(
    State(state): State<AppState>,
    Path((id, feature_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<FeatureSuggestionResponse>, ApiError> {
    let name = load_session(&state, id)?
        .ledger()
        .get(feature_id)
        .map(|f| f.name.clone())
        .ok_or_else(|| estimate_error(EstimateError::FeatureNotFound(feature_id)))?;

    let suggestion =
        EstimationSession::request_size_suggestion(state.suggester.as_ref(), &name).await;

    // The feature may have been edited or removed while the provider was answering.
    let lock = state.project_lock(id);
    let _guard = lock.lock().await;
    let mut session = load_session(&state, id)?;
    let feature = session
        .apply_suggestion(feature_id, &suggestion)
        .map_err(estimate_error)?;
    if feature.is_some() {
        save_session(&state, &session)?;
    }

    Ok(Json(FeatureSuggestionResponse {
        suggestion,
        feature,
    }))
}
