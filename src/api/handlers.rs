use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{ReconciledSuggestion, UserProfile},
};

use super::AppState;

pub const WELCOME_MESSAGE: &str = "앱 추천 서비스를 환영합니다!";

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

// Handlers

/// Welcome endpoint
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommends five apps for a user profile
pub async fn recommend_apps(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(profile): Json<UserProfile>,
) -> AppResult<Json<Vec<ReconciledSuggestion>>> {
    tracing::info!(
        request_id = %request_id,
        categories = profile.category.len(),
        age_group = %profile.age_group,
        "Processing recommendation request"
    );

    let suggestions = state.recommender.recommend(&profile).await.map_err(|e| {
        tracing::warn!(
            request_id = %request_id,
            error = %e,
            malformed_output = e.is_malformed_output(),
            "Recommendation failed"
        );
        e
    })?;

    tracing::info!(
        request_id = %request_id,
        count = suggestions.len(),
        "Recommendation completed"
    );

    Ok(Json(suggestions))
}
