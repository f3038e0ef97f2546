//! Axum route handlers for the user-profile API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::profile::models::{ProfileUpdate, UserProfile};
use crate::profile::store::NewAnalysis;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub success: bool,
}

const OK: OkResponse = OkResponse { success: true };

/// GET /api/user/profile
///
/// Lazily creates a zero-valued default profile on first access.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthedUser(claims): AuthedUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profiles.get_or_create(&claims).await?;
    Ok(Json(ProfileResponse {
        success: true,
        profile,
    }))
}

/// POST /api/user/profile
///
/// Partial update; empty payloads are rejected.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AuthedUser(claims): AuthedUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<OkResponse>, AppError> {
    if update.is_empty() {
        return Err(AppError::Validation("No update data provided".to_string()));
    }

    let mut profile = state
        .profiles
        .fetch(&claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

    update.apply(&mut profile);
    profile.updated_at = chrono::Utc::now();
    state.profiles.persist(&profile).await?;

    Ok(Json(OK))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackAnalysisRequest {
    #[serde(default)]
    pub job_title: String,
    pub score: u32,
    pub company_name: Option<String>,
    pub job_category: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

/// POST /api/user/track-analysis
///
/// Records a completed analysis against the caller's stats. 404 when the
/// profile has never been created.
pub async fn handle_track_analysis(
    State(state): State<AppState>,
    AuthedUser(claims): AuthedUser,
    Json(request): Json<TrackAnalysisRequest>,
) -> Result<Json<OkResponse>, AppError> {
    if request.job_title.trim().is_empty() {
        return Err(AppError::Validation("Job title is required".to_string()));
    }
    if request.score > 100 {
        return Err(AppError::Validation(
            "Score must be between 0 and 100".to_string(),
        ));
    }

    state
        .profiles
        .track_analysis(
            &claims.user_id,
            NewAnalysis {
                job_title: request.job_title,
                score: request.score,
                company_name: request.company_name,
                job_category: request.job_category,
                strengths: request.strengths,
                weaknesses: request.weaknesses,
            },
        )
        .await?;

    Ok(Json(OK))
}

/// DELETE /api/user/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    AuthedUser(claims): AuthedUser,
    Path(resume_id): Path<String>,
) -> Result<Json<OkResponse>, AppError> {
    state
        .profiles
        .delete_resume(&claims.user_id, &resume_id)
        .await?;
    Ok(Json(OK))
}

/// POST /api/user/resumes/:id/default
pub async fn handle_set_default_resume(
    State(state): State<AppState>,
    AuthedUser(claims): AuthedUser,
    Path(resume_id): Path<String>,
) -> Result<Json<OkResponse>, AppError> {
    state
        .profiles
        .set_default_resume(&claims.user_id, &resume_id)
        .await?;
    Ok(Json(OK))
}
