//! Axum route handlers for the match-scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::matching::scorer::{analyze_match, MatchAnalysis};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    pub job_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: MatchAnalysis,
}

/// POST /api/match/analyze
///
/// Scores a resume against a job description. The response is always a
/// well-formed analysis; upstream model failures degrade to the fallback.
pub async fn handle_analyze(
    State(state): State<AppState>,
    _user: AuthedUser,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.resume_text.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume text and job description are required".to_string(),
        ));
    }

    let analysis = analyze_match(
        &state.llm,
        &request.resume_text,
        &request.job_description,
        request.job_category.as_deref(),
    )
    .await;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}
