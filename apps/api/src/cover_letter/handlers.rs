//! Axum route handlers for the cover-letter API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthedUser;
use crate::cover_letter::generator::{generate_cover_letter, CoverLetter, Tone};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub cover_letter: CoverLetter,
}

/// POST /api/cover-letter/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    _user: AuthedUser,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.resume_text.trim().is_empty()
        || request.job_description.trim().is_empty()
        || request.job_title.trim().is_empty()
        || request.company_name.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Resume text, job description, job title, and company name are required".to_string(),
        ));
    }

    let cover_letter = generate_cover_letter(
        &state.llm,
        &request.resume_text,
        &request.job_description,
        &request.job_title,
        &request.company_name,
        request.candidate_name.as_deref(),
        request.tone,
    )
    .await;

    Ok(Json(GenerateResponse {
        success: true,
        cover_letter,
    }))
}
