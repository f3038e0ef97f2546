//! Axum route handlers for resume upload and text extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;

use crate::auth::AuthedUser;
use crate::classifier::validate_resume_content;
use crate::errors::AppError;
use crate::extraction::{extract_text, validate_upload, ExtractionOptions};
use crate::profile::models::{generate_record_id, SavedResume};
use crate::state::AppState;

/// A parsed multipart upload.
struct UploadForm {
    file_name: String,
    content_type: String,
    bytes: Bytes,
    display_name: Option<String>,
    set_default: bool,
}

/// Reads the multipart form. The `file` field is required; `name` and
/// `setDefault` are optional.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, String, Bytes)> = None;
    let mut display_name = None;
    let mut set_default = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to parse form data: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                file = Some((file_name, content_type, bytes));
            }
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read field: {e}")))?;
                if !text.trim().is_empty() {
                    display_name = Some(text);
                }
            }
            Some("setDefault") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read field: {e}")))?;
                set_default = text == "true";
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    Ok(UploadForm {
        file_name,
        content_type,
        bytes,
        display_name,
        set_default,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTextResponse {
    pub success: bool,
    pub text: String,
    pub filename: String,
    pub file_size: usize,
}

/// POST /api/resume/extract-text
///
/// Extracts plain text from an uploaded PDF. Parse failures and timeouts are
/// never a 500: the response carries a placeholder instead.
pub async fn handle_extract_text(
    multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let opts = ExtractionOptions::default();
    validate_upload(&form.content_type, form.bytes.len(), &opts)?;

    let file_size = form.bytes.len();
    let extracted = extract_text(form.bytes, &form.file_name, &opts).await;

    Ok(Json(ExtractTextResponse {
        success: true,
        text: extracted.text,
        filename: form.file_name,
        file_size,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub resume_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// POST /api/resume/upload
///
/// Full upload pipeline: validate, extract, classify, store the original in
/// S3 and save the resume to the caller's profile.
pub async fn handle_upload(
    State(state): State<AppState>,
    AuthedUser(claims): AuthedUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let opts = ExtractionOptions::default();
    validate_upload(&form.content_type, form.bytes.len(), &opts)?;

    let file_size = form.bytes.len();
    let extracted = extract_text(form.bytes.clone(), &form.file_name, &opts).await;

    // Only classify real document text; a placeholder would always be
    // rejected and extraction failure is non-fatal by design.
    let mut warning = None;
    if extracted.complete {
        let validation = validate_resume_content(&state.llm, &extracted.text).await;
        if !validation.is_resume {
            return Err(AppError::Validation(format!(
                "The uploaded document does not appear to be a resume ({})",
                validation.document_type
            )));
        }
    } else {
        warning = Some(
            "Text extraction was incomplete; the resume was saved without content validation"
                .to_string(),
        );
    }

    let now = Utc::now();
    let resume_id = generate_record_id(now);
    let s3_key = format!("resumes/{}/{}.pdf", claims.user_id, resume_id);

    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&s3_key)
        .content_type("application/pdf")
        .body(form.bytes.into())
        .send()
        .await
        .map_err(|e| AppError::S3(e.to_string()))?;

    let resume = SavedResume {
        id: resume_id,
        name: form
            .display_name
            .unwrap_or_else(|| form.file_name.clone()),
        date_uploaded: now,
        content: extracted.text.clone(),
        file_size: file_size as u64,
        file_name: form.file_name,
    };

    let resume_id = state
        .profiles
        .save_resume(&claims, resume, form.set_default)
        .await?;

    Ok(Json(UploadResponse {
        success: true,
        resume_id,
        text: extracted.text,
        warning,
    }))
}
