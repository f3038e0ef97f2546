pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::cover_letter;
use crate::matching;
use crate::profile;
use crate::resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/resume/extract-text",
            post(resume::handlers::handle_extract_text),
        )
        .route("/api/resume/upload", post(resume::handlers::handle_upload))
        // Match API
        .route("/api/match/analyze", post(matching::handlers::handle_analyze))
        // Cover letter API
        .route(
            "/api/cover-letter/generate",
            post(cover_letter::handlers::handle_generate),
        )
        // User profile API
        .route(
            "/api/user/profile",
            get(profile::handlers::handle_get_profile)
                .post(profile::handlers::handle_update_profile),
        )
        .route(
            "/api/user/track-analysis",
            post(profile::handlers::handle_track_analysis),
        )
        .route(
            "/api/user/resumes/:id",
            delete(profile::handlers::handle_delete_resume),
        )
        .route(
            "/api/user/resumes/:id/default",
            post(profile::handlers::handle_set_default_resume),
        )
        // Uploads are size-checked in the extraction adapter; the transport
        // limit just needs headroom above the 10 MiB document bound.
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024))
        .with_state(state)
}
