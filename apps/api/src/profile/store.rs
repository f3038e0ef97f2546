//! Profile persistence over the JSONB document store, plus the
//! `trackAnalysis` operation.
//!
//! The whole profile document is written back on every mutation
//! (last-write-wins; no optimistic-concurrency check, accepted for this
//! traffic level). Each successful write fires a best-effort cache/view
//! invalidation signal through Redis.

use chrono::Utc;
use redis::Client as RedisClient;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::SessionClaims;
use crate::errors::AppError;
use crate::profile::models::{generate_record_id, AnalysisRecord, SavedResume, UserProfile};
use crate::profile::stats::apply_analysis;

/// Saved resume content below this many characters is rejected.
const MIN_RESUME_CONTENT_LEN: usize = 100;

/// Inputs to the analysis-tracking operation.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub job_title: String,
    pub score: u32,
    pub company_name: Option<String>,
    pub job_category: Option<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Clone)]
pub struct ProfileStore {
    db: PgPool,
    redis: RedisClient,
}

impl ProfileStore {
    pub fn new(db: PgPool, redis: RedisClient) -> Self {
        Self { db, redis }
    }

    /// Loads a profile document, or `None` if the user has never been seen.
    pub async fn fetch(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        let data: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM user_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await?;

        match data {
            Some(value) => {
                let profile = serde_json::from_value(value).map_err(anyhow::Error::from)?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Loads the profile, creating a zero-valued default on first access.
    pub async fn get_or_create(&self, claims: &SessionClaims) -> Result<UserProfile, AppError> {
        if let Some(profile) = self.fetch(&claims.user_id).await? {
            return Ok(profile);
        }

        let profile = UserProfile::new_default(claims, Utc::now());
        info!("Creating default profile for user {}", claims.user_id);
        self.persist(&profile).await?;
        Ok(profile)
    }

    /// Writes the whole profile document back and signals view invalidation.
    pub async fn persist(&self, profile: &UserProfile) -> Result<(), AppError> {
        let data = serde_json::to_value(profile).map_err(anyhow::Error::from)?;

        sqlx::query(
            "INSERT INTO user_profiles (user_id, data, updated_at) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at",
        )
        .bind(&profile.user_id)
        .bind(&data)
        .bind(profile.updated_at)
        .execute(&self.db)
        .await?;

        self.invalidate_views(&profile.user_id).await;
        Ok(())
    }

    /// Appends a completed analysis to the user's stats and persists the
    /// updated document. Fails with `NotFound` when no profile exists; no
    /// partial-update recovery is attempted if the write fails.
    pub async fn track_analysis(&self, user_id: &str, input: NewAnalysis) -> Result<(), AppError> {
        let mut profile = self
            .fetch(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

        let now = Utc::now();
        let record = AnalysisRecord {
            id: generate_record_id(now),
            date: now,
            job_title: input.job_title,
            company_name: input
                .company_name
                .unwrap_or_else(|| "Not specified".to_string()),
            job_category: input
                .job_category
                .unwrap_or_else(|| "Not specified".to_string()),
            score: input.score,
            strengths: input.strengths,
            weaknesses: input.weaknesses,
        };

        apply_analysis(&mut profile.stats, record, now);
        profile.updated_at = now;

        self.persist(&profile).await?;
        info!(
            "Analysis tracked for user {user_id}: total={}, highest={}, average={}",
            profile.stats.total_analyses,
            profile.stats.highest_match_score,
            profile.stats.average_match_score
        );
        Ok(())
    }

    /// Saves a resume to the caller's profile, creating the profile on first
    /// contact. The first saved resume, or an explicit request, becomes the
    /// default via `preferences.default_resume_id`.
    pub async fn save_resume(
        &self,
        claims: &SessionClaims,
        resume: SavedResume,
        set_default: bool,
    ) -> Result<String, AppError> {
        if resume.content.len() < MIN_RESUME_CONTENT_LEN {
            return Err(AppError::Validation(
                "Resume content is too short or incomplete".to_string(),
            ));
        }

        let mut profile = self.get_or_create(claims).await?;

        let resume_id = resume.id.clone();
        let first_resume = profile.saved_resumes.is_empty();
        profile.saved_resumes.push(resume);
        if set_default || first_resume {
            profile.preferences.default_resume_id = Some(resume_id.clone());
        }
        profile.updated_at = Utc::now();

        self.persist(&profile).await?;
        Ok(resume_id)
    }

    /// Deletes a saved resume. Deleting the default promotes the first
    /// remaining resume, or clears the default entirely.
    pub async fn delete_resume(&self, user_id: &str, resume_id: &str) -> Result<(), AppError> {
        let mut profile = self
            .fetch(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

        let before = profile.saved_resumes.len();
        profile.saved_resumes.retain(|r| r.id != resume_id);
        if profile.saved_resumes.len() == before {
            return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
        }

        if profile.preferences.default_resume_id.as_deref() == Some(resume_id) {
            profile.preferences.default_resume_id =
                profile.saved_resumes.first().map(|r| r.id.clone());
        }
        profile.updated_at = Utc::now();

        self.persist(&profile).await
    }

    /// Marks a saved resume as the default.
    pub async fn set_default_resume(&self, user_id: &str, resume_id: &str) -> Result<(), AppError> {
        let mut profile = self
            .fetch(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

        if !profile.saved_resumes.iter().any(|r| r.id == resume_id) {
            return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
        }

        profile.preferences.default_resume_id = Some(resume_id.to_string());
        profile.updated_at = Utc::now();

        self.persist(&profile).await
    }

    /// Best-effort downstream cache/view invalidation. Failures are logged,
    /// never surfaced; the write itself has already succeeded.
    async fn invalidate_views(&self, user_id: &str) {
        let profile_key = format!("views:profile:{user_id}");
        let dashboard_key = format!("views:dashboard:{user_id}");

        match self.redis.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                if let Err(e) = redis::cmd("DEL")
                    .arg(&profile_key)
                    .arg(&dashboard_key)
                    .query_async::<_, ()>(&mut conn)
                    .await
                {
                    warn!("View invalidation failed for {user_id}: {e}");
                }
            }
            Err(e) => warn!("Redis unavailable, skipping view invalidation: {e}"),
        }
    }
}
