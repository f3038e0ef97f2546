//! Session verification against the external identity provider.
//!
//! Every protected endpoint resolves the opaque `session` cookie through the
//! `SessionVerifier` seam. The HTTP implementation posts the cookie to the
//! provider's verify endpoint; tests substitute a fake.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Identity claims resolved from a valid session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verifies an opaque session cookie value. Any failure, including a
    /// provider outage, is reported as `Unauthorized`.
    async fn verify(&self, session_cookie: &str) -> Result<SessionClaims, AppError>;
}

/// Verifies sessions by calling the identity provider over HTTP.
pub struct HttpSessionVerifier {
    client: reqwest::Client,
    verify_url: String,
}

impl HttpSessionVerifier {
    pub fn new(verify_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            verify_url,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    session_cookie: &'a str,
}

#[async_trait]
impl SessionVerifier for HttpSessionVerifier {
    async fn verify(&self, session_cookie: &str) -> Result<SessionClaims, AppError> {
        let response = self
            .client
            .post(&self.verify_url)
            .json(&VerifyRequest { session_cookie })
            .send()
            .await
            .map_err(|e| {
                warn!("Identity provider unreachable: {e}");
                AppError::Unauthorized
            })?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized);
        }

        response.json::<SessionClaims>().await.map_err(|e| {
            warn!("Invalid verify response from identity provider: {e}");
            AppError::Unauthorized
        })
    }
}

/// Extractor for the authenticated user. Missing or invalid session
/// cookies reject with 401 uniformly across endpoints.
#[derive(Debug, Clone)]
pub struct AuthedUser(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthorized)?;

        let cookie = jar.get(SESSION_COOKIE).ok_or(AppError::Unauthorized)?;

        let claims = state.sessions.verify(cookie.value()).await?;
        Ok(AuthedUser(claims))
    }
}
