use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::auth::SessionVerifier;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::profile::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every external client is constructed once in `main` and passed in here;
/// nothing in the handler tree reaches for a global. The database pool lives
/// inside `ProfileStore`, the only component that talks to it.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub llm: LlmClient,
    /// Session-cookie verification seam. Tests substitute a fake.
    pub sessions: Arc<dyn SessionVerifier>,
    pub profiles: ProfileStore,
    pub config: Config,
}
