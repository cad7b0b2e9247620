use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::generation::generator::ResumeGenerator;
use crate::scoring::completion::ScoringConfig;

/// Shared application state injected into all route handlers via Axum extractors.
/// The LLM client is not carried here — it lives inside the drafting backend,
/// which is the only module allowed to call it.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Drafting backend: LLM with template fallback in production.
    pub generator: Arc<dyn ResumeGenerator>,
    /// The canonical completion rule set, shared by every scoring call site.
    pub scoring: ScoringConfig,
}
