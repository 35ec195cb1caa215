use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::auth::google::GoogleVerifier;
use crate::bot::runner::BotRunner;
use crate::config::Config;
use crate::github::GitHubClient;
use crate::llm::gemini::GeminiClient;
use crate::llm::groq::GroqClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub groq: GroqClient,
    pub gemini: GeminiClient,
    pub github: GitHubClient,
    pub google: GoogleVerifier,
    /// Single shared runner — the one-run-at-a-time guard lives inside it.
    pub bot: BotRunner,
    pub config: Config,
}
