mod applications;
mod auth;
mod bot;
mod config;
mod db;
mod errors;
mod github;
mod llm;
mod models;
mod reports;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::google::GoogleVerifier;
use crate::bot::runner::BotRunner;
use crate::config::Config;
use crate::db::create_pool;
use crate::github::GitHubClient;
use crate::llm::gemini::GeminiClient;
use crate::llm::groq::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Career Accelerator API v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize outbound API clients
    let groq = GroqClient::new(config.groq_api_key.clone());
    info!("Groq client initialized (model: {})", llm::groq::MODEL);
    let gemini = GeminiClient::new(config.gemini_api_key.clone());
    info!("Gemini client initialized (model: {})", llm::gemini::MODEL);
    let github = GitHubClient::new(config.github_token.clone());
    let google = GoogleVerifier::new(config.google_client_id.clone());

    // Initialize the automation bot runner
    let bot = BotRunner::new(&config.bot_command)?;
    info!("Bot runner initialized (command: {})", config.bot_command);

    // Build app state
    let state = AppState {
        db,
        s3,
        groq,
        gemini,
        github,
        google,
        bot,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "career-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
