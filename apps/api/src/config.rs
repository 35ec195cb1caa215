use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub groq_api_key: String,
    pub gemini_api_key: String,
    pub github_token: Option<String>,
    pub google_client_id: Option<String>,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub bot_command: String,
    pub bot_profile_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            groq_api_key: require_env("GROQ_API_KEY")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            github_token: std::env::var("GITHUB_TOKEN").ok(),
            google_client_id: std::env::var("GOOGLE_CLIENT_ID").ok(),
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            bot_command: std::env::var("BOT_COMMAND")
                .unwrap_or_else(|_| "python runAiBot.py".to_string()),
            bot_profile_path: std::env::var("BOT_PROFILE_PATH")
                .unwrap_or_else(|_| "config/bot_profile.yaml".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
