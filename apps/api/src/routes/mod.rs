pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::bot::handlers as bot;
use crate::reports::{feedback, github, linkedin};
use crate::state::AppState;

/// The LinkedIn profile export can run up to 20MB; leave headroom for the
/// multipart framing around it.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/google", post(auth::handle_google))
        .route(
            "/api/auth/me",
            get(auth::handle_me).patch(auth::handle_update_me),
        )
        // Applications API
        .route(
            "/api/applications",
            post(applications::handle_submit).get(applications::handle_list),
        )
        .route("/api/applications/:id", get(applications::handle_get))
        .route(
            "/api/applications/:id/resume",
            get(applications::handle_resume),
        )
        .route(
            "/api/applications/:id/resume/text",
            get(applications::handle_resume_text),
        )
        // Bot API
        .route("/api/bot/run", post(bot::handle_run_bot))
        .route("/api/bot/status", get(bot::handle_bot_status))
        // Profile Enhancement API
        .route(
            "/api/reports/github/:username",
            get(github::handle_github_report),
        )
        .route("/api/groq/analyze", post(feedback::handle_analyze))
        .route(
            "/api/reports/linkedin/analyze",
            post(linkedin::handle_linkedin_analyze),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
