//! Axum route handlers for the Auth API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::errors::AppError;
use crate::models::user::{User, UserPublic, PROVIDER_GOOGLE, PROVIDER_LOCAL};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleSignInRequest {
    pub id_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserPublic,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserPublic,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&req.email);
    if req.name.trim().is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "name, email and password are required".to_string(),
        ));
    }

    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation(
            "a user with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, phone, password_hash, provider)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.name.trim())
    .bind(&email)
    .bind(&req.phone)
    .bind(&password_hash)
    .bind(PROVIDER_LOCAL)
    .fetch_one(&state.db)
    .await?;

    info!("Registered user {} ({})", user.id, user.email);

    let token = issue_token(user.id, &state.config.jwt_secret)?;
    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&req.email);
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    // Unknown email and wrong password are indistinguishable to the caller.
    let user = user.ok_or(AppError::Unauthorized)?;
    let hash = user.password_hash.as_deref().ok_or(AppError::Unauthorized)?;
    if !verify_password(&req.password, hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(user.id, &state.config.jwt_secret)?;
    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// POST /api/auth/google
pub async fn handle_google(
    State(state): State<AppState>,
    Json(req): Json<GoogleSignInRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let claims = state.google.verify(&req.id_token).await?;
    let email = normalize_email(&claims.email);

    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    let user = match existing {
        Some(user) => user,
        None => {
            let name = claims
                .name
                .clone()
                .unwrap_or_else(|| email.split('@').next().unwrap_or("user").to_string());
            let user: User = sqlx::query_as(
                r#"
                INSERT INTO users (id, name, email, provider, avatar_url)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&name)
            .bind(&email)
            .bind(PROVIDER_GOOGLE)
            .bind(&claims.picture)
            .fetch_one(&state.db)
            .await?;
            info!("Created federated user {} ({})", user.id, user.email);
            user
        }
    };

    let token = issue_token(user.id, &state.config.jwt_secret)?;
    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// GET /api/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let user = fetch_user(&state, auth.user_id).await?;
    Ok(Json(MeResponse { user: user.into() }))
}

/// PATCH /api/auth/me
/// Only the provided fields change; everything else is left untouched.
pub async fn handle_update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateMeRequest>,
) -> Result<Json<MeResponse>, AppError> {
    if let Some(name) = &req.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
    }

    let user: Option<User> = sqlx::query_as(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            phone = COALESCE($3, phone),
            avatar_url = COALESCE($4, avatar_url)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(auth.user_id)
    .bind(req.name.as_deref().map(str::trim))
    .bind(&req.phone)
    .bind(&req.avatar_url)
    .fetch_optional(&state.db)
    .await?;

    let user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(MeResponse { user: user.into() }))
}

async fn fetch_user(state: &AppState, user_id: Uuid) -> Result<User, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?;
    user.ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
