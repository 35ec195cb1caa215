#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Auth provider tag. Stored as text; `password_hash` is set iff `local`.
pub const PROVIDER_LOCAL: &str = "local";
pub const PROVIDER_GOOGLE: &str = "google";

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub provider: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User payload safe to return to clients — no credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub provider: String,
    pub avatar_url: Option<String>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        UserPublic {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            provider: user.provider,
            avatar_url: user.avatar_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_has_no_password_material() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            password_hash: Some("$2b$10$abcdefghijklmnopqrstuv".to_string()),
            provider: PROVIDER_LOCAL.to_string(),
            avatar_url: None,
            created_at: Utc::now(),
        };

        let public = UserPublic::from(user);
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("ada@example.com"));
    }
}
