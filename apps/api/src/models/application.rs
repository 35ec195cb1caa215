use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One submitted job application. The LinkedIn password is needed by the
/// automation bot and is therefore persisted, but it must never leave the
/// server in an API response — hence `skip_serializing`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub ethnicity: String,
    pub gender: String,
    pub disability: String,
    pub veteran: String,
    pub linkedin_email: String,
    #[serde(skip_serializing)]
    pub linkedin_password: String,
    pub resume_key: String,
    pub resume_filename: String,
    pub resume_content_type: String,
    pub resume_size_bytes: i64,
    pub created_at: DateTime<Utc>,
}
