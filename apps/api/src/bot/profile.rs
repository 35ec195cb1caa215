//! Renders the applicant profile the external bot consumes.
//!
//! The bot reads a YAML file (applicant identity, LinkedIn credentials,
//! resume location) from disk at startup; the server rewrites that file
//! whenever a new application is submitted.

use std::path::Path;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::application::JobApplicationRow;

#[derive(Debug, Serialize)]
pub struct Applicant {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
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
}

#[derive(Debug, Serialize)]
pub struct LinkedInCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeLocation {
    pub bucket: String,
    pub key: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct BotProfile {
    pub applicant: Applicant,
    pub linkedin: LinkedInCredentials,
    pub resume: ResumeLocation,
}

impl BotProfile {
    pub fn from_application(row: &JobApplicationRow, bucket: &str) -> Self {
        BotProfile {
            applicant: Applicant {
                first_name: row.first_name.clone(),
                middle_name: row.middle_name.clone(),
                last_name: row.last_name.clone(),
                phone: row.phone.clone(),
                street: row.street.clone(),
                city: row.city.clone(),
                state: row.state.clone(),
                zip_code: row.zip_code.clone(),
                country: row.country.clone(),
                ethnicity: row.ethnicity.clone(),
                gender: row.gender.clone(),
                disability: row.disability.clone(),
                veteran: row.veteran.clone(),
            },
            linkedin: LinkedInCredentials {
                username: row.linkedin_email.clone(),
                password: row.linkedin_password.clone(),
            },
            resume: ResumeLocation {
                bucket: bucket.to_string(),
                key: row.resume_key.clone(),
                filename: row.resume_filename.clone(),
            },
        }
    }
}

pub fn render_profile(profile: &BotProfile) -> Result<String, AppError> {
    serde_yaml::to_string(profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to render bot profile: {e}")))
}

/// Writes the profile YAML, creating parent directories as needed.
pub async fn write_bot_profile(path: &str, profile: &BotProfile) -> Result<(), AppError> {
    let yaml = render_profile(profile)?;
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("mkdir {parent:?}: {e}")))?;
        }
    }
    tokio::fs::write(path, yaml)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("write {path}: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_row() -> JobApplicationRow {
        JobApplicationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            first_name: "Grace".to_string(),
            middle_name: None,
            last_name: "Hopper".to_string(),
            phone: "555-0101".to_string(),
            street: "1 Navy Way".to_string(),
            city: "Arlington".to_string(),
            state: "VA".to_string(),
            zip_code: "22202".to_string(),
            country: "USA".to_string(),
            ethnicity: "Other".to_string(),
            gender: "Female".to_string(),
            disability: "No".to_string(),
            veteran: "Yes".to_string(),
            linkedin_email: "grace@example.com".to_string(),
            linkedin_password: "hunter2".to_string(),
            resume_key: "resumes/u/a/resume.pdf".to_string(),
            resume_filename: "resume.pdf".to_string(),
            resume_content_type: "application/pdf".to_string(),
            resume_size_bytes: 8,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_profile_contains_credentials_and_resume() {
        let profile = BotProfile::from_application(&sample_row(), "uploads");
        let yaml = render_profile(&profile).unwrap();
        assert!(yaml.contains("username: grace@example.com"));
        assert!(yaml.contains("password: hunter2"));
        assert!(yaml.contains("bucket: uploads"));
        assert!(yaml.contains("key: resumes/u/a/resume.pdf"));
        // absent optional fields stay out of the file entirely
        assert!(!yaml.contains("middle_name"));
    }

    #[tokio::test]
    async fn test_write_bot_profile_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("nested/config/bot_profile.yaml")
            .to_string_lossy()
            .to_string();

        let profile = BotProfile::from_application(&sample_row(), "uploads");
        write_bot_profile(&path, &profile).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("first_name: Grace"));
    }
}
