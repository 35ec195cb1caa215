//! Multipart form parsing and validation for application submissions.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

#[derive(Debug)]
pub struct ResumeUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Raw form fields as they arrive off the wire; everything optional until
/// `validate` runs.
#[derive(Debug, Default)]
pub struct ApplicationForm {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub ethnicity: Option<String>,
    pub gender: Option<String>,
    pub disability: Option<String>,
    pub veteran: Option<String>,
    pub linkedin_email: Option<String>,
    pub linkedin_password: Option<String>,
    pub resume: Option<ResumeUpload>,
}

/// A fully validated submission, ready to persist.
#[derive(Debug)]
pub struct ValidApplication {
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
    pub linkedin_password: String,
    pub resume: ResumeUpload,
}

/// Drains an axum `Multipart` body into an `ApplicationForm`.
/// The SPA sends field names in camelCase.
pub async fn parse_application_form(multipart: &mut Multipart) -> Result<ApplicationForm, AppError> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "resume" {
            let filename = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation("resume must be a file upload".to_string()))?;
            let content_type = field
                .content_type()
                .map(str::to_string)
                .unwrap_or_else(|| content_type_for(&filename).to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read resume upload: {e}")))?;
            form.resume = Some(ResumeUpload {
                filename,
                content_type,
                bytes,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("invalid field '{name}': {e}")))?;
        let value = value.trim().to_string();
        if value.is_empty() {
            continue;
        }

        match name.as_str() {
            "firstName" => form.first_name = Some(value),
            "middleName" => form.middle_name = Some(value),
            "lastName" => form.last_name = Some(value),
            "phone" => form.phone = Some(value),
            "street" => form.street = Some(value),
            "city" => form.city = Some(value),
            "state" => form.state = Some(value),
            "zipCode" => form.zip_code = Some(value),
            "country" => form.country = Some(value),
            "ethnicity" => form.ethnicity = Some(value),
            "gender" => form.gender = Some(value),
            "disability" => form.disability = Some(value),
            "veteran" => form.veteran = Some(value),
            "linkedinEmail" => form.linkedin_email = Some(value),
            "linkedinPassword" => form.linkedin_password = Some(value),
            other => tracing::debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

impl ApplicationForm {
    /// Enforces the required-field set and the resume file constraints.
    pub fn validate(self) -> Result<ValidApplication, AppError> {
        let mut missing = Vec::new();

        let first_name = require(self.first_name, "firstName", &mut missing);
        let last_name = require(self.last_name, "lastName", &mut missing);
        let phone = require(self.phone, "phone", &mut missing);
        let street = require(self.street, "street", &mut missing);
        let city = require(self.city, "city", &mut missing);
        let state = require(self.state, "state", &mut missing);
        let zip_code = require(self.zip_code, "zipCode", &mut missing);
        let country = require(self.country, "country", &mut missing);
        let ethnicity = require(self.ethnicity, "ethnicity", &mut missing);
        let gender = require(self.gender, "gender", &mut missing);
        let disability = require(self.disability, "disability", &mut missing);
        let veteran = require(self.veteran, "veteran", &mut missing);
        let linkedin_email = require(self.linkedin_email, "linkedinEmail", &mut missing);
        let linkedin_password = require(self.linkedin_password, "linkedinPassword", &mut missing);

        if self.resume.is_none() {
            missing.push("resume");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let resume = self
            .resume
            .ok_or_else(|| AppError::Validation("missing required fields: resume".to_string()))?;
        validate_resume(&resume)?;

        Ok(ValidApplication {
            first_name,
            middle_name: self.middle_name,
            last_name,
            phone,
            street,
            city,
            state,
            zip_code,
            country,
            ethnicity,
            gender,
            disability,
            veteran,
            linkedin_email,
            linkedin_password,
            resume,
        })
    }
}

fn require(value: Option<String>, label: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(value) => value,
        None => {
            missing.push(label);
            String::new()
        }
    }
}

fn validate_resume(resume: &ResumeUpload) -> Result<(), AppError> {
    let extension = file_extension(&resume.filename);
    let allowed = extension
        .as_deref()
        .map(|ext| ALLOWED_RESUME_EXTENSIONS.contains(&ext))
        .unwrap_or(false);
    if !allowed {
        return Err(AppError::Validation(
            "resume must be a PDF, DOC or DOCX file".to_string(),
        ));
    }
    if resume.bytes.len() > MAX_RESUME_BYTES {
        return Err(AppError::Validation(
            "resume file size exceeds the 5MB limit".to_string(),
        ));
    }
    Ok(())
}

fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

fn content_type_for(filename: &str) -> &'static str {
    match file_extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

/// Keeps alphanumerics, dots, dashes and underscores; everything else
/// (path separators included) becomes an underscore.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ApplicationForm {
        ApplicationForm {
            first_name: Some("Grace".to_string()),
            middle_name: None,
            last_name: Some("Hopper".to_string()),
            phone: Some("555-0101".to_string()),
            street: Some("1 Navy Way".to_string()),
            city: Some("Arlington".to_string()),
            state: Some("VA".to_string()),
            zip_code: Some("22202".to_string()),
            country: Some("USA".to_string()),
            ethnicity: Some("Other".to_string()),
            gender: Some("Female".to_string()),
            disability: Some("No".to_string()),
            veteran: Some("Yes".to_string()),
            linkedin_email: Some("grace@example.com".to_string()),
            linkedin_password: Some("hunter2".to_string()),
            resume: Some(ResumeUpload {
                filename: "resume.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: Bytes::from_static(b"%PDF-1.4"),
            }),
        }
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        let valid = filled_form().validate().unwrap();
        assert_eq!(valid.first_name, "Grace");
        assert!(valid.middle_name.is_none());
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let mut form = filled_form();
        form.city = None;
        form.veteran = None;
        let err = form.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("city"));
        assert!(message.contains("veteran"));
        assert!(!message.contains("firstName"));
    }

    #[test]
    fn test_validate_requires_resume() {
        let mut form = filled_form();
        form.resume = None;
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("resume"));
    }

    #[test]
    fn test_validate_rejects_disallowed_extension() {
        let mut form = filled_form();
        form.resume = Some(ResumeUpload {
            filename: "resume.exe".to_string(),
            content_type: "application/octet-stream".to_string(),
            bytes: Bytes::from_static(b"MZ"),
        });
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversize_resume() {
        let mut form = filled_form();
        form.resume = Some(ResumeUpload {
            filename: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: Bytes::from(vec![0u8; MAX_RESUME_BYTES + 1]),
        });
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let mut form = filled_form();
        form.resume = Some(ResumeUpload {
            filename: "Resume.DOCX".to_string(),
            content_type: "application/octet-stream".to_string(),
            bytes: Bytes::from_static(b"PK"),
        });
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_sanitize_filename_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("my resume (final).pdf"), "my_resume__final_.pdf");
    }

    #[test]
    fn test_content_type_fallback_by_extension() {
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("a.doc"), "application/msword");
        assert_eq!(content_type_for("a"), "application/octet-stream");
    }
}
