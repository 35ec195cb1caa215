//! LinkedIn profile analysis: the user uploads their profile PDF export,
//! Gemini reads it inline and returns structured recommendations.
//!
//! The original SPA called Gemini straight from the browser with a
//! client-exposed API key; the call lives server-side here so the key
//! never ships to clients.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm::strip_json_fences;
use crate::reports::prompts::LINKEDIN_ANALYZE_PROMPT;
use crate::state::AppState;

const MAX_PROFILE_PDF_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingRecommendation {
    pub time: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInAnalysis {
    pub headline_suggestions: Vec<String>,
    pub posting_strategy: Vec<PostingRecommendation>,
    pub connection_targeting: Vec<String>,
    pub summary: String,
}

/// POST /api/reports/linkedin/analyze
pub async fn handle_linkedin_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<LinkedInAnalysis>, AppError> {
    let mut pdf_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("profile") {
            continue;
        }

        let filename = field.file_name().unwrap_or("profile.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read profile upload: {e}")))?;

        validate_profile_pdf(&filename, content_type.as_deref(), bytes.len())?;
        pdf_bytes = Some(bytes);
    }

    let pdf_bytes = pdf_bytes
        .ok_or_else(|| AppError::Validation("missing 'profile' PDF upload".to_string()))?;

    let raw = state
        .gemini
        .analyze_pdf(LINKEDIN_ANALYZE_PROMPT, &pdf_bytes)
        .await
        .map_err(|e| AppError::Llm(format!("LinkedIn analysis failed: {e}")))?;

    let analysis: LinkedInAnalysis = serde_json::from_str(strip_json_fences(&raw))
        .map_err(|e| AppError::Llm(format!("LinkedIn analysis returned invalid JSON: {e}")))?;

    Ok(Json(analysis))
}

fn validate_profile_pdf(
    filename: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<(), AppError> {
    let is_pdf = content_type == Some("application/pdf")
        || filename.to_lowercase().ends_with(".pdf");
    if !is_pdf {
        return Err(AppError::Validation(
            "please upload a valid PDF file".to_string(),
        ));
    }
    if size > MAX_PROFILE_PDF_BYTES {
        return Err(AppError::Validation(
            "file size exceeds the 20MB limit".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_parses_camel_case_payload() {
        let raw = r#"{
            "headlineSuggestions": ["Builder of reliable systems"],
            "postingStrategy": [{"time": "Tuesday 9am", "recommendation": "Share a project retrospective"}],
            "connectionTargeting": ["Engineering managers"],
            "summary": "Solid profile, needs a sharper headline."
        }"#;
        let analysis: LinkedInAnalysis = serde_json::from_str(raw).unwrap();
        assert_eq!(analysis.headline_suggestions.len(), 1);
        assert_eq!(analysis.posting_strategy[0].time, "Tuesday 9am");
    }

    #[test]
    fn test_analysis_parses_fenced_model_output() {
        let raw = "```json\n{\"headlineSuggestions\":[],\"postingStrategy\":[],\"connectionTargeting\":[],\"summary\":\"ok\"}\n```";
        let analysis: LinkedInAnalysis =
            serde_json::from_str(strip_json_fences(raw)).unwrap();
        assert_eq!(analysis.summary, "ok");
    }

    #[test]
    fn test_validate_profile_pdf_accepts_pdf() {
        assert!(validate_profile_pdf("Profile.PDF", None, 1024).is_ok());
        assert!(validate_profile_pdf("export", Some("application/pdf"), 1024).is_ok());
    }

    #[test]
    fn test_validate_profile_pdf_rejects_other_types() {
        assert!(validate_profile_pdf("resume.docx", Some("application/msword"), 10).is_err());
    }

    #[test]
    fn test_validate_profile_pdf_rejects_oversize() {
        assert!(validate_profile_pdf("p.pdf", None, MAX_PROFILE_PDF_BYTES + 1).is_err());
    }
}
