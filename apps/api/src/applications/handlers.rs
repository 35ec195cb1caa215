//! Axum route handlers for the Applications API.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::applications::storage::{
    download_resume, extract_pdf_text, resume_key, upload_resume,
};
use crate::applications::upload::parse_application_form;
use crate::auth::extract::AuthUser;
use crate::bot::profile::{write_bot_profile, BotProfile};
use crate::errors::AppError;
use crate::models::application::JobApplicationRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub id: Uuid,
    pub resume_filename: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeTextResponse {
    pub text: String,
}

/// POST /api/applications
pub async fn handle_submit(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let form = parse_application_form(&mut multipart).await?;
    let application = form.validate()?;

    let application_id = Uuid::new_v4();
    let key = resume_key(auth.user_id, application_id, &application.resume.filename);
    let resume_size = application.resume.bytes.len() as i64;

    upload_resume(
        &state.s3,
        &state.config.s3_bucket,
        &key,
        &application.resume.content_type,
        application.resume.bytes.clone(),
    )
    .await?;

    let row: JobApplicationRow = sqlx::query_as(
        r#"
        INSERT INTO job_applications
            (id, user_id, first_name, middle_name, last_name, phone,
             street, city, state, zip_code, country,
             ethnicity, gender, disability, veteran,
             linkedin_email, linkedin_password,
             resume_key, resume_filename, resume_content_type, resume_size_bytes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
        RETURNING *
        "#,
    )
    .bind(application_id)
    .bind(auth.user_id)
    .bind(&application.first_name)
    .bind(&application.middle_name)
    .bind(&application.last_name)
    .bind(&application.phone)
    .bind(&application.street)
    .bind(&application.city)
    .bind(&application.state)
    .bind(&application.zip_code)
    .bind(&application.country)
    .bind(&application.ethnicity)
    .bind(&application.gender)
    .bind(&application.disability)
    .bind(&application.veteran)
    .bind(&application.linkedin_email)
    .bind(&application.linkedin_password)
    .bind(&key)
    .bind(&application.resume.filename)
    .bind(&application.resume.content_type)
    .bind(resume_size)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Stored application {} for user {} (resume {} bytes)",
        row.id, auth.user_id, resume_size
    );

    // The bot reads its applicant data from the profile file; a failed
    // render must not fail the submission itself.
    let profile = BotProfile::from_application(&row, &state.config.s3_bucket);
    if let Err(e) = write_bot_profile(&state.config.bot_profile_path, &profile).await {
        warn!("Failed to write bot profile: {e}");
    }

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            id: row.id,
            resume_filename: row.resume_filename,
            message: "Application submitted successfully".to_string(),
        }),
    ))
}

/// GET /api/applications
pub async fn handle_list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<JobApplicationRow>>, AppError> {
    let rows: Vec<JobApplicationRow> = sqlx::query_as(
        "SELECT * FROM job_applications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(auth.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

/// GET /api/applications/:id
pub async fn handle_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobApplicationRow>, AppError> {
    let row = fetch_application(&state, auth.user_id, id).await?;
    Ok(Json(row))
}

/// GET /api/applications/:id/resume
pub async fn handle_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let row = fetch_application(&state, auth.user_id, id).await?;
    let bytes = download_resume(&state.s3, &state.config.s3_bucket, &row.resume_key).await?;

    Ok((
        [
            (header::CONTENT_TYPE, row.resume_content_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", row.resume_filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/applications/:id/resume/text
pub async fn handle_resume_text(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeTextResponse>, AppError> {
    let row = fetch_application(&state, auth.user_id, id).await?;
    if row.resume_content_type != "application/pdf" {
        return Err(AppError::UnprocessableEntity(
            "text extraction is only available for PDF resumes".to_string(),
        ));
    }

    let bytes = download_resume(&state.s3, &state.config.s3_bucket, &row.resume_key).await?;
    let text = extract_pdf_text(&bytes)?;
    Ok(Json(ResumeTextResponse { text }))
}

async fn fetch_application(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
) -> Result<JobApplicationRow, AppError> {
    let row: Option<JobApplicationRow> =
        sqlx::query_as("SELECT * FROM job_applications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;
    row.ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}
