//! Resume file storage in S3/MinIO, plus text extraction for the stored
//! PDFs. Keys are namespaced per user and application; the stored key is
//! the only link between a record and its file (no orphan cleanup).

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use uuid::Uuid;

use crate::applications::upload::sanitize_filename;
use crate::errors::AppError;

pub fn resume_key(user_id: Uuid, application_id: Uuid, filename: &str) -> String {
    format!(
        "resumes/{user_id}/{application_id}/{}",
        sanitize_filename(filename)
    )
}

pub async fn upload_resume(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    content_type: &str,
    bytes: Bytes,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .content_type(content_type)
        .body(ByteStream::from(bytes))
        .send()
        .await
        .map_err(|e| AppError::S3(format!("resume upload failed: {e}")))?;
    Ok(())
}

pub async fn download_resume(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<Bytes, AppError> {
    let object = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("resume download failed: {e}")))?;

    let data = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::S3(format!("resume body read failed: {e}")))?;
    Ok(data.into_bytes())
}

/// Extracts plain text from a PDF resume, the same step the automation
/// bot performs before prompting for cover letters.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::UnprocessableEntity(format!("could not extract PDF text: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_key_is_namespaced_and_sanitized() {
        let user_id = Uuid::nil();
        let application_id = Uuid::nil();
        let key = resume_key(user_id, application_id, "my resume.pdf");
        assert_eq!(
            key,
            format!("resumes/{user_id}/{application_id}/my_resume.pdf")
        );
    }

    #[test]
    fn test_extract_pdf_text_rejects_non_pdf_bytes() {
        assert!(extract_pdf_text(b"this is not a pdf").is_err());
    }
}
