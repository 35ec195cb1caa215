// Job application intake: multipart form + resume upload, S3-backed file
// storage, and retrieval endpoints for the stored record and file.

pub mod handlers;
pub mod storage;
pub mod upload;
