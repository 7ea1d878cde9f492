//! Multipart helpers shared by the resume and analyzer endpoints.

use axum::extract::multipart::{Field, MultipartError};
use axum::http::{header::CONTENT_TYPE, HeaderMap};
use bytes::{Bytes, BytesMut};

use crate::errors::AppError;

/// Largest file accepted in a single multipart field.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Room for the non-file fields that travel with an upload.
pub const MAX_REQUEST_BYTES: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn is_pdf(&self) -> bool {
        self.content_type == "application/pdf"
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

pub fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

pub fn multipart_error(e: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
}

/// Sniffed content type wins over the declared one.
fn resolve_content_type(declared: Option<&str>, bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    declared
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

pub fn is_allowed_type(content_type: &str) -> bool {
    content_type == "application/pdf" || content_type.starts_with("image/")
}

/// Reads a file field, enforcing only the size cap. Callers check the type.
pub async fn read_upload(mut field: Field<'_>) -> Result<UploadedFile, AppError> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let declared = field.content_type().map(str::to_string);

    let mut buffer = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if buffer.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} MB limit",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }
        buffer.extend_from_slice(&chunk);
    }
    let bytes = buffer.freeze();

    let content_type = resolve_content_type(declared.as_deref(), &bytes);
    Ok(UploadedFile {
        file_name,
        content_type,
        bytes,
    })
}

/// Reads a file field, enforcing the size cap and the PDF-or-image filter.
pub async fn read_file(field: Field<'_>) -> Result<UploadedFile, AppError> {
    let file = read_upload(field).await?;
    if !is_allowed_type(&file.content_type) {
        return Err(AppError::Validation(
            "Only images and PDFs are allowed".to_string(),
        ));
    }
    Ok(file)
}

pub async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(multipart_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_multipart() {
        let mut headers = HeaderMap::new();
        assert!(!is_multipart(&headers));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=x"),
        );
        assert!(is_multipart(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!is_multipart(&headers));
    }

    #[test]
    fn test_sniffed_type_overrides_declared() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert_eq!(resolve_content_type(Some("application/pdf"), png), "image/png");
        assert_eq!(
            resolve_content_type(Some("application/pdf"), b"%PDF-1.7\n"),
            "application/pdf"
        );
    }

    #[test]
    fn test_declared_type_used_when_unknown() {
        assert_eq!(
            resolve_content_type(Some("Image/HEIC; name=x"), b"zzzz"),
            "image/heic"
        );
        assert_eq!(resolve_content_type(None, b"zzzz"), "application/octet-stream");
    }

    #[test]
    fn test_allowed_types() {
        assert!(is_allowed_type("application/pdf"));
        assert!(is_allowed_type("image/jpeg"));
        assert!(!is_allowed_type("text/plain"));
        assert!(!is_allowed_type("application/zip"));
    }
}
