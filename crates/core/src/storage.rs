//! Object storage buckets, upload validation, and key generation.

use crate::error::CoreError;

pub const BUCKET_IMAGES: &str = "images";
pub const BUCKET_DOCUMENTS: &str = "documents";
pub const BUCKET_SIGNATURES: &str = "signatures";

pub const VALID_BUCKETS: &[&str] = &[BUCKET_IMAGES, BUCKET_DOCUMENTS, BUCKET_SIGNATURES];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];
const SIGNATURE_EXTENSIONS: &[&str] = &["png"];

/// Extensions accepted by a bucket, or a validation error for unknown buckets.
pub fn allowed_extensions(bucket: &str) -> Result<&'static [&'static str], CoreError> {
    match bucket {
        BUCKET_IMAGES => Ok(IMAGE_EXTENSIONS),
        BUCKET_DOCUMENTS => Ok(DOCUMENT_EXTENSIONS),
        BUCKET_SIGNATURES => Ok(SIGNATURE_EXTENSIONS),
        other => Err(CoreError::Validation(format!(
            "Unknown bucket '{other}'. Must be one of: {}",
            VALID_BUCKETS.join(", ")
        ))),
    }
}

/// Validate an upload and return its normalised (lowercase) extension.
pub fn validate_upload(
    bucket: &str,
    filename: &str,
    size_bytes: usize,
    max_bytes: usize,
) -> Result<String, CoreError> {
    let allowed = allowed_extensions(bucket)?;

    if size_bytes == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size_bytes > max_bytes {
        return Err(CoreError::Validation(format!(
            "File is {size_bytes} bytes; the limit is {max_bytes} bytes"
        )));
    }

    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !allowed.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported file type '.{ext}' for bucket '{bucket}'. Supported: {}",
            allowed.join(", ")
        )));
    }
    Ok(ext)
}

/// Generate a collision-free object key for a validated extension.
pub fn object_key(ext: &str) -> String {
    format!("{}.{ext}", uuid::Uuid::new_v4().simple())
}

/// Whether `key` is a bare object name safe to join onto a bucket path.
pub fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
}

/// MIME type for a supported extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 1024;

    #[test]
    fn accepts_images_case_insensitively() {
        assert_eq!(validate_upload("images", "Photo.JPG", 10, MAX).unwrap(), "jpg");
    }

    #[test]
    fn rejects_wrong_type_for_bucket() {
        assert!(validate_upload("documents", "scan.png", 10, MAX).is_err());
        assert!(validate_upload("signatures", "sig.jpg", 10, MAX).is_err());
        assert!(validate_upload("images", "noext", 10, MAX).is_err());
    }

    #[test]
    fn rejects_unknown_bucket_and_bad_sizes() {
        assert!(validate_upload("secrets", "a.png", 10, MAX).is_err());
        assert!(validate_upload("images", "a.png", 0, MAX).is_err());
        assert!(validate_upload("images", "a.png", MAX + 1, MAX).is_err());
    }

    #[test]
    fn generated_keys_are_safe() {
        let key = object_key("pdf");
        assert!(key.ends_with(".pdf"));
        assert!(is_safe_key(&key));
        assert!(!is_safe_key("../etc/passwd"));
        assert!(!is_safe_key("a/b.png"));
        assert!(!is_safe_key(".hidden"));
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("pdf"), "application/pdf");
        assert_eq!(content_type_for("jpeg"), "image/jpeg");
    }
}
