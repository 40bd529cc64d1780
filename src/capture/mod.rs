use crate::core::error::StepError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::fs;
use std::path::Path;

/// One still image from the capture source: base64 payload plus mime type.
/// The pixel content is opaque to the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub data: String,
    pub mime_type: String,
}

/// Reads an image file as a capture event. The mime type comes from the
/// file extension; files that do not look like images are rejected before
/// any IO happens.
pub fn capture_from_file(path: &Path) -> Result<CapturedImage, StepError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(StepError::Capture(format!(
            "not an image file: {}",
            path.display()
        )));
    }

    let bytes = fs::read(path)
        .map_err(|e| StepError::Capture(format!("read {}: {}", path.display(), e)))?;

    Ok(CapturedImage {
        data: BASE64_STANDARD.encode(bytes),
        mime_type: mime.essence_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_jpeg_with_mime_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("step.jpg");
        fs::write(&path, b"not really a jpeg").unwrap();

        let image = capture_from_file(&path).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, BASE64_STANDARD.encode(b"not really a jpeg"));
    }

    #[test]
    fn rejects_non_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        assert!(matches!(
            capture_from_file(&path),
            Err(StepError::Capture(_))
        ));
    }

    #[test]
    fn rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        assert!(matches!(
            capture_from_file(&path),
            Err(StepError::Capture(_))
        ));
    }
}
