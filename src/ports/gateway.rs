//! Analysis gateway port: the single call to the external analysis service.
//!
//! The service takes one uploaded file and answers with a complete
//! `ReportResult` or fails. There is no partial result and no retry.

use std::path::Path;

use crate::domain::ReportResult;

/// Size above which an upload is flagged in logs. Not enforced.
pub const SUGGESTED_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Error type for gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Cannot reach analysis service at {0}")]
    Connection(String),

    #[error("Analysis request timed out after {0}s")]
    Timeout(u64),

    #[error("Analysis service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed analysis response: {0}")]
    Decode(String),

    #[error("HTTP client error: {0}")]
    Transport(String),

    #[error("Cannot read upload: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// The one message shown to the user for any failed submission.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("Could not read the selected file ({e})."),
            _ => "Failed to analyze report. Please ensure the analysis service is running and try again."
                .to_string(),
        }
    }
}

/// What a local preview of the upload can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Pdf,
}

/// A report file ready to be sent for analysis.
#[derive(Clone)]
pub struct ReportUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ReportUpload {
    // Report bytes are PHI; never print them.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ReportUpload {
    /// Build an upload from in-memory bytes; the MIME type is guessed from the name.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an upload from disk.
    ///
    /// # Errors
    /// Returns `GatewayError::Io` if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());

        let upload = Self::new(file_name, bytes);
        if upload.bytes.len() > SUGGESTED_MAX_UPLOAD_BYTES {
            tracing::warn!(
                "Upload {} is {} bytes, above the suggested 10MB limit",
                upload.file_name,
                upload.bytes.len()
            );
        }
        Ok(upload)
    }

    /// Preview classification, derived from the MIME type alone.
    #[must_use]
    pub fn preview_kind(&self) -> Option<PreviewKind> {
        if self.content_type.starts_with("image/") {
            Some(PreviewKind::Image)
        } else if self.content_type == "application/pdf" {
            Some(PreviewKind::Pdf)
        } else {
            None
        }
    }
}

/// Trait for the remote analysis operation.
///
/// Implementations block until the service answers; callers run them off the
/// UI thread.
pub trait AnalysisGateway: Send + Sync {
    /// Analyze one report file.
    ///
    /// # Errors
    /// Returns a `GatewayError` for any transport or decoding failure.
    fn analyze(&self, upload: &ReportUpload) -> Result<ReportResult, GatewayError>;

    /// Short description for logs and the status bar.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_preview_kind_from_name() {
        assert_eq!(
            ReportUpload::new("scan.png", vec![1]).preview_kind(),
            Some(PreviewKind::Image)
        );
        assert_eq!(
            ReportUpload::new("labs.PDF", vec![1]).preview_kind(),
            Some(PreviewKind::Pdf)
        );
        assert_eq!(ReportUpload::new("notes.bin", vec![1]).preview_kind(), None);
    }

    #[test]
    fn test_from_path_reads_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("blood_panel.jpg");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(b"jpegdata").expect("write");

        let upload = ReportUpload::from_path(&path).expect("Should read");
        assert_eq!(upload.file_name, "blood_panel.jpg");
        assert_eq!(upload.content_type, "image/jpeg");
        assert_eq!(upload.bytes, b"jpegdata");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ReportUpload::from_path("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, GatewayError::Io(_)));
        assert!(err.user_message().contains("Could not read"));
    }

    #[test]
    fn test_debug_hides_bytes() {
        let upload = ReportUpload::new("a.pdf", b"secret".to_vec());
        let shown = format!("{upload:?}");
        assert!(shown.contains("len: 6"));
        assert!(!shown.contains("115")); // first byte of "secret"
    }
}
