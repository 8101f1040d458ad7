//! Document text extraction: turns an uploaded resume into plain text.
//!
//! Decoders are CPU-bound and some of them panic on hostile input, so every
//! extraction runs on the blocking pool and a panic is reported as a corrupt
//! document.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

pub mod docx;
pub mod pdf;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Document could not be decoded: {0}")]
    DocumentCorrupt(String),
}

/// Supported resume formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Docx,
}

impl MediaType {
    /// Resolves a declared `Content-Type`. Parameters such as `; charset=` are
    /// ignored and the comparison is case-insensitive.
    pub fn from_mime(declared: &str) -> Result<Self, ExtractError> {
        let essence = declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MIME => Ok(MediaType::Pdf),
            DOCX_MIME => Ok(MediaType::Docx),
            _ => Err(ExtractError::UnsupportedFormat(declared.to_string())),
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => PDF_MIME,
            MediaType::Docx => DOCX_MIME,
        }
    }
}

/// An uploaded resume. Consumed once by [`extract_text`].
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub content: Bytes,
    pub media_type: MediaType,
}

/// Extracts plain text from the document. Always yields a string on success,
/// possibly empty when the document carries no text layer.
pub async fn extract_text(document: UploadedDocument) -> Result<String, ExtractError> {
    let media_type = document.media_type;
    let content = document.content;

    let outcome = tokio::task::spawn_blocking(move || match media_type {
        MediaType::Pdf => pdf::extract(&content),
        MediaType::Docx => docx::extract(&content),
    })
    .await;

    let text = match outcome {
        Ok(result) => result?,
        Err(join_err) => {
            warn!("{} decoder aborted: {join_err}", media_type.as_mime());
            return Err(ExtractError::DocumentCorrupt(
                "the document decoder failed unexpectedly".to_string(),
            ));
        }
    };

    debug!(
        "Extracted {} characters from {}",
        text.chars().count(),
        media_type.as_mime()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_accepts_supported_types() {
        assert_eq!(MediaType::from_mime(PDF_MIME).unwrap(), MediaType::Pdf);
        assert_eq!(MediaType::from_mime(DOCX_MIME).unwrap(), MediaType::Docx);
    }

    #[test]
    fn test_from_mime_ignores_case_and_parameters() {
        assert_eq!(
            MediaType::from_mime("Application/PDF; charset=binary").unwrap(),
            MediaType::Pdf
        );
    }

    #[test]
    fn test_from_mime_rejects_other_types() {
        for declared in ["image/png", "application/msword", "text/plain", ""] {
            let err = MediaType::from_mime(declared).unwrap_err();
            assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
        }
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_corrupt() {
        let document = UploadedDocument {
            content: Bytes::from_static(b"definitely not a pdf"),
            media_type: MediaType::Pdf,
        };
        let err = extract_text(document).await.unwrap_err();
        assert!(matches!(err, ExtractError::DocumentCorrupt(_)));
    }

    #[tokio::test]
    async fn test_garbage_docx_is_corrupt() {
        let document = UploadedDocument {
            content: Bytes::from_static(b"PK but not really a zip"),
            media_type: MediaType::Docx,
        };
        let err = extract_text(document).await.unwrap_err();
        assert!(matches!(err, ExtractError::DocumentCorrupt(_)));
    }
}
