//! Document Decoder: turns an uploaded PDF or DOCX into normalized plain text.
#![allow(dead_code)]
//!
//! Dispatch happens on the declared media type (with a filename-suffix
//! fallback for DOCX) BEFORE either decode path runs, so unsupported uploads
//! are rejected without touching the binary content. Both decoders are
//! synchronous CPU work; callers run them inside `tokio::task::spawn_blocking`.

pub mod docx;
pub mod pdf;

use bytes::Bytes;
use thiserror::Error;

/// Media type of an Office Open XML word-processing document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF_MIME: &str = "application/pdf";

/// A freshly uploaded resume file. Ephemeral; consumed by [`decode`] and
/// dropped; the binary content is never retained past the call.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

/// Normalized plain text extracted from a document or pasted directly.
/// Invariant: non-empty after trimming; whitespace-only extractions are
/// rejected as [`DecodeError::EmptyExtraction`] before construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Builds normalized text from a raw string. Direct paste input goes
    /// through here too; it bypasses decoding but shares the non-blank
    /// invariant.
    pub fn new(raw: impl Into<String>) -> Result<Self, DecodeError> {
        normalize(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    /// Declared type is neither PDF nor DOCX. Carries the detected type
    /// or extension.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The format was valid but no extractable text existed, typically a
    /// scanned image with no embedded text layer.
    #[error("no extractable text found in the document")]
    EmptyExtraction,

    /// Corrupt stream or malformed archive inside a supported format.
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// The two document formats this service decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

/// Resolves the decode path from the declared media type, falling back to
/// the `.docx` filename suffix (browsers sometimes upload DOCX as
/// `application/octet-stream`). Anything else is rejected here, before any
/// decoder is invoked.
pub fn detect_kind(media_type: &str, file_name: &str) -> Result<DocumentKind, DecodeError> {
    let media_type = media_type.trim();
    if media_type.eq_ignore_ascii_case(PDF_MIME) {
        return Ok(DocumentKind::Pdf);
    }
    if media_type.eq_ignore_ascii_case(DOCX_MIME)
        || file_name.to_ascii_lowercase().ends_with(".docx")
    {
        return Ok(DocumentKind::Docx);
    }
    Err(DecodeError::UnsupportedFormat(media_type.to_string()))
}

/// Decodes an uploaded document into normalized text.
///
/// Consumes the upload; the raw bytes are dropped on return. Decoding is a
/// pure function of the input, so the same document always yields the same
/// `ExtractedText`.
pub fn decode(kind: DocumentKind, document: UploadedDocument) -> Result<ExtractedText, DecodeError> {
    let raw = match kind {
        DocumentKind::Pdf => pdf::extract_text(&document.bytes)?,
        DocumentKind::Docx => docx::extract_text(&document.bytes)?,
    };
    normalize(raw)
}

/// Enforces the non-blank invariant on decoder output.
fn normalize(raw: String) -> Result<ExtractedText, DecodeError> {
    if raw.trim().is_empty() {
        return Err(DecodeError::EmptyExtraction);
    }
    Ok(ExtractedText(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind_pdf_mime() {
        assert_eq!(
            detect_kind("application/pdf", "resume.pdf").unwrap(),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn test_detect_kind_docx_mime() {
        assert_eq!(
            detect_kind(DOCX_MIME, "resume.bin").unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_kind_docx_extension_fallback() {
        assert_eq!(
            detect_kind("application/octet-stream", "Resume Final.DOCX").unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_kind_rejects_png_before_decoding() {
        let err = detect_kind("image/png", "scan.png").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat(t) if t == "image/png"));
    }

    #[test]
    fn test_detect_kind_rejects_legacy_doc() {
        assert!(detect_kind("application/msword", "resume.doc").is_err());
    }

    #[test]
    fn test_normalize_rejects_whitespace_only_output() {
        let err = normalize("  \n\t \n ".to_string()).unwrap_err();
        assert!(matches!(err, DecodeError::EmptyExtraction));
    }

    #[test]
    fn test_normalize_keeps_text_verbatim() {
        let text = normalize("Experienced engineer.\nGo, Rust.".to_string()).unwrap();
        assert_eq!(text.as_str(), "Experienced engineer.\nGo, Rust.");
    }

    #[test]
    fn test_decode_malformed_pdf_is_malformed_not_empty() {
        let doc = UploadedDocument {
            file_name: "broken.pdf".into(),
            media_type: PDF_MIME.into(),
            bytes: Bytes::from_static(b"%PDF-1.7 this is not a real pdf body"),
        };
        let err = decode(DocumentKind::Pdf, doc).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_decode_malformed_docx_is_malformed() {
        let doc = UploadedDocument {
            file_name: "broken.docx".into(),
            media_type: DOCX_MIME.into(),
            bytes: Bytes::from_static(b"PK\x03\x04 truncated zip"),
        };
        let err = decode(DocumentKind::Docx, doc).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }
}
