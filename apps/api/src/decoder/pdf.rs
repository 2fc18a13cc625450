//! PDF text extraction: pages decoded in strict document order, joined by a
//! single newline between pages. Reordering would scramble the resume's
//! chronology.

use super::DecodeError;

/// Extracts the text of every page, in page order 1..N.
pub fn extract_text(bytes: &[u8]) -> Result<String, DecodeError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;
    Ok(join_pages(pages))
}

/// Concatenates per-page text with exactly one newline between pages.
fn join_pages(pages: Vec<String>) -> String {
    pages.join("\n")
}
