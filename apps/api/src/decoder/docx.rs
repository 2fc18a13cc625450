//! DOCX text extraction: the OOXML archive is unpacked structurally and the
//! body text flattened, paragraph by paragraph, with all formatting dropped.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use super::DecodeError;

/// Flattens the document body into plain text, one line per paragraph.
pub fn extract_text(bytes: &[u8]) -> Result<String, DecodeError> {
    let docx = read_docx(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for para_child in paragraph.children {
                if let ParagraphChild::Run(run) = para_child {
                    for run_child in run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for p in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*p)));
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_body_text_is_flattened_verbatim() {
        let bytes = build_docx(&["Experienced engineer with 5 years in backend systems."]);
        let text = extract_text(&bytes).unwrap();
        assert_eq!(
            text.trim(),
            "Experienced engineer with 5 years in backend systems."
        );
    }

    #[test]
    fn test_paragraphs_become_lines_in_order() {
        let bytes = build_docx(&["First role", "Second role", "Third role"]);
        let text = extract_text(&bytes).unwrap();
        let lines: Vec<&str> = text.trim().lines().collect();
        assert_eq!(lines, vec!["First role", "Second role", "Third role"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let bytes = build_docx(&["Built Go services", "Led a team of four"]);
        let first = extract_text(&bytes).unwrap();
        let second = extract_text(&bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_garbage_bytes_are_malformed() {
        assert!(matches!(
            extract_text(b"\x00\x01\x02 nothing like a zip"),
            Err(DecodeError::Malformed(_))
        ));
    }
}
