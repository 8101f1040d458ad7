use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use super::ExtractError;

/// Extracts the top-level body paragraphs in document order, one line per
/// paragraph. Run formatting is dropped; tabs and line breaks inside a
/// paragraph are kept as `\t` and `\n`.
pub fn extract(content: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(content)
        .map_err(|e| ExtractError::DocumentCorrupt(format!("Failed to read DOCX: {e}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => text.push_str(&paragraph_text(&link.children)),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn build_docx(docx: Docx) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_paragraphs_are_joined_with_newlines() {
        let bytes = build_docx(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Jane Doe")))
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Backend Engineer"))),
        );
        assert_eq!(extract(&bytes).unwrap(), "Jane Doe\nBackend Engineer");
    }

    #[test]
    fn test_runs_inside_a_paragraph_are_concatenated() {
        let bytes = build_docx(
            Docx::new().add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Kuber").bold())
                    .add_run(Run::new().add_text("netes")),
            ),
        );
        assert_eq!(extract(&bytes).unwrap(), "Kubernetes");
    }

    #[test]
    fn test_empty_paragraph_keeps_its_line() {
        let bytes = build_docx(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Skills")))
                .add_paragraph(Paragraph::new())
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Rust"))),
        );
        assert_eq!(extract(&bytes).unwrap(), "Skills\n\nRust");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let bytes = build_docx(
            Docx::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Go, SQL"))),
        );
        assert_eq!(extract(&bytes).unwrap(), extract(&bytes).unwrap());
    }

    #[test]
    fn test_non_zip_bytes_are_corrupt() {
        let err = extract(b"plain text pretending to be docx").unwrap_err();
        assert!(matches!(err, ExtractError::DocumentCorrupt(_)));
    }
}
