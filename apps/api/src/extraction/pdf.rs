use super::ExtractError;

/// Extracts each page's text layer in document order and concatenates the
/// pages without a separator. Pages with no text contribute an empty segment.
pub fn extract(content: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(content)
        .map_err(|e| ExtractError::DocumentCorrupt(format!("Failed to read PDF: {e}")))?;

    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}
