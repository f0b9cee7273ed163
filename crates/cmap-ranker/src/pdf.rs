//! PDF text extraction using pdf-extract
//!
//! Reads the text of every page, in page order, as one string.

use std::path::Path;

use tracing::{debug, warn};

use cmap_core::{ConceptMapError, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";

fn read_error(path: &Path, reason: impl ToString) -> ConceptMapError {
    ConceptMapError::DocumentRead {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Concatenated page text of a PDF file
///
/// A PDF without extractable text yields an empty string. Unreadable files
/// and files that are not PDFs fail with `DocumentRead`.
pub fn read_pdf_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;

    if !bytes.starts_with(PDF_MAGIC) {
        return Err(read_error(path, "not a PDF file"));
    }

    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| read_error(path, e))?;

    if text.trim().is_empty() {
        warn!(path = %path.display(), "Document contains no extractable text");
        return Ok(String::new());
    }

    debug!(path = %path.display(), chars = text.chars().count(), "Extracted document text");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file() {
        let err = read_pdf_text("/nonexistent/paper.pdf").unwrap_err();
        match err {
            ConceptMapError::DocumentRead { path, .. } => assert_eq!(path, "/nonexistent/paper.pdf"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_non_pdf() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "The cat chased the mouse.").unwrap();

        let err = read_pdf_text(file.path()).unwrap_err();
        assert!(err.to_string().contains("not a PDF file"));
    }

    #[test]
    fn test_rejects_corrupt_pdf() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4\nthis is not a real document\n").unwrap();

        let err = read_pdf_text(file.path()).unwrap_err();
        assert!(matches!(err, ConceptMapError::DocumentRead { .. }));
    }
}
