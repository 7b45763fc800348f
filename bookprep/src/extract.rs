//! Manuscript text loading: PDF extraction via pdftotext, or plain text as-is.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// Load the text of a manuscript, extracting it first when the input is a PDF.
pub fn load_text(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    if is_pdf(path) {
        extract_pdf_text(path)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Check if a path is a PDF file (case-insensitive)
fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Extract text with `pdftotext -layout -nopgbrk`, keeping line layout and
/// leaving out page-break characters.
pub fn extract_pdf_text(pdf_path: &Path) -> Result<String> {
    log::info!("Extracting text from {}...", pdf_path.display());

    let output = match Command::new("pdftotext")
        .args(["-layout", "-nopgbrk"])
        .arg(pdf_path)
        .arg("-")
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            anyhow::bail!("pdftotext not found. Ensure poppler-utils is installed.")
        }
        Err(e) => return Err(e).context("Failed to run pdftotext"),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("pdftotext failed: {}", stderr.trim());
    }

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    log::debug!("Extracted {} bytes of text", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("book.pdf")));
        assert!(is_pdf(Path::new("/tmp/BOOK.PDF")));
        assert!(!is_pdf(Path::new("book.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_load_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw_pdf_text.txt");
        std::fs::write(&path, "PROLOGUE\nHello.\n").unwrap();

        assert_eq!(load_text(&path).unwrap(), "PROLOGUE\nHello.\n");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_text(&dir.path().join("missing.pdf")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
