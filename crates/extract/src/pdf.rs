// ABOUTME: PDF text extraction: reads a file and joins per-page text in page order.
// ABOUTME: Open, parse and reader-panic failures all come back as typed errors.

use std::panic;
use std::path::Path;

use tracing::{info, warn};

use crate::error::ExtractError;
use crate::extractors::ExtractorKind;
use crate::result::ExtractResult;

/// Joins page texts in order with one newline between consecutive pages.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits an in-memory PDF into per-page text.
///
/// The PDF reader panics on some malformed inputs; a panic is reported as a
/// parse error like any other format failure.
pub fn read_pages(bytes: &[u8], target: &str) -> Result<Vec<String>, ExtractError> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ExtractError::parse(
            target,
            "ReadPdf",
            Some(anyhow::anyhow!("failed to extract text from PDF: {e}")),
        )),
        Err(_) => {
            warn!(path = target, "PDF reader panicked");
            Err(ExtractError::parse(
                target,
                "ReadPdf",
                Some(anyhow::anyhow!("PDF reader panicked on malformed input")),
            ))
        }
    }
}

/// Extracts the text of every page of the PDF at `path`.
pub fn extract_text_from_pdf(path: impl AsRef<Path>) -> Result<ExtractResult, ExtractError> {
    let path = path.as_ref();
    let target = path.display().to_string();

    let bytes = std::fs::read(path)
        .map_err(|e| ExtractError::io(&target, "OpenPdf", Some(anyhow::Error::new(e))))?;
    let pages = read_pages(&bytes, &target)?;

    info!(path = %target, pages = pages.len(), "extracted PDF text");
    Ok(ExtractResult::new(
        target,
        ExtractorKind::Pdf,
        join_pages(pages.as_slice()),
    ))
}
