//! PDF layout source.
//!
//! Opens a PDF with lopdf, walks every page's content stream with a text
//! state machine, and returns the page's text lines in reading order (top to
//! bottom, then left to right) with per-glyph font sizes and font names.
//! There is no table, column, or image reconstruction.

use std::path::Path;

use thiserror::Error;

use parser::backend::{LopdfBackend, PdfBackend};

pub mod cleanup;
pub mod parser;

pub use parser::layout::LayoutLine;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The lines of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLines {
    /// 1-based page number.
    pub number: usize,
    pub lines: Vec<LayoutLine>,
}

/// Extract the text lines of every page.
pub fn extract_lines(bytes: &[u8]) -> Result<Vec<PageLines>, PdfError> {
    let backend = LopdfBackend::load_bytes(bytes)?;
    extract_with(&backend)
}

/// Read a file and extract its text lines.
pub fn extract_file(path: impl AsRef<Path>) -> Result<Vec<PageLines>, PdfError> {
    let bytes = std::fs::read(path)?;
    extract_lines(&bytes)
}

/// Extract lines through any [`PdfBackend`].
///
/// A page whose font table cannot be read is decoded without font
/// information; a page whose content stream cannot be decoded fails the
/// document.
pub fn extract_with(backend: &dyn PdfBackend) -> Result<Vec<PageLines>, PdfError> {
    let pages = backend.pages();
    let mut result = Vec::with_capacity(pages.len());

    for (&number, &page_id) in &pages {
        let ops = backend.page_operations(page_id)?;
        let fonts = backend.page_fonts(page_id).unwrap_or_else(|e| {
            log::debug!("page {number}: {e}; decoding without font tables");
            Vec::new()
        });

        let spans = parser::layout::extract_page_spans(&ops, &fonts);
        let lines = parser::layout::group_spans_into_lines(spans);
        log::trace!("page {number}: {} lines", lines.len());

        result.push(PageLines {
            number: number as usize,
            lines,
        });
    }

    Ok(result)
}
