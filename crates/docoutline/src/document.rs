use std::path::Path;

use outline_core::{Document, DocumentOutline, Page, RawLine};
use serde::Serialize;

use crate::prelude::*;
use crate::settings::Settings;

/// Lift the layout source's pages into the core document model.  The line's
/// `top` is its vertical position.
pub fn to_document(pages: Vec<pdf::PageLines>) -> Document {
    Document::new(
        pages
            .into_iter()
            .map(|page| Page {
                number: page.number,
                lines: page
                    .lines
                    .into_iter()
                    .map(|line| RawLine {
                        text: line.text,
                        glyph_sizes: line.glyph_sizes,
                        glyph_fonts: line.glyph_fonts,
                        y: line.top,
                    })
                    .collect(),
            })
            .collect(),
    )
}

pub fn read_document(path: &Path) -> Result<Document, Error> {
    let pages = pdf::extract_file(path).map_err(|source| Error::DocumentRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(to_document(pages))
}

/// Read one PDF and infer its outline.  Blocking.
pub fn infer_outline(path: &Path, settings: &Settings) -> Result<DocumentOutline, Error> {
    let document = read_document(path)?;
    let outline = outline_core::process(&document, settings.classifier.as_ref(), &settings.config);

    log::info!(
        "{}: {} pages, title {:?}, {} headings",
        path.display(),
        document.pages.len(),
        outline.title,
        outline.outline.len()
    );

    Ok(outline)
}

/// Pretty JSON with 4-space indentation.  Non-ASCII text is written as is.
pub fn to_json(outline: &DocumentOutline) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    outline.serialize(&mut serializer)?;

    Ok(String::from_utf8(buffer)?)
}

pub fn write_outline(path: &Path, outline: &DocumentOutline) -> Result<()> {
    std::fs::write(path, to_json(outline)?)
        .wrap_err_with(|| f!("cannot write outline to {}", path.display()))
}
