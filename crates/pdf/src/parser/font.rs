//! Font resources and string decoding.
//!
//! Text-showing operators carry raw character codes.  lopdf resolves each
//! font's encoding (its `ToUnicode` CMap when one exists, otherwise the
//! declared base encoding) and decodes the codes with it.

use lopdf::Encoding;

use super::backend::decode_text_simple;

/// A font referenced from a page's resource dictionary.  Borrows its
/// encoding from the document it was read from.
pub struct FontInfo<'a> {
    /// Resource key as used by `Tf` (e.g. `b"F1"`).
    pub key: Vec<u8>,
    /// `/BaseFont` name, subset prefix included.
    pub base_font: String,
    /// `None` when lopdf could not resolve an encoding for the font.
    pub encoding: Option<Encoding<'a>>,
}

impl<'a> FontInfo<'a> {
    pub fn new(
        key: impl Into<Vec<u8>>,
        base_font: impl Into<String>,
        encoding: Option<Encoding<'a>>,
    ) -> Self {
        FontInfo {
            key: key.into(),
            base_font: base_font.into(),
            encoding,
        }
    }

    /// Decode the bytes of one string operand.  Codes the encoding cannot
    /// map fall back to UTF-16/UTF-8/Latin-1 sniffing.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let Some(encoding) = &self.encoding else {
            return decode_text_simple(bytes);
        };
        match lopdf::Document::decode_text(encoding, bytes) {
            Ok(text) => text,
            Err(e) => {
                log::trace!("font {}: {e}", self.base_font);
                decode_text_simple(bytes)
            }
        }
    }
}
