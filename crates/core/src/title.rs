use std::collections::BTreeMap;

use crate::types::FontSize;

/// Page-one texts grouped by font size, each list in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOneSizes(BTreeMap<FontSize, Vec<String>>);

impl PageOneSizes {
    pub fn record(&mut self, size: FontSize, text: impl Into<String>) {
        self.0.entry(size).or_default().push(text.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn largest(&self) -> Option<(FontSize, &[String])> {
        self.0
            .last_key_value()
            .map(|(size, texts)| (*size, texts.as_slice()))
    }
}

/// The first text recorded at the largest page-one font size, or `""` when
/// page one had no usable text.
pub fn resolve_title(first_page_lines_by_size: &PageOneSizes) -> String {
    first_page_lines_by_size
        .largest()
        .and_then(|(_, texts)| texts.first())
        .cloned()
        .unwrap_or_default()
}
