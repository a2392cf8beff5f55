//! Labeled feature rows for offline model fitting.
//!
//! Ground truth is an outline record in the same shape the pipeline emits.
//! Extracted lines are joined against it by exact `(text, page)` key.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::features;
use crate::types::{Document, DocumentOutline, FontSize, Label};

/// A hand-labeled outline, deserialized from the output record format.
pub type GroundTruth = DocumentOutline;

/// One CSV row.  Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub text: String,
    pub font_size: FontSize,
    pub is_bold: u8,
    pub is_caps: u8,
    pub y_pos: f32,
    pub page: usize,
    pub text_length: usize,
    pub label: Label,
}

/// CSV header matching [`FeatureRow`].
pub const CSV_HEADER: [&str; 8] = [
    "text",
    "font_size",
    "is_bold",
    "is_caps",
    "y_pos",
    "page",
    "text_length",
    "label",
];

/// Lines shorter than this (in characters) are not emitted.
const MIN_TEXT_CHARS: usize = 2;

/// Label every normalized line of `document` from `ground_truth`.
///
/// A line takes the ground-truth level for its `(text, page)` key; failing
/// that, `Title` if its text equals the ground-truth title; otherwise
/// `Other`.
pub fn label_lines(document: &Document, ground_truth: &GroundTruth) -> Vec<FeatureRow> {
    let levels: HashMap<(&str, usize), Label> = ground_truth
        .outline
        .iter()
        .map(|h| ((h.text.trim(), h.page), Label::from(h.level)))
        .collect();
    let title = ground_truth.title.trim();

    document
        .lines()
        .filter(|line| line.text.chars().count() >= MIN_TEXT_CHARS)
        .map(|line| {
            let label = match levels.get(&(line.text.as_str(), line.page_number)) {
                Some(label) => *label,
                None if !title.is_empty() && line.text == title => Label::Title,
                None => Label::Other,
            };
            let f = features(&line);
            FeatureRow {
                font_size: line.avg_font_size,
                is_bold: f[1] as u8,
                is_caps: f[2] as u8,
                y_pos: line.y_position,
                page: line.page_number,
                text_length: line.text.chars().count(),
                text: line.text,
                label,
            }
        })
        .collect()
}
