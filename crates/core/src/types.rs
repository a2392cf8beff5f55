use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Font sizes
// ---------------------------------------------------------------------------

/// A font size quantised to hundredths of a point.
///
/// Line sizes are averaged and rounded to two decimals, so storing them as
/// integer centipoints gives a totally ordered, hashable key that compares
/// exactly (`13.9` is strictly below `14.0`, no float drift).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(u32);

impl FontSize {
    /// Round a size in points to the nearest hundredth.  Negative and
    /// non-finite inputs collapse to zero.
    pub fn from_points(points: f32) -> Self {
        if !points.is_finite() || points <= 0.0 {
            return FontSize(0);
        }
        FontSize((f64::from(points) * 100.0).round() as u32)
    }

    /// Mean of a set of glyph sizes, rounded to two decimals.
    ///
    /// Returns `None` for an empty slice.
    pub fn mean(sizes: &[f32]) -> Option<Self> {
        if sizes.is_empty() {
            return None;
        }
        let sum: f64 = sizes.iter().map(|&s| f64::from(s)).sum();
        let avg = sum / sizes.len() as f64;
        if !avg.is_finite() || avg <= 0.0 {
            return Some(FontSize(0));
        }
        Some(FontSize((avg * 100.0).round() as u32))
    }

    pub fn points(self) -> f32 {
        self.0 as f32 / 100.0
    }

    pub fn centipoints(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{whole}.{}", frac / 10)
        } else {
            write!(f, "{whole}.{frac:02}")
        }
    }
}

impl Serialize for FontSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(f64::from(self.0) / 100.0)
    }
}

impl<'de> Deserialize<'de> for FontSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = f64::deserialize(deserializer)?;
        Ok(FontSize::from_points(points as f32))
    }
}

// ---------------------------------------------------------------------------
// Levels and labels
// ---------------------------------------------------------------------------

/// Hierarchical rank of an emitted heading.  `H1` is the coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a zero-based size rank to a level.  Everything past the second
    /// rank folds into `H3`.
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic label produced by the model-based classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Title,
    H1,
    H2,
    H3,
    Other,
}

impl Label {
    /// The heading level this label emits into the outline, if any.
    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self {
            Label::H1 => Some(HeadingLevel::H1),
            Label::H2 => Some(HeadingLevel::H2),
            Label::H3 => Some(HeadingLevel::H3),
            Label::Title | Label::Other => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Title => "Title",
            Label::H1 => "H1",
            Label::H2 => "H2",
            Label::H3 => "H3",
            Label::Other => "Other",
        }
    }
}

impl From<HeadingLevel> for Label {
    fn from(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H1 => Label::H1,
            HeadingLevel::H2 => Label::H2,
            HeadingLevel::H3 => Label::H3,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown label `{0}` (expected Title, H1, H2, H3 or Other)")]
pub struct InvalidLabel(pub String);

impl FromStr for Label {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Title" => Ok(Label::Title),
            "H1" => Ok(Label::H1),
            "H2" => Ok(Label::H2),
            "H3" => Ok(Label::H3),
            "Other" => Ok(Label::Other),
            other => Err(InvalidLabel(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout input
// ---------------------------------------------------------------------------

/// One text line as delivered by the layout source, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLine {
    pub text: String,
    pub glyph_sizes: Vec<f32>,
    pub glyph_fonts: Vec<String>,
    /// Top of the line's bounding box in page space.
    pub y: f32,
}

/// An ordered sequence of raw lines on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub lines: Vec<RawLine>,
}

/// A whole document as an ordered sequence of pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Document { pages }
    }

    /// Normalized lines in encounter order (page-major, then the layout
    /// source's reading order).  Lines without text or glyph data are
    /// skipped.
    pub fn lines(&self) -> impl Iterator<Item = TextLine> + '_ {
        self.pages.iter().flat_map(|page| {
            page.lines
                .iter()
                .filter_map(move |raw| TextLine::normalize(raw, page.number))
        })
    }
}

// ---------------------------------------------------------------------------
// Normalized line
// ---------------------------------------------------------------------------

/// A normalized text line carrying the typographic signals the classifiers
/// read.  `text` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub avg_font_size: FontSize,
    pub font_styles: BTreeSet<String>,
    pub y_position: f32,
    pub page_number: usize,
}

impl TextLine {
    /// Build a `TextLine` from a raw layout line.
    ///
    /// Returns `None` when the trimmed text is empty or the line carries no
    /// glyph sizes.
    pub fn normalize(raw: &RawLine, page_number: usize) -> Option<Self> {
        let text = raw.text.trim();
        if text.is_empty() {
            return None;
        }
        let avg_font_size = FontSize::mean(&raw.glyph_sizes)?;
        let font_styles = raw
            .glyph_fonts
            .iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect();

        Some(TextLine {
            text: text.to_string(),
            avg_font_size,
            font_styles,
            y_position: raw.y,
            page_number,
        })
    }

    /// Any font name contains "bold", ignoring case.
    pub fn is_bold(&self) -> bool {
        self.font_styles
            .iter()
            .any(|name| name.to_lowercase().contains("bold"))
    }

    pub fn is_uppercase(&self) -> bool {
        is_upper(&self.text)
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// At least one cased character and no lowercase ones.
pub fn is_upper(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// At least one cased character and no uppercase ones.
pub fn is_lower(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            cased = true;
        }
    }
    cased
}

// ---------------------------------------------------------------------------
// Outline output
// ---------------------------------------------------------------------------

/// A line that survived noise filtering and scored as a heading, waiting
/// for its level.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    pub text: String,
    pub avg_font_size: FontSize,
    pub page_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub text: String,
    pub page: usize,
}

/// The per-document output record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<Heading>,
}
