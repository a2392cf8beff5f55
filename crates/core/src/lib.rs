//! Core library for docoutline
//!
//! This crate implements the **Functional Core** of docoutline: it turns
//! positioned text lines into a document outline (a title plus H1/H2/H3
//! headings with page numbers) without touching the filesystem or a PDF
//! parser.  The `docoutline` binary is the Imperative Shell that reads files,
//! loads model artifacts, and writes JSON.
//!
//! # Pipeline
//!
//! Every document goes through one pass, leaves first:
//!
//! 1. [`types::TextLine::normalize`]: raw layout line to trimmed text, average
//!    font size, and font names.
//! 2. [`noise::NoiseFilter`]: rejects phone numbers, dates, URLs, sentences,
//!    labels, and other lines that are structurally unlikely to be headings.
//! 3. A [`classifier::HeadingClassifier`]: either the
//!    [`heuristic::HeuristicClassifier`] score or the
//!    [`model::ModelClassifier`] decision forest.
//! 4. [`levels::assign_levels`]: ranks the distinct candidate font sizes of
//!    the document into H1/H2/H3.
//! 5. [`title::resolve_title`]: the first page-one text at the largest size.
//! 6. [`outline::build`]: the `{title, outline}` record in encounter order.
//!
//! [`outline::process`] runs all of the above.  [`training::label_lines`]
//! joins extracted lines against a hand-labeled outline to produce feature
//! rows for fitting the model offline.
//!
//! # Example Usage
//!
//! ```rust
//! use outline_core::{
//!     process, Document, HeuristicClassifier, OutlineConfig, Page, RawLine,
//! };
//!
//! let config = OutlineConfig::default();
//! let classifier = HeuristicClassifier::new(&config.noise, &config.scoring).unwrap();
//!
//! let line = |text: &str, size: f32, y: f32| RawLine {
//!     text: text.to_string(),
//!     glyph_sizes: vec![size; text.len()],
//!     glyph_fonts: vec!["Helvetica-Bold".to_string(); text.len()],
//!     y,
//! };
//! let document = Document::new(vec![Page {
//!     number: 1,
//!     lines: vec![line("ANNUAL REPORT", 18.0, 700.0), line("1. Introduction", 14.0, 675.0)],
//! }]);
//!
//! let outline = process(&document, &classifier, &config);
//! assert_eq!(outline.title, "ANNUAL REPORT");
//! assert_eq!(outline.outline[0].text, "1. Introduction");
//! ```

pub mod classifier;
pub mod config;
pub mod heuristic;
pub mod levels;
pub mod model;
pub mod noise;
pub mod outline;
pub mod title;
pub mod training;
pub mod types;

pub use classifier::{Classification, HeadingClassifier};
pub use config::{
    ConfigError, LevelConfig, LevelMode, NoiseConfig, OutlineConfig, ScoringConfig, TitleConfig,
    TitleSource,
};
pub use heuristic::{HeadingScorer, HeuristicClassifier};
pub use levels::{assign_levels, assign_levels_with, classify_level};
pub use model::{ForestModel, LabelDecoder, ModelClassifier, ModelLoadError};
pub use noise::{is_noise, NoiseFilter, NoiseReason};
pub use outline::{build, process};
pub use title::{resolve_title, PageOneSizes};
pub use training::{label_lines, FeatureRow, GroundTruth};
pub use types::{
    Document, DocumentOutline, FontSize, Heading, HeadingCandidate, HeadingLevel, Label, Page,
    RawLine, TextLine,
};
