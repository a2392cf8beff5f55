//! Structural noise filter.
//!
//! Headings are short, visually distinct, and rarely end sentences or encode
//! structured data.  The filter rejects lines that look like identifiers,
//! dates, links, decoration, or form labels, trading recall for precision so
//! boilerplate never reaches the outline.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::{ConfigError, NoiseConfig};
use crate::types::is_lower;

/// The rule that rejected a line.  Variants are listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseReason {
    Blank,
    DigitRun,
    SentenceEnd,
    LongNumber,
    AlphanumericId,
    VersionNumber,
    Url,
    Email,
    Date,
    Address,
    TrailingPunctuation,
    Decoration,
    Label,
    ShortLowercase,
}

impl NoiseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseReason::Blank => "blank",
            NoiseReason::DigitRun => "digit_run",
            NoiseReason::SentenceEnd => "sentence_end",
            NoiseReason::LongNumber => "long_number",
            NoiseReason::AlphanumericId => "alphanumeric_id",
            NoiseReason::VersionNumber => "version_number",
            NoiseReason::Url => "url",
            NoiseReason::Email => "email",
            NoiseReason::Date => "date",
            NoiseReason::Address => "address",
            NoiseReason::TrailingPunctuation => "trailing_punctuation",
            NoiseReason::Decoration => "decoration",
            NoiseReason::Label => "label",
            NoiseReason::ShortLowercase => "short_lowercase",
        }
    }
}

impl fmt::Display for NoiseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled [`NoiseConfig`].
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    keep: Regex,
    pattern_rules: Vec<(NoiseReason, Regex)>,
    address: Regex,
    trailing_punctuation: Regex,
    min_alphanumeric_ratio: f32,
    labels: HashSet<String>,
    max_lowercase_words: usize,
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern { name, source })
}

impl NoiseFilter {
    pub fn new(config: &NoiseConfig) -> Result<Self, ConfigError> {
        let mut pattern_rules = vec![
            (
                NoiseReason::DigitRun,
                compile("digit_run_pattern", &config.digit_run_pattern)?,
            ),
            (
                NoiseReason::SentenceEnd,
                compile("sentence_end_pattern", &config.sentence_end_pattern)?,
            ),
            (
                NoiseReason::LongNumber,
                compile("long_number_pattern", &config.long_number_pattern)?,
            ),
            (
                NoiseReason::AlphanumericId,
                compile("alphanumeric_id_pattern", &config.alphanumeric_id_pattern)?,
            ),
            (
                NoiseReason::VersionNumber,
                compile("version_pattern", &config.version_pattern)?,
            ),
            (NoiseReason::Url, compile("url_pattern", &config.url_pattern)?),
            (
                NoiseReason::Email,
                compile("email_pattern", &config.email_pattern)?,
            ),
        ];
        for pattern in &config.date_patterns {
            pattern_rules.push((NoiseReason::Date, compile("date_patterns", pattern)?));
        }

        Ok(NoiseFilter {
            keep: compile("keep_pattern", &config.keep_pattern)?,
            pattern_rules,
            address: compile("address_pattern", &config.address_pattern)?,
            trailing_punctuation: compile(
                "trailing_punctuation_pattern",
                &config.trailing_punctuation_pattern,
            )?,
            min_alphanumeric_ratio: config.min_alphanumeric_ratio,
            labels: config
                .labels
                .iter()
                .map(|label| label.trim().to_lowercase())
                .collect(),
            max_lowercase_words: config.max_lowercase_words,
        })
    }

    /// The first rule that rejects `text`, or `None` when the line may be a
    /// heading.
    pub fn classify(&self, text: &str) -> Option<NoiseReason> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Some(NoiseReason::Blank);
        }
        if self.keep.is_match(trimmed) {
            return None;
        }

        if let Some((reason, _)) = self
            .pattern_rules
            .iter()
            .find(|(_, regex)| regex.is_match(trimmed))
        {
            return Some(*reason);
        }

        if self.address.is_match(trimmed) {
            return Some(NoiseReason::Address);
        }
        if self.trailing_punctuation.is_match(trimmed) {
            return Some(NoiseReason::TrailingPunctuation);
        }
        if self.is_decoration(trimmed) {
            return Some(NoiseReason::Decoration);
        }
        if self.labels.contains(&trimmed.to_lowercase()) {
            return Some(NoiseReason::Label);
        }
        if trimmed.split_whitespace().count() <= self.max_lowercase_words && is_lower(trimmed) {
            return Some(NoiseReason::ShortLowercase);
        }

        None
    }

    pub fn is_noise(&self, text: &str) -> bool {
        self.classify(text).is_some()
    }

    fn is_decoration(&self, text: &str) -> bool {
        let mut visible = 0usize;
        let mut alphanumeric = 0usize;
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            visible += 1;
            if c.is_alphanumeric() {
                alphanumeric += 1;
            }
        }
        visible > 0 && (alphanumeric as f32 / visible as f32) < self.min_alphanumeric_ratio
    }
}

/// The filter built from [`NoiseConfig::default`].
pub fn default_filter() -> &'static NoiseFilter {
    static FILTER: OnceLock<NoiseFilter> = OnceLock::new();
    FILTER.get_or_init(|| {
        NoiseFilter::new(&NoiseConfig::default()).expect("default noise patterns compile")
    })
}

/// Whether `text` is structurally unlikely to be a heading, using the default
/// rules.
pub fn is_noise(text: &str) -> bool {
    default_filter().is_noise(text)
}
