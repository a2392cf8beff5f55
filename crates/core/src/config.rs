//! Tunable thresholds for outline inference.
//!
//! Every heuristic constant the pipeline uses lives here so it can be
//! recalibrated from a TOML file without code changes.  All fields default to
//! the values the pipeline was tuned with, so an empty file (or no file) is a
//! valid configuration.
//!
//! ```toml
//! [scoring]
//! min_score = 4
//!
//! [title]
//! source = "raw"
//!
//! [levels]
//! mode = "ranked_with_fallback"
//!
//! [noise]
//! labels = ["page", "date", "signature"]
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noise::NoiseFilter;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid noise pattern `{name}`: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("invalid value for `{field}`: {reason}")]
    Value { field: &'static str, reason: String },
}

/// Root configuration record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineConfig {
    pub noise: NoiseConfig,
    pub scoring: ScoringConfig,
    pub title: TitleConfig,
    pub levels: LevelConfig,
}

impl OutlineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: OutlineConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and compile every noise pattern once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        NoiseFilter::new(&self.noise)?;

        if !(0.0..=1.0).contains(&self.noise.min_alphanumeric_ratio) {
            return Err(ConfigError::Value {
                field: "noise.min_alphanumeric_ratio",
                reason: format!("{} is outside 0.0..=1.0", self.noise.min_alphanumeric_ratio),
            });
        }
        if self.scoring.max_words == 0 {
            return Err(ConfigError::Value {
                field: "scoring.max_words",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.scoring.min_score == 0 {
            return Err(ConfigError::Value {
                field: "scoring.min_score",
                reason: "a zero threshold accepts every line".to_string(),
            });
        }
        for (field, value) in [
            ("scoring.large_font_size", self.scoring.large_font_size),
            ("scoring.gap_threshold", self.scoring.gap_threshold),
            ("scoring.initial_prev_y", self.scoring.initial_prev_y),
            ("title.min_y", self.title.min_y),
            ("levels.h1_min_size", self.levels.h1_min_size),
            ("levels.h2_min_size", self.levels.h2_min_size),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Value {
                    field,
                    reason: "must be a finite number".to_string(),
                });
            }
        }
        if self.levels.h2_min_size > self.levels.h1_min_size {
            return Err(ConfigError::Value {
                field: "levels.h2_min_size",
                reason: format!(
                    "{} is above levels.h1_min_size ({})",
                    self.levels.h2_min_size, self.levels.h1_min_size
                ),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Noise filter
// ---------------------------------------------------------------------------

/// Patterns and vocabulary for the noise filter.
///
/// Rules are evaluated in the order the fields are declared.  `keep_pattern`
/// wins over every rejection rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    pub keep_pattern: String,
    pub digit_run_pattern: String,
    pub sentence_end_pattern: String,
    /// Only reached for numbers `digit_run_pattern` lets through, so with
    /// the default digit run it never fires on its own.
    pub long_number_pattern: String,
    pub alphanumeric_id_pattern: String,
    /// Searched anywhere in the line.  Numbered subsections ("2.1 Scope")
    /// match too; anchor the pattern to keep them.
    pub version_pattern: String,
    pub url_pattern: String,
    pub email_pattern: String,
    pub date_patterns: Vec<String>,
    pub address_pattern: String,
    pub trailing_punctuation_pattern: String,
    /// Lines whose alphanumeric share of non-space characters falls below
    /// this ratio are decoration.
    pub min_alphanumeric_ratio: f32,
    /// Exact, case-insensitive label lines.
    pub labels: Vec<String>,
    /// Lowercase lines with at most this many words are rejected.
    pub max_lowercase_words: usize,
}

const MONTHS: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            keep_pattern: r"(?i)^\s*(?:section|chapter|appendix|article)\s+(?:\d+(?:\.\d+)*|[ivxlc]+|[a-z])\b"
                .to_string(),
            digit_run_pattern: r"(?:\d[\s\-./()+]?){5,}".to_string(),
            sentence_end_pattern: r"\.\s*$".to_string(),
            long_number_pattern: r"\b\d{5,}\b".to_string(),
            alphanumeric_id_pattern: r"\b[A-Za-z]{1,4}-?\d{4,}\b".to_string(),
            version_pattern: r"\d+(?:\.\d+)+".to_string(),
            url_pattern: r"(?i)\b(?:https?://|ftp://|www\.)\S+".to_string(),
            email_pattern: r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}".to_string(),
            date_patterns: vec![
                r"\b\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}\b".to_string(),
                r"\b\d{4}[/\-]\d{1,2}[/\-]\d{1,2}\b".to_string(),
                format!(r"(?i)\b(?:{MONTHS})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,\s*|\s+)\d{{4}}\b"),
                format!(r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})\.?,?\s+\d{{4}}\b"),
                r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december),?\s+\d{4}\b"
                    .to_string(),
            ],
            address_pattern: r"^\d+\s+(?:[A-Z][a-z]+\.?,?\s*){2,}".to_string(),
            trailing_punctuation_pattern: r"[\p{P}\p{S}]{3,}\s*$".to_string(),
            min_alphanumeric_ratio: 0.3,
            labels: [
                "page",
                "date",
                "signature",
                "name",
                "email",
                "rsvp",
                "form",
                "attachment",
                "document",
                "form type",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_lowercase_words: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Heuristic scoring
// ---------------------------------------------------------------------------

/// Weights and thresholds for the heuristic heading score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Lines with more whitespace-delimited words than this never qualify.
    pub max_words: usize,
    pub large_font_size: f32,
    pub large_font_points: u32,
    pub bold_points: u32,
    pub uppercase_points: u32,
    /// Vertical distance from the previous line that counts as isolation.
    pub gap_threshold: f32,
    pub gap_points: u32,
    pub min_score: u32,
    /// `prev_y` before the first line of a document.  Calibrated for PDF user
    /// space, where the top of a letter page sits near 792.
    pub initial_prev_y: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            max_words: 15,
            large_font_size: 14.0,
            large_font_points: 2,
            bold_points: 2,
            uppercase_points: 1,
            gap_threshold: 20.0,
            gap_points: 1,
            min_score: 3,
            initial_prev_y: 1000.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Title
// ---------------------------------------------------------------------------

/// Which page-one lines feed the title resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// Every normalized page-one line.
    Raw,
    /// Page-one lines that pass the noise filter and sit at or above
    /// `min_y`.
    #[default]
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleConfig {
    pub source: TitleSource,
    /// Lines below this vertical position (footer margin) are not title
    /// candidates in `filtered` mode.
    pub min_y: f32,
    /// Title reported by the model strategy when no line is labeled `Title`.
    pub untitled: String,
}

impl Default for TitleConfig {
    fn default() -> Self {
        TitleConfig {
            source: TitleSource::Filtered,
            min_y: 100.0,
            untitled: "Untitled Document".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelMode {
    /// Rank distinct candidate sizes per document.
    #[default]
    Ranked,
    /// Static size thresholds.
    Absolute,
    /// Ranked when the document has at least three distinct candidate sizes,
    /// static thresholds otherwise.
    RankedWithFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    pub mode: LevelMode,
    pub h1_min_size: f32,
    pub h2_min_size: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig {
            mode: LevelMode::Ranked,
            h1_min_size: 16.0,
            h2_min_size: 13.0,
        }
    }
}
