//! Heuristic heading classifier.
//!
//! A coarse linear score over four independent signals: large type, a bold
//! face, all-caps text, and vertical isolation from the previous line.  With
//! the default weights the maximum is 6 and a line needs 3 to qualify.

use crate::classifier::{Classification, HeadingClassifier};
use crate::config::{ConfigError, NoiseConfig, ScoringConfig, TitleConfig};
use crate::noise::NoiseFilter;
use crate::title::{resolve_title, PageOneSizes};
use crate::types::{FontSize, TextLine};

#[derive(Debug, Clone, Default)]
pub struct HeadingScorer {
    config: ScoringConfig,
}

impl HeadingScorer {
    pub fn new(config: ScoringConfig) -> Self {
        HeadingScorer { config }
    }

    /// Total points for `line`.  Lines longer than `max_words` score zero.
    pub fn points(&self, line: &TextLine, prev_y: f32) -> u32 {
        if line.word_count() > self.config.max_words {
            return 0;
        }

        let mut score = 0;
        if line.avg_font_size >= FontSize::from_points(self.config.large_font_size) {
            score += self.config.large_font_points;
        }
        if line.is_bold() {
            score += self.config.bold_points;
        }
        if line.is_uppercase() {
            score += self.config.uppercase_points;
        }
        if (prev_y - line.y_position).abs() > self.config.gap_threshold {
            score += self.config.gap_points;
        }
        score
    }

    /// Whether `line` qualifies as a heading candidate.
    pub fn score(&self, line: &TextLine, prev_y: f32) -> bool {
        line.word_count() <= self.config.max_words
            && self.points(line, prev_y) >= self.config.min_score
    }
}

/// Noise filter plus [`HeadingScorer`]; levels come from the document-wide
/// size ranking.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    filter: NoiseFilter,
    scorer: HeadingScorer,
}

impl HeuristicClassifier {
    pub fn new(noise: &NoiseConfig, scoring: &ScoringConfig) -> Result<Self, ConfigError> {
        Ok(HeuristicClassifier {
            filter: NoiseFilter::new(noise)?,
            scorer: HeadingScorer::new(scoring.clone()),
        })
    }

    pub fn filter(&self) -> &NoiseFilter {
        &self.filter
    }

    pub fn scorer(&self) -> &HeadingScorer {
        &self.scorer
    }
}

impl HeadingClassifier for HeuristicClassifier {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn classify(&self, line: &TextLine, prev_y: f32) -> Classification {
        if self.filter.is_noise(&line.text) {
            Classification::Noise
        } else if self.scorer.score(line, prev_y) {
            Classification::Candidate
        } else {
            Classification::Ignored
        }
    }

    fn fallback_title(
        &self,
        page_one: &PageOneSizes,
        has_headings: bool,
        _config: &TitleConfig,
    ) -> String {
        if !has_headings {
            return String::new();
        }
        resolve_title(page_one)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn line(text: &str, size: f32, font: &str, y: f32) -> TextLine {
        TextLine {
            text: text.to_string(),
            avg_font_size: FontSize::from_points(size),
            font_styles: BTreeSet::from([font.to_string()]),
            y_position: y,
            page_number: 1,
        }
    }

    fn classifier() -> HeuristicClassifier {
        HeuristicClassifier::new(&NoiseConfig::default(), &ScoringConfig::default()).unwrap()
    }

    #[test]
    fn test_all_signals_score_six() {
        let scorer = HeadingScorer::default();
        let l = line("INTRODUCTION", 14.0, "Arial-BoldMT", 700.0);
        assert_eq!(scorer.points(&l, 721.0), 6);
        assert!(scorer.score(&l, 721.0));
    }

    #[test]
    fn test_no_signals_score_zero() {
        let scorer = HeadingScorer::default();
        let l = line("Introduction", 13.9, "ArialMT", 700.0);
        assert_eq!(scorer.points(&l, 720.0), 0);
        assert!(!scorer.score(&l, 720.0));
    }

    #[test]
    fn test_gap_is_strictly_greater_than_threshold() {
        let scorer = HeadingScorer::default();
        let l = line("Intro", 10.0, "Times", 500.0);
        assert_eq!(scorer.points(&l, 520.0), 0);
        assert_eq!(scorer.points(&l, 520.5), 1);
        // Direction does not matter.
        assert_eq!(scorer.points(&l, 479.0), 1);
    }

    #[test]
    fn test_threshold_is_three() {
        let scorer = HeadingScorer::default();
        // Bold alone: 2 points.
        let bold = line("Methods", 11.0, "Times-Bold", 500.0);
        assert!(!scorer.score(&bold, 510.0));
        // Bold plus isolation: 3 points.
        assert!(scorer.score(&bold, 540.0));
    }

    #[test]
    fn test_long_lines_never_qualify() {
        let scorer = HeadingScorer::default();
        let text = "ONE TWO THREE FOUR FIVE SIX SEVEN EIGHT NINE TEN ELEVEN TWELVE THIRTEEN FOURTEEN FIFTEEN SIXTEEN";
        let l = line(text, 20.0, "Helvetica-Bold", 100.0);
        assert_eq!(scorer.points(&l, 900.0), 0);
        assert!(!scorer.score(&l, 900.0));
    }

    #[test]
    fn test_custom_weights() {
        let scorer = HeadingScorer::new(ScoringConfig {
            min_score: 1,
            ..ScoringConfig::default()
        });
        let l = line("NOTES", 10.0, "Times", 500.0);
        assert!(scorer.score(&l, 505.0));
    }

    #[test]
    fn test_classifier_reports_noise_before_scoring() {
        let c = classifier();
        let l = line("https://example.com", 20.0, "Arial-Bold", 500.0);
        assert_eq!(c.classify(&l, 900.0), Classification::Noise);
    }

    #[test]
    fn test_classifier_candidate_and_ignored() {
        let c = classifier();
        assert_eq!(
            c.classify(&line("1. Introduction", 14.0, "Arial-Bold", 675.0), 700.0),
            Classification::Candidate
        );
        assert_eq!(
            c.classify(&line("Body text continues", 11.0, "Arial", 660.0), 675.0),
            Classification::Ignored
        );
    }

    #[test]
    fn test_fallback_title_empty_without_headings() {
        let c = classifier();
        let mut sizes = PageOneSizes::default();
        sizes.record(FontSize::from_points(18.0), "Report");
        let config = TitleConfig::default();
        assert_eq!(c.fallback_title(&sizes, false, &config), "");
        assert_eq!(c.fallback_title(&sizes, true, &config), "Report");
    }
}
