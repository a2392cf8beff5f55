//! Font-size to heading-level mapping.
//!
//! The canonical mapping is relative to each document: the distinct sizes of
//! the accepted candidates are ranked largest first and the top three become
//! H1, H2, and H3.  This compensates for documents set in globally small or
//! large type.  Static point thresholds remain available as a fallback.

use std::collections::BTreeSet;

use crate::config::{LevelConfig, LevelMode};
use crate::types::{FontSize, Heading, HeadingCandidate, HeadingLevel};

impl LevelConfig {
    /// Level from static point thresholds.
    pub fn absolute_level(&self, size: FontSize) -> HeadingLevel {
        if size >= FontSize::from_points(self.h1_min_size) {
            HeadingLevel::H1
        } else if size >= FontSize::from_points(self.h2_min_size) {
            HeadingLevel::H2
        } else {
            HeadingLevel::H3
        }
    }
}

/// Size-only level with the default thresholds (>=16 is H1, >=13 is H2).
pub fn classify_level(avg_font_size: FontSize) -> HeadingLevel {
    LevelConfig::default().absolute_level(avg_font_size)
}

/// Distinct candidate sizes, largest first.
pub fn ranked_sizes(candidates: &[HeadingCandidate]) -> Vec<FontSize> {
    let distinct: BTreeSet<FontSize> = candidates.iter().map(|c| c.avg_font_size).collect();
    distinct.into_iter().rev().collect()
}

/// Assign levels by ranking the distinct candidate sizes of one document.
///
/// Rank 0 is H1, rank 1 is H2, and every smaller size is H3.  Output order
/// matches input order.
pub fn assign_levels(candidates: &[HeadingCandidate]) -> Vec<Heading> {
    assign_levels_with(candidates, &LevelConfig::default())
}

/// Assign levels according to `config.mode`.
pub fn assign_levels_with(candidates: &[HeadingCandidate], config: &LevelConfig) -> Vec<Heading> {
    let ranked = ranked_sizes(candidates);
    let use_ranking = match config.mode {
        LevelMode::Ranked => true,
        LevelMode::Absolute => false,
        LevelMode::RankedWithFallback => ranked.len() >= 3,
    };

    candidates
        .iter()
        .map(|candidate| {
            let level = if use_ranking {
                let rank = ranked
                    .iter()
                    .position(|&size| size == candidate.avg_font_size)
                    .unwrap_or(ranked.len());
                HeadingLevel::from_rank(rank)
            } else {
                config.absolute_level(candidate.avg_font_size)
            };
            Heading {
                level,
                text: candidate.text.clone(),
                page: candidate.page_number,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, size: f32, page: usize) -> HeadingCandidate {
        HeadingCandidate {
            text: text.to_string(),
            avg_font_size: FontSize::from_points(size),
            page_number: page,
        }
    }

    fn levels(headings: &[Heading]) -> Vec<HeadingLevel> {
        headings.iter().map(|h| h.level).collect()
    }

    #[test]
    fn test_classify_level_thresholds() {
        assert_eq!(classify_level(FontSize::from_points(16.0)), HeadingLevel::H1);
        assert_eq!(classify_level(FontSize::from_points(15.99)), HeadingLevel::H2);
        assert_eq!(classify_level(FontSize::from_points(13.0)), HeadingLevel::H2);
        assert_eq!(classify_level(FontSize::from_points(12.99)), HeadingLevel::H3);
    }

    #[test]
    fn test_assign_levels_empty() {
        assert!(assign_levels(&[]).is_empty());
    }

    #[test]
    fn test_three_sizes_map_to_three_levels() {
        let candidates = vec![
            candidate("Part One", 20.0, 1),
            candidate("Background", 16.0, 1),
            candidate("Details", 12.0, 2),
            candidate("Part Two", 20.0, 3),
            candidate("Fine Print", 10.0, 3),
        ];
        let headings = assign_levels(&candidates);
        assert_eq!(
            levels(&headings),
            vec![
                HeadingLevel::H1,
                HeadingLevel::H2,
                HeadingLevel::H3,
                HeadingLevel::H1,
                HeadingLevel::H3,
            ]
        );
        assert_eq!(headings[2].page, 2);
        assert_eq!(headings[3].text, "Part Two");
    }

    #[test]
    fn test_ranking_is_relative_to_document() {
        // Small type throughout: the largest size is still H1.
        let candidates = vec![candidate("Overview", 11.0, 1), candidate("Scope", 9.5, 1)];
        assert_eq!(
            levels(&assign_levels(&candidates)),
            vec![HeadingLevel::H1, HeadingLevel::H2]
        );
    }

    #[test]
    fn test_single_size_only_h1() {
        let candidates = vec![candidate("A", 14.0, 1), candidate("B", 14.0, 2)];
        assert_eq!(
            levels(&assign_levels(&candidates)),
            vec![HeadingLevel::H1, HeadingLevel::H1]
        );
    }

    #[test]
    fn test_ranking_monotonic() {
        let sizes = [24.0, 18.0, 18.0, 14.0, 12.0, 24.0, 11.0];
        let candidates: Vec<_> = sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| candidate(&format!("H{i}"), s, 1))
            .collect();
        let headings = assign_levels(&candidates);
        for (a, ha) in candidates.iter().zip(&headings) {
            for (b, hb) in candidates.iter().zip(&headings) {
                if a.avg_font_size > b.avg_font_size {
                    assert!(ha.level <= hb.level);
                }
            }
        }
    }

    #[test]
    fn test_absolute_mode() {
        let config = LevelConfig {
            mode: LevelMode::Absolute,
            ..LevelConfig::default()
        };
        let candidates = vec![candidate("A", 11.0, 1), candidate("B", 9.0, 1)];
        assert_eq!(
            levels(&assign_levels_with(&candidates, &config)),
            vec![HeadingLevel::H3, HeadingLevel::H3]
        );
    }

    #[test]
    fn test_fallback_mode_uses_thresholds_below_three_sizes() {
        let config = LevelConfig {
            mode: LevelMode::RankedWithFallback,
            ..LevelConfig::default()
        };
        let two = vec![candidate("A", 14.0, 1), candidate("B", 12.0, 1)];
        assert_eq!(
            levels(&assign_levels_with(&two, &config)),
            vec![HeadingLevel::H2, HeadingLevel::H3]
        );

        let three = vec![
            candidate("A", 14.0, 1),
            candidate("B", 12.0, 1),
            candidate("C", 11.0, 1),
        ];
        assert_eq!(
            levels(&assign_levels_with(&three, &config)),
            vec![HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3]
        );
    }
}
