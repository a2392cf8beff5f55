//! Single-pass outline inference over one document.

use crate::classifier::{Classification, HeadingClassifier};
use crate::config::{OutlineConfig, TitleSource};
use crate::levels::assign_levels_with;
use crate::title::PageOneSizes;
use crate::types::{Document, DocumentOutline, Heading, HeadingCandidate, Label};

/// Assemble the output record.  `headings` must already be in encounter
/// order.
pub fn build(title: impl Into<String>, headings: Vec<Heading>) -> DocumentOutline {
    DocumentOutline {
        title: title.into(),
        outline: headings,
    }
}

/// A position in the outline whose level may still be pending.
enum Slot {
    Pending(HeadingCandidate),
    Fixed(Heading),
}

/// Infer the title and outline of `document`.
///
/// All state is local to this call, so documents can be processed
/// concurrently with a shared classifier.  The result depends only on the
/// inputs.
pub fn process(
    document: &Document,
    classifier: &dyn HeadingClassifier,
    config: &OutlineConfig,
) -> DocumentOutline {
    let mut prev_y = config.scoring.initial_prev_y;
    let mut page_one = PageOneSizes::default();
    let mut slots: Vec<Slot> = Vec::new();
    let mut labeled_title: Option<String> = None;

    for line in document.lines() {
        let classification = classifier.classify(&line, prev_y);

        if line.page_number == 1 {
            let record = match config.title.source {
                TitleSource::Raw => true,
                TitleSource::Filtered => {
                    classification != Classification::Noise
                        && line.y_position >= config.title.min_y
                }
            };
            if record {
                page_one.record(line.avg_font_size, line.text.clone());
            }
        }

        match classification {
            Classification::Noise => {
                log::trace!("noise on page {}: {:?}", line.page_number, line.text);
                continue;
            }
            Classification::Ignored => {}
            Classification::Candidate => slots.push(Slot::Pending(HeadingCandidate {
                text: line.text.clone(),
                avg_font_size: line.avg_font_size,
                page_number: line.page_number,
            })),
            Classification::Labeled(label) => match label.heading_level() {
                Some(level) => slots.push(Slot::Fixed(Heading {
                    level,
                    text: line.text.clone(),
                    page: line.page_number,
                })),
                None if label == Label::Title && labeled_title.is_none() => {
                    labeled_title = Some(line.text.clone());
                }
                None => {}
            },
        }

        prev_y = line.y_position;
    }

    let title = match labeled_title {
        Some(title) => title,
        None => {
            let title = classifier.fallback_title(&page_one, !slots.is_empty(), &config.title);
            // The title line itself is not repeated in the outline.
            if !title.is_empty() {
                if let Some(index) = slots.iter().position(|slot| {
                    matches!(slot, Slot::Pending(c) if c.page_number == 1 && c.text == title)
                }) {
                    slots.remove(index);
                }
            }
            title
        }
    };

    let candidates: Vec<HeadingCandidate> = slots
        .iter()
        .filter_map(|slot| match slot {
            Slot::Pending(candidate) => Some(candidate.clone()),
            Slot::Fixed(_) => None,
        })
        .collect();
    let mut leveled = assign_levels_with(&candidates, &config.levels).into_iter();

    let headings: Vec<Heading> = slots
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Pending(_) => leveled.next(),
            Slot::Fixed(heading) => Some(heading),
        })
        .collect();

    if headings.is_empty() {
        log::warn!(
            "{} classifier found no headings; emitting an empty outline",
            classifier.name()
        );
    } else {
        log::debug!(
            "{} classifier found {} headings",
            classifier.name(),
            headings.len()
        );
    }

    build(title, headings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LevelConfig, TitleConfig};
    use crate::heuristic::HeuristicClassifier;
    use crate::types::{HeadingLevel, Page, RawLine, TextLine};

    fn raw(text: &str, size: f32, font: &str, y: f32) -> RawLine {
        let glyphs = text.chars().filter(|c| !c.is_whitespace()).count().max(1);
        RawLine {
            text: text.to_string(),
            glyph_sizes: vec![size; glyphs],
            glyph_fonts: vec![font.to_string(); glyphs],
            y,
        }
    }

    fn heuristic(config: &OutlineConfig) -> HeuristicClassifier {
        HeuristicClassifier::new(&config.noise, &config.scoring).unwrap()
    }

    fn run(document: &Document) -> DocumentOutline {
        let config = OutlineConfig::default();
        process(document, &heuristic(&config), &config)
    }

    fn heading(level: HeadingLevel, text: &str, page: usize) -> Heading {
        Heading {
            level,
            text: text.to_string(),
            page,
        }
    }

    #[test]
    fn test_build_keeps_order() {
        let outline = build(
            "Doc",
            vec![
                heading(HeadingLevel::H2, "b", 1),
                heading(HeadingLevel::H1, "a", 2),
            ],
        );
        assert_eq!(outline.title, "Doc");
        assert_eq!(outline.outline[0].text, "b");
        assert_eq!(outline.outline[1].text, "a");
    }

    #[test]
    fn test_annual_report_scenario() {
        let document = Document::new(vec![Page {
            number: 1,
            lines: vec![
                raw("ANNUAL REPORT", 18.0, "Helvetica-Bold", 700.0),
                raw("1. Introduction", 14.0, "Helvetica-Bold", 675.0),
                raw(
                    "this report summarises the year in review.",
                    11.0,
                    "Helvetica",
                    660.0,
                ),
            ],
        }]);
        let outline = run(&document);
        assert_eq!(outline.title, "ANNUAL REPORT");
        assert_eq!(
            outline.outline,
            vec![heading(HeadingLevel::H1, "1. Introduction", 1)]
        );
    }

    #[test]
    fn test_empty_document() {
        let outline = run(&Document::default());
        assert_eq!(outline, DocumentOutline::default());
        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_no_candidates_gives_empty_title() {
        let document = Document::new(vec![Page {
            number: 1,
            lines: vec![
                raw("Plain opening line", 11.0, "Times", 700.0),
                raw("Another plain line", 11.0, "Times", 690.0),
            ],
        }]);
        let outline = run(&document);
        assert_eq!(outline.title, "");
        assert!(outline.outline.is_empty());
    }

    #[test]
    fn test_sizes_rank_across_pages() {
        let document = Document::new(vec![
            Page {
                number: 1,
                lines: vec![
                    raw("Cover Page", 28.0, "Arial-Bold", 750.0),
                    raw("Part One", 20.0, "Arial-Bold", 600.0),
                    raw("Background", 16.0, "Arial-Bold", 500.0),
                ],
            },
            Page {
                number: 2,
                lines: vec![
                    raw("Details", 12.0, "Arial-Bold", 700.0),
                    raw("Fine Print", 10.0, "Arial-Bold", 600.0),
                    raw("Part Two", 20.0, "Arial-Bold", 500.0),
                ],
            },
        ]);
        let outline = run(&document);
        assert_eq!(outline.title, "Cover Page");
        assert_eq!(
            outline.outline,
            vec![
                heading(HeadingLevel::H1, "Part One", 1),
                heading(HeadingLevel::H2, "Background", 1),
                heading(HeadingLevel::H3, "Details", 2),
                heading(HeadingLevel::H3, "Fine Print", 2),
                heading(HeadingLevel::H1, "Part Two", 2),
            ]
        );
    }

    #[test]
    fn test_prev_y_carries_across_pages() {
        // "Results" is 10 points below the last line of page 1, so it only
        // earns its size point. A per-page reset would give it the gap point.
        let document = Document::new(vec![
            Page {
                number: 1,
                lines: vec![
                    raw("Project Summary", 20.0, "Arial-Bold", 700.0),
                    raw("Body copy here", 11.0, "Times", 120.0),
                ],
            },
            Page {
                number: 2,
                lines: vec![
                    raw("Results", 14.0, "Times", 110.0),
                    raw("Methods", 14.0, "Times", 60.0),
                ],
            },
        ]);
        let outline = run(&document);
        assert_eq!(outline.title, "Project Summary");
        assert_eq!(
            outline.outline,
            vec![heading(HeadingLevel::H1, "Methods", 2)]
        );
    }

    #[test]
    fn test_noise_does_not_advance_prev_y() {
        // The URL sits between two lines 10 points apart; if it advanced
        // prev_y the second heading would lose its isolation point.
        let document = Document::new(vec![Page {
            number: 1,
            lines: vec![
                raw("Body copy here", 11.0, "Times", 700.0),
                raw("www.example.com/contact", 11.0, "Times", 500.0),
                raw("Results", 11.0, "Times-Bold", 690.0),
            ],
        }]);
        let outline = run(&document);
        assert!(outline.outline.is_empty());
    }

    #[test]
    fn test_filtered_title_skips_footer_margin() {
        let document = Document::new(vec![Page {
            number: 1,
            lines: vec![
                raw("Project Plan", 20.0, "Arial-Bold", 700.0),
                raw("Scope", 16.0, "Arial-Bold", 600.0),
                raw("Confidential Footer", 30.0, "Arial", 40.0),
            ],
        }]);
        let outline = run(&document);
        assert_eq!(outline.title, "Project Plan");

        let config = OutlineConfig {
            title: TitleConfig {
                source: TitleSource::Raw,
                ..TitleConfig::default()
            },
            ..OutlineConfig::default()
        };
        let outline = process(&document, &heuristic(&config), &config);
        assert_eq!(outline.title, "Confidential Footer");
    }

    #[test]
    fn test_absolute_levels_from_config() {
        let config = OutlineConfig {
            levels: LevelConfig {
                mode: crate::config::LevelMode::Absolute,
                ..LevelConfig::default()
            },
            ..OutlineConfig::default()
        };
        let document = Document::new(vec![Page {
            number: 2,
            lines: vec![raw("SUMMARY", 12.0, "Arial-Bold", 700.0)],
        }]);
        let outline = process(&document, &heuristic(&config), &config);
        assert_eq!(outline.outline, vec![heading(HeadingLevel::H3, "SUMMARY", 2)]);
    }

    #[test]
    fn test_process_is_deterministic() {
        let document = Document::new(vec![Page {
            number: 1,
            lines: vec![
                raw("Über die Studie", 18.0, "Arial-Bold", 700.0),
                raw("ERGEBNISSE", 14.0, "Arial-Bold", 650.0),
                raw("Methoden", 13.0, "Arial-Bold", 600.0),
            ],
        }]);
        let a = serde_json::to_string(&run(&document)).unwrap();
        let b = serde_json::to_string(&run(&document)).unwrap();
        assert_eq!(a, b);
    }

    // -----------------------------------------------------------------------
    // Labeling classifier
    // -----------------------------------------------------------------------

    /// Labels lines by exact text; everything else is `Other`.
    struct LookupClassifier(Vec<(&'static str, Label)>);

    impl HeadingClassifier for LookupClassifier {
        fn name(&self) -> &'static str {
            "lookup"
        }

        fn classify(&self, line: &TextLine, _prev_y: f32) -> Classification {
            match self.0.iter().find(|(text, _)| *text == line.text) {
                Some((_, Label::Other)) | None => Classification::Ignored,
                Some((_, label)) => Classification::Labeled(*label),
            }
        }

        fn fallback_title(
            &self,
            _page_one: &PageOneSizes,
            _has_headings: bool,
            config: &TitleConfig,
        ) -> String {
            config.untitled.clone()
        }
    }

    #[test]
    fn test_labeled_path_uses_first_title() {
        let classifier = LookupClassifier(vec![
            ("Handbook", Label::Title),
            ("Welcome", Label::H1),
            ("Second Title", Label::Title),
            ("Getting Started", Label::H2),
        ]);
        let document = Document::new(vec![
            Page {
                number: 1,
                lines: vec![
                    raw("Handbook", 24.0, "Arial", 700.0),
                    raw("Welcome", 12.0, "Arial", 650.0),
                    raw("Some body text", 10.0, "Arial", 600.0),
                ],
            },
            Page {
                number: 2,
                lines: vec![
                    raw("Second Title", 24.0, "Arial", 700.0),
                    raw("Getting Started", 10.0, "Arial", 650.0),
                ],
            },
        ]);
        let outline = process(&document, &classifier, &OutlineConfig::default());
        assert_eq!(outline.title, "Handbook");
        assert_eq!(
            outline.outline,
            vec![
                heading(HeadingLevel::H1, "Welcome", 1),
                heading(HeadingLevel::H2, "Getting Started", 2),
            ]
        );
    }

    #[test]
    fn test_labeled_path_without_title() {
        let classifier = LookupClassifier(vec![("Welcome", Label::H3)]);
        let document = Document::new(vec![Page {
            number: 1,
            lines: vec![raw("Welcome", 12.0, "Arial", 650.0)],
        }]);
        let outline = process(&document, &classifier, &OutlineConfig::default());
        assert_eq!(outline.title, "Untitled Document");
        assert_eq!(outline.outline, vec![heading(HeadingLevel::H3, "Welcome", 1)]);

        let empty = process(&Document::default(), &classifier, &OutlineConfig::default());
        assert_eq!(empty.title, "Untitled Document");
        assert!(empty.outline.is_empty());
    }
}
