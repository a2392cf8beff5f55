use crate::config::TitleConfig;
use crate::title::PageOneSizes;
use crate::types::{Label, TextLine};

/// What a classifier decided about one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Rejected by the noise filter.  Noise does not advance `prev_y` and
    /// never feeds the filtered title map.
    Noise,
    /// A plausible line that is not a heading.
    Ignored,
    /// A heading whose level is decided later from the document's size
    /// ranking.
    Candidate,
    /// A line with a final semantic label.
    Labeled(Label),
}

/// A heading classification strategy.
///
/// Implementations are immutable handles built once at startup and shared
/// read-only across every document (and every worker thread), so the
/// pipeline never branches on which strategy is in use.
pub trait HeadingClassifier: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Classify one normalized line.  `prev_y` is the vertical position of
    /// the previous line that survived the noise filter.
    fn classify(&self, line: &TextLine, prev_y: f32) -> Classification;

    /// Title to report when no line was labeled [`Label::Title`].
    ///
    /// `has_headings` tells whether the outline is non-empty.
    fn fallback_title(
        &self,
        page_one: &PageOneSizes,
        has_headings: bool,
        config: &TitleConfig,
    ) -> String;
}
