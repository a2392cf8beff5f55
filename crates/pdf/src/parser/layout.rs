//! Text extraction and line assembly.
//!
//! Both steps are pure transformations over decoded content operations; the
//! caller supplies operations and fonts through [`PdfBackend`](super::backend::PdfBackend).
//!
//! # Pipeline
//!
//! ```text
//! content ops  ->  TextSpan[]          ->  LayoutLine[]
//!   (per page)     extract_page_spans      group_spans_into_lines
//! ```

use super::backend::{decode_text_simple, get_number_from_value, ContentOp, PdfValue};
use super::font::FontInfo;
use crate::cleanup::clean_text;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A run of text drawn with one font at one position, in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    /// Left edge of the first glyph's origin.
    pub x: f32,
    /// Baseline.
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    pub font_name: String,
}

/// One visual line of text on a page.
///
/// `glyph_sizes` and `glyph_fonts` hold one entry per non-whitespace
/// character of `text`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutLine {
    pub text: String,
    pub glyph_sizes: Vec<f32>,
    pub glyph_fonts: Vec<String>,
    /// Baseline plus the largest glyph size.
    pub top: f32,
    pub left: f32,
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Spans whose baselines differ by no more than this share a line.
const Y_TOLERANCE: f32 = 1.0;

/// Approximate glyph width as a fraction of the font size.  Real widths
/// would need the font's `/Widths` array.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Minimum horizontal gap (points) between spans that counts as a word break.
const MIN_WORD_GAP: f32 = 1.5;

/// A gap wider than this many font sizes splits one baseline into separate
/// lines (columns, running headers with a right-aligned page number).
const LINE_SPLIT_FACTOR: f32 = 3.0;

/// A `TJ` adjustment wider than this share of a glyph becomes a space.
const KERN_SPACE_RATIO: f32 = 0.3;

// ---------------------------------------------------------------------------
// Spaceless scripts
// ---------------------------------------------------------------------------

/// Returns `true` if `c` belongs to a script written without inter-word
/// spaces.
pub fn is_spaceless_script_char(c: char) -> bool {
    matches!(
        c as u32,
        // CJK Unified Ideographs, Extension A and B, compatibility
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2A6DF
        | 0xF900..=0xFAFF
        // Hiragana, Katakana
        | 0x3040..=0x30FF
        | 0x31F0..=0x31FF
        // CJK punctuation, fullwidth forms
        | 0x3000..=0x303F
        | 0xFF00..=0xFFEF
        // Thai, Lao, Tibetan, Myanmar, Khmer
        | 0x0E00..=0x0EFF
        | 0x0F00..=0x0FFF
        | 0x1000..=0x109F
        | 0x1780..=0x17FF
    )
}

// ---------------------------------------------------------------------------
// Text state machine
// ---------------------------------------------------------------------------

/// Affine matrix `[a, b, c, d, e, f]` in PDF row-vector convention.
type Matrix = [f32; 6];

const IDENTITY_MATRIX: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `m × n`: apply `m` first, then `n`.
fn multiply(m: &Matrix, n: &Matrix) -> Matrix {
    [
        m[0] * n[0] + m[1] * n[2],
        m[0] * n[1] + m[1] * n[3],
        m[2] * n[0] + m[3] * n[2],
        m[2] * n[1] + m[3] * n[3],
        m[4] * n[0] + m[5] * n[2] + n[4],
        m[4] * n[1] + m[5] * n[3] + n[5],
    ]
}

fn matrix_operands(operands: &[PdfValue]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut m = IDENTITY_MATRIX;
    for (slot, value) in m.iter_mut().zip(operands) {
        *slot = get_number_from_value(value)?;
    }
    Some(m)
}

#[derive(Debug, Clone)]
struct TextState {
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    text_matrix: Matrix,
    line_matrix: Matrix,
    /// Current transformation matrix (`cm`, `q`, `Q`).
    ctm: Matrix,
    horiz_scale: f32,
    char_spacing: f32,
    word_spacing: f32,
    text_rise: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 0.0,
            text_matrix: IDENTITY_MATRIX,
            line_matrix: IDENTITY_MATRIX,
            ctm: IDENTITY_MATRIX,
            horiz_scale: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            text_rise: 0.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    /// Position of the current glyph origin in page space.
    fn origin(&self) -> (f32, f32) {
        let rise = [1.0, 0.0, 0.0, 1.0, 0.0, self.text_rise];
        let m = multiply(&multiply(&rise, &self.text_matrix), &self.ctm);
        (m[4], m[5])
    }

    /// Rendered font size: the text-space vertical unit measured in page
    /// space.
    fn effective_font_size(&self) -> f32 {
        let m = multiply(&self.text_matrix, &self.ctm);
        (self.font_size * (m[2].powi(2) + m[3].powi(2)).sqrt()).abs()
    }

    /// Advance the text matrix by `dx` unscaled text-space units.
    fn advance_x(&mut self, dx: f32) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    fn translate_line(&mut self, tx: f32, ty: f32) {
        let new_tx = self.line_matrix[0] * tx + self.line_matrix[2] * ty + self.line_matrix[4];
        let new_ty = self.line_matrix[1] * tx + self.line_matrix[3] * ty + self.line_matrix[5];
        self.line_matrix[4] = new_tx;
        self.line_matrix[5] = new_ty;
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    /// Advance past `text` as drawn with the current parameters.
    fn advance_after_show(&mut self, text: &str) {
        let glyph_width = self.font_size * APPROX_CHAR_WIDTH_RATIO;
        let dx: f32 = text
            .chars()
            .map(|c| {
                let word = if c == ' ' { self.word_spacing } else { 0.0 };
                (glyph_width + self.char_spacing + word) * self.horiz_scale
            })
            .sum();
        self.advance_x(dx);
    }

    fn decode(&self, fonts: &[FontInfo], bytes: &[u8]) -> String {
        match fonts.iter().find(|f| f.key == self.font_key) {
            Some(font) => font.decode(bytes),
            None => decode_text_simple(bytes),
        }
    }
}

/// Pending text of one show operation.
struct SpanBuilder {
    text: String,
    start: (f32, f32),
    font_size: f32,
}

impl SpanBuilder {
    fn start(state: &TextState) -> Self {
        SpanBuilder {
            text: String::new(),
            start: state.origin(),
            font_size: state.effective_font_size(),
        }
    }

    fn finish(self, state: &TextState, spans: &mut Vec<TextSpan>) {
        if self.text.trim().is_empty() {
            return;
        }
        let (end_x, _) = state.origin();
        spans.push(TextSpan {
            text: self.text,
            x: self.start.0,
            y: self.start.1,
            width: (end_x - self.start.0).abs(),
            font_size: self.font_size,
            font_name: state.font_name.clone(),
        });
    }
}

// ---------------------------------------------------------------------------
// Public API: span extraction
// ---------------------------------------------------------------------------

/// Walk one page's content operations and produce its text spans.
///
/// | Operator | Action |
/// |----------|--------|
/// | `q` `Q` `cm` | Save, restore, and concatenate the CTM |
/// | `BT` `ET` | Begin / end a text object |
/// | `Tf` | Set font and size |
/// | `Tm` `Td` `TD` `T*` `TL` | Position and leading |
/// | `Tc` `Tw` `Tz` `Ts` | Spacing, scaling, rise |
/// | `Tj` `TJ` `'` `"` | Show text |
pub fn extract_page_spans(ops: &[ContentOp], fonts: &[FontInfo]) -> Vec<TextSpan> {
    let mut state = TextState::default();
    let mut saved: Vec<Matrix> = Vec::new();
    let mut spans: Vec<TextSpan> = Vec::new();

    for op in ops {
        let operands = op.operands.as_slice();
        let number = |i: usize| operands.get(i).and_then(get_number_from_value);

        match op.operator.as_str() {
            "q" => saved.push(state.ctm),
            "Q" => {
                if let Some(ctm) = saved.pop() {
                    state.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = matrix_operands(operands) {
                    state.ctm = multiply(&m, &state.ctm);
                }
            }

            "BT" => {
                state.text_matrix = IDENTITY_MATRIX;
                state.line_matrix = IDENTITY_MATRIX;
            }
            "ET" => {}

            "Tf" => {
                let key = match operands.first() {
                    Some(PdfValue::Name(n)) => n.clone(),
                    _ => continue,
                };
                state.font_name = fonts
                    .iter()
                    .find(|f| f.key == key)
                    .map(|f| f.base_font.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| String::from_utf8_lossy(&key).into_owned());
                state.font_size = number(1).unwrap_or(0.0);
                state.font_key = key;
            }

            "Tm" => {
                if let Some(m) = matrix_operands(operands) {
                    state.text_matrix = m;
                    state.line_matrix = m;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (number(0), number(1)) {
                    state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (number(0), number(1)) {
                    state.leading = -ty;
                    state.translate_line(tx, ty);
                }
            }
            "T*" => state.next_line(),
            "TL" => {
                if let Some(v) = number(0) {
                    state.leading = v;
                }
            }

            "Tc" => {
                if let Some(v) = number(0) {
                    state.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some(v) = number(0) {
                    state.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some(v) = number(0) {
                    state.horiz_scale = v / 100.0;
                }
            }
            "Ts" => {
                if let Some(v) = number(0) {
                    state.text_rise = v;
                }
            }

            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = operands.first() {
                    show_string(bytes, fonts, &mut state, &mut spans);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = operands.first() {
                    show_array(items, fonts, &mut state, &mut spans);
                }
            }
            "'" => {
                state.next_line();
                if let Some(PdfValue::Str(bytes)) = operands.first() {
                    show_string(bytes, fonts, &mut state, &mut spans);
                }
            }
            "\"" => {
                if let (Some(aw), Some(ac), Some(PdfValue::Str(bytes))) =
                    (number(0), number(1), operands.get(2))
                {
                    state.word_spacing = aw;
                    state.char_spacing = ac;
                    state.next_line();
                    show_string(bytes, fonts, &mut state, &mut spans);
                }
            }

            _ => {}
        }
    }

    spans
}

fn show_string(bytes: &[u8], fonts: &[FontInfo], state: &mut TextState, spans: &mut Vec<TextSpan>) {
    let decoded = state.decode(fonts, bytes);
    let mut span = SpanBuilder::start(state);
    state.advance_after_show(&decoded);
    span.text = clean_text(&decoded);
    span.finish(state, spans);
}

/// `TJ`: strings interleaved with adjustments in thousandths of a text-space
/// unit.  Large negative adjustments are word gaps.
fn show_array(items: &[PdfValue], fonts: &[FontInfo], state: &mut TextState, spans: &mut Vec<TextSpan>) {
    let mut span = SpanBuilder::start(state);

    for item in items {
        match item {
            PdfValue::Str(bytes) => {
                let decoded = state.decode(fonts, bytes);
                state.advance_after_show(&decoded);
                span.text.push_str(&clean_text(&decoded));
            }
            other => {
                let Some(adjustment) = get_number_from_value(other) else {
                    continue;
                };
                let dx = -adjustment / 1000.0 * state.font_size * state.horiz_scale;
                let space_threshold =
                    state.font_size * APPROX_CHAR_WIDTH_RATIO * state.horiz_scale * KERN_SPACE_RATIO;
                if dx > space_threshold && !span.text.is_empty() && !span.text.ends_with(' ') {
                    span.text.push(' ');
                }
                state.advance_x(dx);
            }
        }
    }

    span.finish(state, spans);
}

// ---------------------------------------------------------------------------
// Public API: span -> line grouping
// ---------------------------------------------------------------------------

/// Group a page's spans into lines, top of the page first.
///
/// Spans whose baselines are within [`Y_TOLERANCE`] of the first span of a
/// line join it.  Within a baseline, spans are ordered left to right, and a
/// gap wider than [`LINE_SPLIT_FACTOR`] font sizes starts a new line.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<LayoutLine> {
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut rows: Vec<Vec<TextSpan>> = Vec::new();
    for span in spans {
        match rows.last_mut() {
            Some(row) if (row[0].y - span.y).abs() <= Y_TOLERANCE => row.push(span),
            _ => rows.push(vec![span]),
        }
    }

    let mut lines = Vec::new();
    for mut row in rows {
        row.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut run: Vec<TextSpan> = Vec::new();
        for span in row {
            if let Some(prev) = run.last() {
                let gap = span.x - (prev.x + prev.width);
                if gap > prev.font_size.max(span.font_size) * LINE_SPLIT_FACTOR {
                    lines.extend(assemble_line(std::mem::take(&mut run)));
                }
            }
            run.push(span);
        }
        lines.extend(assemble_line(run));
    }

    lines
}

/// Join spans already ordered left to right into one line.
fn assemble_line(spans: Vec<TextSpan>) -> Option<LayoutLine> {
    let first = spans.first()?;
    let mut line = LayoutLine {
        left: first.x,
        top: f32::MIN,
        ..LayoutLine::default()
    };

    let mut prev: Option<&TextSpan> = None;
    for span in &spans {
        if let Some(prev) = prev {
            let gap = span.x - (prev.x + prev.width);
            if gap >= MIN_WORD_GAP
                && !boundary_is_spaceless(prev, span)
                && !line.text.ends_with(' ')
                && !span.text.starts_with(' ')
            {
                line.text.push(' ');
            }
        }
        line.text.push_str(&span.text);
        let glyphs = span.text.chars().filter(|c| !c.is_whitespace()).count();
        line.glyph_sizes
            .extend(std::iter::repeat(span.font_size).take(glyphs));
        line.glyph_fonts
            .extend(std::iter::repeat(span.font_name.clone()).take(glyphs));
        line.top = line.top.max(span.y + span.font_size);
        prev = Some(span);
    }

    Some(line)
}

fn boundary_is_spaceless(prev: &TextSpan, next: &TextSpan) -> bool {
    match (prev.text.chars().next_back(), next.text.chars().next()) {
        (Some(l), Some(f)) => is_spaceless_script_char(l) && is_spaceless_script_char(f),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operator: &str, operands: Vec<PdfValue>) -> ContentOp {
        ContentOp::new(operator, operands)
    }

    fn real(values: &[f32]) -> Vec<PdfValue> {
        values.iter().map(|&v| PdfValue::Real(v)).collect()
    }

    fn tf(key: &[u8], size: f32) -> ContentOp {
        op("Tf", vec![PdfValue::Name(key.to_vec()), PdfValue::Real(size)])
    }

    fn tm(x: f32, y: f32) -> ContentOp {
        op("Tm", real(&[1.0, 0.0, 0.0, 1.0, x, y]))
    }

    fn tj(text: &[u8]) -> ContentOp {
        op("Tj", vec![PdfValue::Str(text.to_vec())])
    }

    fn fonts() -> Vec<FontInfo<'static>> {
        let win_ansi = || {
            Some(lopdf::Encoding::OneByteEncoding(
                &lopdf::encodings::WIN_ANSI_ENCODING,
            ))
        };
        vec![
            FontInfo::new("F1", "Helvetica", win_ansi()),
            FontInfo::new("F2", "ABCDEF+Helvetica-Bold", win_ansi()),
        ]
    }

    fn span(text: &str, x: f32, y: f32, size: f32) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            x,
            y,
            width: text.chars().count() as f32 * size * APPROX_CHAR_WIDTH_RATIO,
            font_size: size,
            font_name: "Helvetica".to_string(),
        }
    }

    // -- state machine ---------------------------------------------------

    #[test]
    fn test_simple_tj() {
        let ops = vec![op("BT", vec![]), tf(b"F1", 12.0), tm(72.0, 700.0), tj(b"Hello World"), op("ET", vec![])];
        let spans = extract_page_spans(&ops, &fonts());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Hello World");
        assert_eq!(spans[0].font_name, "Helvetica");
        assert!((spans[0].x - 72.0).abs() < 0.01);
        assert!((spans[0].y - 700.0).abs() < 0.01);
        assert!((spans[0].width - 66.0).abs() < 0.01);
    }

    #[test]
    fn test_td_moves_relative_to_line_start() {
        let ops = vec![
            op("BT", vec![]),
            tf(b"F2", 18.0),
            tm(72.0, 700.0),
            tj(b"Title"),
            op("Td", real(&[0.0, -30.0])),
            tj(b"Next"),
            op("ET", vec![]),
        ];
        let spans = extract_page_spans(&ops, &fonts());
        assert_eq!(spans.len(), 2);
        assert!((spans[1].x - 72.0).abs() < 0.01);
        assert!((spans[1].y - 670.0).abs() < 0.01);
        assert_eq!(spans[1].font_name, "ABCDEF+Helvetica-Bold");
    }

    #[test]
    fn test_tl_and_t_star() {
        let ops = vec![
            op("BT", vec![]),
            tf(b"F1", 10.0),
            op("TL", real(&[14.0])),
            tm(50.0, 500.0),
            tj(b"one"),
            op("T*", vec![]),
            tj(b"two"),
            op("'", vec![PdfValue::Str(b"three".to_vec())]),
            op("ET", vec![]),
        ];
        let ys: Vec<f32> = extract_page_spans(&ops, &fonts()).iter().map(|s| s.y).collect();
        assert_eq!(ys, vec![500.0, 486.0, 472.0]);
    }

    #[test]
    fn test_matrix_scales_font_size() {
        let ops = vec![
            op("BT", vec![]),
            tf(b"F1", 1.0),
            op("Tm", real(&[14.0, 0.0, 0.0, 14.0, 72.0, 600.0])),
            tj(b"Scaled"),
            op("ET", vec![]),
        ];
        let spans = extract_page_spans(&ops, &fonts());
        assert!((spans[0].font_size - 14.0).abs() < 0.01);
    }

    #[test]
    fn test_ctm_is_applied_and_restored() {
        let ops = vec![
            op("q", vec![]),
            op("cm", real(&[2.0, 0.0, 0.0, 2.0, 0.0, 0.0])),
            op("BT", vec![]),
            tf(b"F1", 10.0),
            tm(10.0, 100.0),
            tj(b"Big"),
            op("ET", vec![]),
            op("Q", vec![]),
            op("BT", vec![]),
            tf(b"F1", 10.0),
            tm(10.0, 100.0),
            tj(b"Small"),
            op("ET", vec![]),
        ];
        let spans = extract_page_spans(&ops, &fonts());
        assert!((spans[0].font_size - 20.0).abs() < 0.01);
        assert!((spans[0].y - 200.0).abs() < 0.01);
        assert!((spans[1].font_size - 10.0).abs() < 0.01);
        assert!((spans[1].y - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_tj_array_kerning_inserts_space() {
        let ops = vec![
            op("BT", vec![]),
            tf(b"F1", 12.0),
            tm(72.0, 700.0),
            op(
                "TJ",
                vec![PdfValue::Array(vec![
                    PdfValue::Str(b"Annual".to_vec()),
                    PdfValue::Integer(-300),
                    PdfValue::Str(b"Re".to_vec()),
                    PdfValue::Integer(20),
                    PdfValue::Str(b"port".to_vec()),
                ])],
            ),
            op("ET", vec![]),
        ];
        let spans = extract_page_spans(&ops, &fonts());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Annual Report");
    }

    #[test]
    fn test_win_ansi_and_ligatures_decoded() {
        let ops = vec![
            op("BT", vec![]),
            tf(b"F1", 12.0),
            tm(72.0, 700.0),
            tj(b"\x93Quoted\x94"),
            op("ET", vec![]),
        ];
        assert_eq!(extract_page_spans(&ops, &fonts())[0].text, "\u{201C}Quoted\u{201D}");
    }

    #[test]
    fn test_whitespace_only_strings_are_dropped() {
        let ops = vec![op("BT", vec![]), tf(b"F1", 12.0), tj(b"   "), op("ET", vec![])];
        assert!(extract_page_spans(&ops, &fonts()).is_empty());
    }

    #[test]
    fn test_unknown_font_key_keeps_key_name() {
        let ops = vec![op("BT", vec![]), tf(b"F9", 12.0), tj(b"x"), op("ET", vec![])];
        assert_eq!(extract_page_spans(&ops, &fonts())[0].font_name, "F9");
    }

    // -- grouping --------------------------------------------------------

    #[test]
    fn test_group_empty() {
        assert!(group_spans_into_lines(Vec::new()).is_empty());
    }

    #[test]
    fn test_group_orders_top_to_bottom() {
        let lines = group_spans_into_lines(vec![
            span("low", 72.0, 100.0, 10.0),
            span("high", 72.0, 700.0, 10.0),
            span("mid", 72.0, 400.0, 10.0),
        ]);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_group_joins_same_baseline_with_space() {
        let lines = group_spans_into_lines(vec![
            span("Report", 112.0, 700.4, 12.0),
            span("Annual", 72.0, 700.0, 12.0),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Annual Report");
        assert_eq!(lines[0].glyph_sizes.len(), 12);
        assert!((lines[0].left - 72.0).abs() < 0.01);
        assert!((lines[0].top - 712.4).abs() < 0.01);
    }

    #[test]
    fn test_group_concatenates_adjacent_spans() {
        // "Intro" ends at 72 + 5 * 6 = 102.
        let lines = group_spans_into_lines(vec![
            span("Intro", 72.0, 500.0, 12.0),
            span("duction", 102.5, 500.0, 12.0),
        ]);
        assert_eq!(lines[0].text, "Introduction");
    }

    #[test]
    fn test_group_splits_wide_gaps() {
        let lines = group_spans_into_lines(vec![
            span("Quarterly Review", 72.0, 760.0, 9.0),
            span("Page 3", 500.0, 760.0, 9.0),
        ]);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Quarterly Review", "Page 3"]);
    }

    #[test]
    fn test_glyphs_follow_their_spans() {
        let mut bold = span("Note:", 72.0, 300.0, 11.0);
        bold.font_name = "Helvetica-Bold".to_string();
        let lines = group_spans_into_lines(vec![bold, span("see", 104.0, 300.0, 10.0)]);
        let line = &lines[0];
        assert_eq!(line.text, "Note: see");
        assert_eq!(line.glyph_sizes, vec![11.0, 11.0, 11.0, 11.0, 11.0, 10.0, 10.0, 10.0]);
        assert_eq!(line.glyph_fonts[0], "Helvetica-Bold");
        assert_eq!(line.glyph_fonts[7], "Helvetica");
    }

    #[test]
    fn test_spaceless_boundary_gets_no_space() {
        let lines = group_spans_into_lines(vec![
            span("日本", 72.0, 500.0, 12.0),
            span("語", 90.0, 500.0, 12.0),
        ]);
        assert_eq!(lines[0].text, "日本語");
    }

    #[test]
    fn test_spaceless_script_chars() {
        assert!(is_spaceless_script_char('漢'));
        assert!(is_spaceless_script_char('カ'));
        assert!(is_spaceless_script_char('ก'));
        assert!(!is_spaceless_script_char('a'));
        assert!(!is_spaceless_script_char('é'));
    }
}
