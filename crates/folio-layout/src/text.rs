//! # Text Measurement and Wrapping
//!
//! Widths come from a [`TextMeasure`]; [`wrap_text`] breaks text into lines
//! that fit a column band at a given font size.

use serde::{Deserialize, Serialize};

/// Measures rendered text width in layout units.
///
/// The real page backend knows its fonts; layout only needs widths to
/// decide where lines break.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Every character advances by the same width: `font_size × char_width_per_point`.
///
/// The default (`0.1764`) approximates half an em of a Helvetica-like font
/// with points converted to millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformMetrics {
    pub char_width_per_point: f64,
}

impl UniformMetrics {
    pub fn new(char_width_per_point: f64) -> Self {
        UniformMetrics {
            char_width_per_point,
        }
    }
}

impl Default for UniformMetrics {
    fn default() -> Self {
        UniformMetrics::new(0.1764)
    }
}

impl TextMeasure for UniformMetrics {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.char_width_per_point
    }
}

/// Word-wrap `text` into lines no wider than `avail_width`.
///
/// Embedded newlines start a new line; a single trailing newline is
/// dropped. A word wider than the column is broken between characters.
/// Always returns at least one line.
pub fn wrap_text(
    text: &str,
    avail_width: f64,
    font_size: f64,
    metrics: &dyn TextMeasure,
) -> Vec<String> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let mut lines: Vec<String> = Vec::new();
    for para in text.split('\n') {
        wrap_paragraph(para.trim(), avail_width, font_size, metrics, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Word-wrap a single paragraph into lines, appending to `out`.
fn wrap_paragraph(
    text: &str,
    avail_width: f64,
    font_size: f64,
    metrics: &dyn TextMeasure,
    out: &mut Vec<String>,
) {
    if text.is_empty() {
        out.push(String::new());
        return;
    }
    let space_w = metrics.text_width(" ", font_size);
    let mut current_line = String::new();
    let mut line_width = 0.0_f64;

    for word in text.split_whitespace() {
        let word_w = metrics.text_width(word, font_size);
        let needed = if current_line.is_empty() {
            word_w
        } else {
            line_width + space_w + word_w
        };

        if needed <= avail_width {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
            line_width = needed;
            continue;
        }

        if !current_line.is_empty() {
            out.push(std::mem::take(&mut current_line));
        }

        if word_w <= avail_width {
            current_line.push_str(word);
            line_width = word_w;
        } else {
            // Word alone is too wide: full pieces become lines, the tail
            // stays open for the next word.
            let pieces = break_word(word, avail_width, font_size, metrics);
            if let Some((last, full)) = pieces.split_last() {
                out.extend(full.iter().cloned());
                current_line = last.clone();
                line_width = metrics.text_width(last, font_size);
            }
        }
    }
    if !current_line.is_empty() {
        out.push(current_line);
    }
}

/// Split a single word into pieces that each fit `avail_width`.
///
/// A piece always holds at least one character, even in a column narrower
/// than that character.
fn break_word(
    word: &str,
    avail_width: f64,
    font_size: f64,
    metrics: &dyn TextMeasure,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in word.chars() {
        piece.push(ch);
        if piece.chars().count() > 1 && metrics.text_width(&piece, font_size) > avail_width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One unit per character at 8pt.
    fn unit_metrics() -> UniformMetrics {
        UniformMetrics::new(0.125)
    }

    #[test]
    fn test_uniform_width() {
        let m = unit_metrics();
        assert_eq!(m.text_width("abcd", 8.0), 4.0);
        assert_eq!(m.text_width("abcd", 16.0), 8.0);
        assert_eq!(m.text_width("", 8.0), 0.0);
    }

    #[test]
    fn test_short_text_single_line() {
        let lines = wrap_text("Widget", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec!["Widget"]);
    }

    #[test]
    fn test_wraps_on_word_boundaries() {
        let lines = wrap_text("alpha beta gamma delta", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec!["alpha beta", "gamma", "delta"]);
    }

    #[test]
    fn test_exact_fit_stays_on_line() {
        // "aaaa bbbbb" is exactly 10 wide
        let lines = wrap_text("aaaa bbbbb", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec!["aaaa bbbbb"]);
    }

    #[test]
    fn test_breaks_overlong_word() {
        let lines = wrap_text("abcdefghijklmnopqrstuvwxy end", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec!["abcdefghij", "klmnopqrst", "uvwxy end"]);
    }

    #[test]
    fn test_honours_newlines() {
        let lines = wrap_text("first\nsecond", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec!["first", "second"]);

        let lines = wrap_text("first\n\nthird", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec!["first", "", "third"]);
    }

    #[test]
    fn test_single_trailing_newline_dropped() {
        let lines = wrap_text("Widget\n", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec!["Widget"]);

        let lines = wrap_text("Widget\n\n", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec!["Widget", ""]);

        let lines = wrap_text("\n", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_empty_text_is_one_blank_line() {
        let lines = wrap_text("", 10.0, 8.0, &unit_metrics());
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_smaller_font_fits_more() {
        let text = "one two three four";
        let at_8 = wrap_text(text, 10.0, 8.0, &unit_metrics());
        let at_4 = wrap_text(text, 10.0, 4.0, &unit_metrics());
        assert_eq!(at_8, vec!["one two", "three four"]);
        assert_eq!(at_4, vec!["one two three four"]);
    }
}
