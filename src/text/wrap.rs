//! Greedy line breaking for the line reveal.
//!
//! Widths are display cells (`unicode-width`) times a fixed advance, which is what a
//! monospace-metric layout gives; breaks happen at word boundaries
//! (`unicode-segmentation`), and a word wider than the line gets a line of its own.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Font metrics used to measure text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextMetrics {
    /// Horizontal advance of a single-width cell, in pixels.
    #[serde(default = "default_advance")]
    pub advance: f64,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
}

fn default_advance() -> f64 {
    9.0
}

fn default_line_height() -> f64 {
    24.0
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            advance: default_advance(),
            line_height: default_line_height(),
        }
    }
}

impl TextMetrics {
    pub fn measure(&self, text: &str) -> f64 {
        text.width() as f64 * self.advance
    }
}

/// Break `text` into visual lines no wider than `max_width` pixels.
pub fn break_lines(text: &str, max_width: f64, metrics: &TextMetrics) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for tok in paragraph.split_word_bounds() {
            let is_space = tok.chars().all(char::is_whitespace);
            if is_space {
                if !line.is_empty() {
                    line.push_str(tok);
                }
                continue;
            }
            let candidate = metrics.measure(&line) + metrics.measure(tok);
            if candidate > max_width && !line.trim_end().is_empty() {
                lines.push(line.trim_end().to_owned());
                line.clear();
            }
            line.push_str(tok);
        }
        let rest = line.trim_end();
        if !rest.is_empty() {
            lines.push(rest.to_owned());
        }
    }
    lines
}
