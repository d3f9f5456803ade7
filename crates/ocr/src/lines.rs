//! Line reconstruction: clusters unordered word tokens into visual rows.
//!
//! Tokens are sorted top to bottom and walked once. A token joins the current
//! row when its y lies within [`LINE_BAND`] of the *immediately preceding*
//! token; otherwise the row is closed and a new one starts. Comparing against
//! the previous token rather than a row anchor means a slow downward drift can
//! chain several tokens into one row.

use crate::types::{Line, WordToken};

/// Positions are compared at a resolution of 1/1000 page height.
const POSITION_SCALE: f64 = 1000.0;

/// Two consecutive tokens closer than this (in thousandths) share a row: 0.01.
pub const LINE_BAND: u64 = 10;

/// Reconstructed rows plus the upper-cased text the classifiers scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub lines: Vec<Line>,
    pub full_text: String,
}

impl Layout {
    pub fn from_words(words: &[WordToken]) -> Self {
        let lines = reconstruct(words);
        let full_text = flatten_upper(&lines);
        Self { lines, full_text }
    }
}

pub fn reconstruct(words: &[WordToken]) -> Vec<Line> {
    let mut sorted: Vec<&WordToken> = words.iter().collect();
    // Stable: tokens with identical y keep their input order.
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));

    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut prev_pos: Option<i64> = None;

    for word in sorted {
        let pos = quantize(word.y);
        if let Some(prev) = prev_pos {
            if pos.abs_diff(prev) >= LINE_BAND {
                lines.push(Line::from_words(&current));
                current.clear();
            }
        }
        current.push(&word.text);
        prev_pos = Some(pos);
    }
    if !current.is_empty() {
        lines.push(Line::from_words(&current));
    }

    lines
}

/// All lines joined with single spaces, upper-cased.
pub fn flatten_upper(lines: &[Line]) -> String {
    lines
        .iter()
        .map(Line::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn quantize(y: f64) -> i64 {
    (y * POSITION_SCALE).round() as i64
}
