use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

// Word tokens are ASCII-only runs.
static WORD_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").unwrap());

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Surface statistics of a text, derived once per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub average_word_length: f64,
    pub unique_word_count: usize,
    pub vocabulary_diversity: f64,
    pub sentence_lengths: Vec<usize>,
    pub average_sentence_length: f64,
    pub sentence_length_variance: f64,
}

impl TextStatistics {
    pub fn compute(text: &str) -> Self {
        let word_count = word_count(text);
        let sentences = split_sentences(text);

        let average_word_length = if word_count > 0 {
            let visible = text.chars().filter(|&c| !is_space(c)).count();
            visible as f64 / word_count as f64
        } else {
            0.0
        };

        let unique_word_count = unique_word_count(text);
        let vocabulary_diversity = if word_count > 0 {
            unique_word_count as f64 / word_count as f64
        } else {
            0.0
        };

        let sentence_lengths: Vec<usize> = sentences
            .iter()
            .map(|s| self::word_count(s))
            .collect();
        let (average_sentence_length, sentence_length_variance) =
            mean_and_variance(&sentence_lengths);

        Self {
            word_count,
            sentence_count: sentences.len(),
            average_word_length,
            unique_word_count,
            vocabulary_diversity,
            sentence_lengths,
            average_sentence_length,
            sentence_length_variance,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Whitespace as browsers see it: Unicode `White_Space` plus the byte
/// order mark, without NEL (U+0085).
pub fn is_space(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        _ => c.is_whitespace(),
    }
}

pub fn trim_space(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// True when `text` holds nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    trim_space(text).is_empty()
}

fn word_count(text: &str) -> usize {
    text.split(is_space).filter(|w| !w.is_empty()).count()
}

fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(trim_space)
        .filter(|s| !s.is_empty())
        .collect()
}

fn unique_word_count(text: &str) -> usize {
    let lowered = text.to_lowercase();
    WORD_TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Mean and population variance; both zero for an empty slice.
fn mean_and_variance(values: &[usize]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<usize>() as f64 / n;
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, variance)
}
