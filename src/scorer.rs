use std::fmt;

use serde::Serialize;

use crate::random::RandomSource;
use crate::stats::TextStatistics;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Two percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub plagiarism_score: f64,
    pub ai_probability: f64,
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plagiarism Score: {:.1}%", self.plagiarism_score)?;
        write!(f, "AI Probability: {:.1}%", self.ai_probability)
    }
}

/// Pre-randomness heuristic values, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseScores {
    pub plagiarism: f64,
    pub ai_probability: f64,
}

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

struct Hyperparameters {
    neutral_score: f64,
    min_words_for_plagiarism: usize,
    high_diversity: f64,
    low_diversity: f64,
    high_diversity_base: f64,
    high_diversity_slope: f64,
    low_diversity_score: f64,
    min_sentences_for_ai: usize,
    uniform_variance_max: f64,
    uniform_diversity_min: f64,
    uniform_base: f64,
    uniform_offset: f64,
    uniform_variance_divisor: f64,
    long_word_length: f64,
    heuristic_weight: f64,
    noise_weight: f64,
    fallback_plagiarism_max: f64,
    fallback_ai_max: f64,
    percent: f64,
}

static HP: Hyperparameters = Hyperparameters {
    neutral_score: 0.5,
    min_words_for_plagiarism: 50,
    high_diversity: 0.8,
    low_diversity: 0.3,
    high_diversity_base: 0.7,
    high_diversity_slope: 2.0,
    low_diversity_score: 0.3,
    min_sentences_for_ai: 5,
    uniform_variance_max: 5.0,
    uniform_diversity_min: 0.7,
    uniform_base: 0.6,
    uniform_offset: 0.7,
    uniform_variance_divisor: 10.0,
    long_word_length: 5.0,
    heuristic_weight: 0.8,
    noise_weight: 0.2,
    fallback_plagiarism_max: 80.0,
    fallback_ai_max: 90.0,
    percent: 100.0,
};

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

fn high_diversity_score(diversity: f64) -> f64 {
    HP.high_diversity_base + (diversity - HP.high_diversity) * HP.high_diversity_slope
}

fn plagiarism_base(stats: &TextStatistics) -> f64 {
    let diversity = stats.vocabulary_diversity;
    let long_enough = stats.word_count > HP.min_words_for_plagiarism;

    if long_enough && diversity > HP.high_diversity {
        high_diversity_score(diversity)
    } else if long_enough && diversity < HP.low_diversity {
        HP.low_diversity_score
    } else {
        HP.neutral_score
    }
}

fn ai_base(stats: &TextStatistics) -> f64 {
    let mut score = HP.neutral_score;
    if stats.sentence_count <= HP.min_sentences_for_ai {
        return score;
    }

    let diversity = stats.vocabulary_diversity;
    let variance = stats.sentence_length_variance;

    // Uniform sentence lengths.
    if variance < HP.uniform_variance_max && diversity > HP.uniform_diversity_min {
        score = HP.uniform_base + (HP.uniform_offset - variance / HP.uniform_variance_divisor);
    }
    // Rich vocabulary of long words; overrides the uniformity branch.
    if diversity > HP.high_diversity && stats.average_word_length > HP.long_word_length {
        score = high_diversity_score(diversity);
    }
    score
}

/// Heuristic base scores for already-extracted statistics, clamped to `[0, 1]`.
pub fn base_scores(stats: &TextStatistics) -> BaseScores {
    let scores = BaseScores {
        plagiarism: clamp_unit(plagiarism_base(stats)),
        ai_probability: clamp_unit(ai_base(stats)),
    };
    tracing::debug!(
        plagiarism = scores.plagiarism,
        ai_probability = scores.ai_probability,
        "base scores"
    );
    scores
}

/// Blend each base with one random sample (plagiarism first) and scale to
/// percentages.
pub fn blend(base: BaseScores, rng: &mut dyn RandomSource) -> AnalysisResult {
    let mut perturb =
        |x: f64| clamp_unit(x * HP.heuristic_weight + rng.next_unit() * HP.noise_weight);
    let plagiarism = perturb(base.plagiarism);
    let ai_probability = perturb(base.ai_probability);

    AnalysisResult {
        plagiarism_score: plagiarism * HP.percent,
        ai_probability: ai_probability * HP.percent,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score `text` with the surface heuristics.
pub fn score(text: &str, rng: &mut dyn RandomSource) -> AnalysisResult {
    score_with_statistics(text, rng).0
}

pub fn score_with_statistics(
    text: &str,
    rng: &mut dyn RandomSource,
) -> (AnalysisResult, TextStatistics) {
    let stats = TextStatistics::compute(text);
    tracing::debug!(
        word_count = stats.word_count,
        sentence_count = stats.sentence_count,
        diversity = stats.vocabulary_diversity,
        variance = stats.sentence_length_variance,
        "text statistics"
    );
    let result = blend(base_scores(&stats), rng);
    (result, stats)
}

/// Pure-random stand-in used when a detector fails. No accuracy contract.
pub fn fallback(rng: &mut dyn RandomSource) -> AnalysisResult {
    let plagiarism_score = rng.next_unit() * HP.fallback_plagiarism_max;
    let ai_probability = rng.next_unit() * HP.fallback_ai_max;
    AnalysisResult {
        plagiarism_score,
        ai_probability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn stats(
        word_count: usize,
        diversity: f64,
        sentence_count: usize,
        variance: f64,
        avg_word_len: f64,
    ) -> TextStatistics {
        TextStatistics {
            word_count,
            sentence_count,
            average_word_length: avg_word_len,
            unique_word_count: (word_count as f64 * diversity).round() as usize,
            vocabulary_diversity: diversity,
            sentence_lengths: Vec::new(),
            average_sentence_length: 0.0,
            sentence_length_variance: variance,
        }
    }

    #[test]
    fn short_text_stays_neutral() {
        let base = base_scores(&stats(20, 0.95, 2, 0.0, 8.0));
        assert_close(base.plagiarism, 0.5);
        assert_close(base.ai_probability, 0.5);
    }

    #[test]
    fn high_diversity_raises_plagiarism() {
        let base = base_scores(&stats(60, 0.85, 1, 0.0, 4.0));
        assert_close(base.plagiarism, 0.8);
    }

    #[test]
    fn high_diversity_base_is_clamped() {
        let base = base_scores(&stats(60, 1.0, 1, 0.0, 4.0));
        assert_close(base.plagiarism, 1.0);
    }

    #[test]
    fn low_diversity_lowers_plagiarism() {
        let base = base_scores(&stats(60, 0.1, 1, 0.0, 4.0));
        assert_close(base.plagiarism, 0.3);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_close(base_scores(&stats(50, 0.95, 1, 0.0, 4.0)).plagiarism, 0.5);
        assert_close(base_scores(&stats(60, 0.8, 1, 0.0, 4.0)).plagiarism, 0.5);
        assert_close(base_scores(&stats(60, 0.3, 1, 0.0, 4.0)).plagiarism, 0.5);
        assert_close(base_scores(&stats(60, 0.75, 5, 0.0, 4.0)).ai_probability, 0.5);
    }

    #[test]
    fn uniform_sentences_raise_ai() {
        let base = base_scores(&stats(30, 0.75, 6, 4.0, 4.0));
        assert_close(base.ai_probability, 0.9);
    }

    #[test]
    fn long_rich_words_override_uniformity() {
        // Both branches fire; the second wins.
        let base = base_scores(&stats(30, 0.85, 6, 1.0, 7.0));
        assert_close(base.ai_probability, 0.8);
    }

    #[test]
    fn high_variance_keeps_ai_neutral() {
        let base = base_scores(&stats(30, 0.75, 6, 12.0, 4.0));
        assert_close(base.ai_probability, 0.5);
    }

    #[test]
    fn blend_uses_one_sample_per_score_in_order() {
        let base = BaseScores {
            plagiarism: 0.5,
            ai_probability: 1.0,
        };
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5]);
        let result = blend(base, &mut rng);
        assert_close(result.plagiarism_score, 40.0);
        assert_close(result.ai_probability, 90.0);
    }

    #[test]
    fn blend_result_stays_in_range() {
        let base = BaseScores {
            plagiarism: 1.0,
            ai_probability: 1.0,
        };
        let mut rng = ScriptedRandom::constant(0.999_999);
        let result = blend(base, &mut rng);
        assert!(result.plagiarism_score <= 100.0);
        assert!(result.ai_probability <= 100.0);
    }

    #[test]
    fn uniform_example_text() {
        let text = "the cat sat. the dog ran. the bird flew. \
                    the fish swam. the bee buzzed. the ant crawled.";
        let mut rng = ScriptedRandom::constant(0.0);
        let (result, stats) = score_with_statistics(text, &mut rng);
        assert_eq!(stats.sentence_count, 6);
        let base = base_scores(&stats);
        assert_close(base.plagiarism, 0.5);
        // 0.6 + 0.7 - 0 = 1.3, clamped
        assert_close(base.ai_probability, 1.0);
        assert_close(result.plagiarism_score, 40.0);
        assert_close(result.ai_probability, 80.0);
    }

    #[test]
    fn score_matches_detailed_variant() {
        let text = "A few words. Then a few more!";
        let plain = score(text, &mut ScriptedRandom::constant(0.3));
        let (detailed, _) = score_with_statistics(text, &mut ScriptedRandom::constant(0.3));
        assert_eq!(plain, detailed);
    }

    #[test]
    fn fallback_scales_samples() {
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5]);
        let result = fallback(&mut rng);
        assert_close(result.plagiarism_score, 40.0);
        assert_close(result.ai_probability, 45.0);
    }

    #[test]
    fn display_uses_one_decimal() {
        let result = AnalysisResult {
            plagiarism_score: 47.26,
            ai_probability: 81.0,
        };
        assert_eq!(
            result.to_string(),
            "Plagiarism Score: 47.3%\nAI Probability: 81.0%"
        );
    }
}
