use crate::pronunciation::words_similar;
use crate::types::{FluencyResult, PronunciationResult};
use crate::util::{round1, words};

pub const PRONUNCIATION_WEIGHT: f64 = 0.6;
pub const FLUENCY_WEIGHT: f64 = 0.4;
/// Credit for a positional word that differs by one character.
const SIMILAR_WORD_CREDIT: f64 = 0.7;

/// Weighted overall score. Inputs are expected in [0, 100].
pub fn fuse(pronunciation: &PronunciationResult, fluency: &FluencyResult) -> f64 {
    fuse_scores(pronunciation.score, fluency.score)
}

pub fn fuse_scores(pronunciation: f64, fluency: f64) -> f64 {
    round1(pronunciation * PRONUNCIATION_WEIGHT + fluency * FLUENCY_WEIGHT)
}

/// Positional word accuracy in [0, 100].
///
/// An exact match earns a full point, a same-length word with one differing
/// character earns 0.7. Either text being empty scores 0; an expected text of
/// only whitespace scores 100.
pub fn word_accuracy(expected_text: &str, transcribed_text: &str) -> f64 {
    if expected_text.is_empty() || transcribed_text.is_empty() {
        return 0.0;
    }

    let expected = words(expected_text);
    let spoken = words(transcribed_text);
    if expected.is_empty() {
        return 100.0;
    }

    let points: f64 = expected
        .iter()
        .zip(spoken.iter())
        .map(|(e, s)| {
            if e == s {
                1.0
            } else if words_similar(e, s) {
                SIMILAR_WORD_CREDIT
            } else {
                0.0
            }
        })
        .sum();

    points / expected.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuses_with_fixed_weights() {
        assert_eq!(fuse_scores(80.0, 60.0), 72.0);
        assert_eq!(fuse_scores(100.0, 100.0), 100.0);
        assert_eq!(fuse_scores(0.0, 0.0), 0.0);
        assert_eq!(fuse_scores(20.0, 75.0), 42.0);
    }

    #[test]
    fn fused_score_stays_in_range() {
        let steps = [0.0, 0.1, 12.5, 33.3, 50.0, 66.7, 99.9, 100.0];
        for a in steps {
            for b in steps {
                let s = fuse_scores(a, b);
                assert!((0.0..=100.0).contains(&s), "{a} {b} -> {s}");
            }
        }
    }

    #[test]
    fn word_accuracy_exact_and_similar() {
        assert_eq!(word_accuracy("The cat sits", "the cat sits"), 100.0);
        // "cut" is one letter off "cat"
        let acc = word_accuracy("the cat sits", "the cut sits");
        assert!((acc - 2.7 / 3.0 * 100.0).abs() < 1e-9);
        assert_eq!(word_accuracy("the cat sits", "a dog ran"), 0.0);
    }

    #[test]
    fn word_accuracy_short_transcript() {
        assert_eq!(word_accuracy("i like to play", "i like"), 50.0);
    }

    #[test]
    fn word_accuracy_degenerate_inputs() {
        assert_eq!(word_accuracy("", "hello"), 0.0);
        assert_eq!(word_accuracy("hello", ""), 0.0);
        assert_eq!(word_accuracy("   ", "hello"), 100.0);
        assert_eq!(word_accuracy("hello", "   "), 0.0);
    }
}
