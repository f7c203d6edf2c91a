use super::aligner::{AlignedWord, WordAligner};
use super::similarity::word_similarity;
use crate::error::ScoringError;
use crate::types::{PronunciationResult, ScoreMode, WordScores};
use crate::util::{mean, round1, words};
use log::{debug, warn};

/// Score given when nothing was recognised at all.
pub const NO_SPEECH_SCORE: f64 = 20.0;
/// Score given when the expected sentence has no words to compare.
pub const EMPTY_SENTENCE_SCORE: f64 = 50.0;
const PENALTY_PER_MISPRONOUNCED: f64 = 8.0;
const MAX_PENALTY: f64 = 40.0;

/// Word-by-word pronunciation scoring against the expected sentence
pub struct PronunciationChecker {
    aligner: Box<dyn WordAligner>,
    mispronounced_below: f64,
}

impl PronunciationChecker {
    pub fn new(aligner: Box<dyn WordAligner>, mispronounced_below: f64) -> Self {
        Self {
            aligner,
            mispronounced_below,
        }
    }

    /// Never fails: an empty transcript and internal alignment failures both
    /// resolve to fallback results.
    pub fn check(&self, expected_text: &str, transcribed_text: &str) -> PronunciationResult {
        if transcribed_text.trim().is_empty() {
            debug!("empty transcript, every expected word counts as mispronounced");
            return PronunciationResult {
                score: NO_SPEECH_SCORE,
                word_scores: WordScores::new(),
                mispronounced_words: words(expected_text),
                phonetic_accuracy: NO_SPEECH_SCORE,
                mode: ScoreMode::Fallback,
            };
        }

        match self.score_aligned(expected_text, transcribed_text) {
            Ok(result) => result,
            Err(err) => {
                warn!("pronunciation scoring fell back to word presence: {err}");
                self.score_by_presence(expected_text, transcribed_text)
            }
        }
    }

    fn score_aligned(
        &self,
        expected_text: &str,
        transcribed_text: &str,
    ) -> Result<PronunciationResult, ScoringError> {
        let expected = words(expected_text);
        let spoken = words(transcribed_text);

        let aligned = self.aligner.align(&expected, &spoken)?;
        check_alignment(&expected, &aligned)?;

        let mut word_scores = WordScores::new();
        for AlignedWord { expected, spoken } in aligned {
            let similarity = spoken
                .as_deref()
                .map_or(0.0, |s| word_similarity(&expected, s));
            word_scores.insert(expected, similarity);
        }

        let mispronounced_words = self.mispronounced(&word_scores);
        let score = aggregate_score(&word_scores, mispronounced_words.len());
        debug!(
            "pronunciation {score} over {} words, {} mispronounced",
            word_scores.len(),
            mispronounced_words.len()
        );

        Ok(PronunciationResult {
            score,
            word_scores,
            mispronounced_words,
            phonetic_accuracy: score,
            mode: ScoreMode::Measured,
        })
    }

    /// A word is correct when it appears anywhere in the transcript.
    fn score_by_presence(&self, expected_text: &str, transcribed_text: &str) -> PronunciationResult {
        let expected = words(expected_text);
        let spoken = words(transcribed_text);

        if expected.is_empty() {
            return PronunciationResult {
                score: EMPTY_SENTENCE_SCORE,
                word_scores: WordScores::new(),
                mispronounced_words: Vec::new(),
                phonetic_accuracy: EMPTY_SENTENCE_SCORE,
                mode: ScoreMode::Fallback,
            };
        }

        let mut word_scores = WordScores::new();
        let mut matches = 0usize;
        for word in &expected {
            if spoken.contains(word) {
                matches += 1;
                word_scores.insert(word.as_str(), 100.0);
            } else {
                word_scores.insert(word.as_str(), 0.0);
            }
        }

        let score = round1(matches as f64 / expected.len() as f64 * 100.0);
        PronunciationResult {
            score,
            mispronounced_words: self.mispronounced(&word_scores),
            word_scores,
            phonetic_accuracy: score,
            mode: ScoreMode::Fallback,
        }
    }

    fn mispronounced(&self, word_scores: &WordScores) -> Vec<String> {
        word_scores
            .iter()
            .filter(|(_, score)| *score < self.mispronounced_below)
            .map(|(word, _)| word.to_string())
            .collect()
    }
}

fn check_alignment(expected: &[String], aligned: &[AlignedWord]) -> Result<(), ScoringError> {
    if aligned.len() != expected.len() {
        return Err(ScoringError::processing(
            "word alignment",
            format!(
                "aligner returned {} pairs for {} expected words",
                aligned.len(),
                expected.len()
            ),
        ));
    }
    if let Some((i, pair)) = aligned
        .iter()
        .enumerate()
        .find(|(i, pair)| pair.expected != expected[*i])
    {
        return Err(ScoringError::processing(
            "word alignment",
            format!("pair {i} is for '{}', expected '{}'", pair.expected, expected[i]),
        ));
    }
    Ok(())
}

/// Mean word score less a capped penalty per mispronounced word, floored at 0.
fn aggregate_score(word_scores: &WordScores, mispronounced: usize) -> f64 {
    let Some(avg) = mean(&word_scores.scores()) else {
        return EMPTY_SENTENCE_SCORE;
    };
    let penalty = (mispronounced as f64 * PENALTY_PER_MISPRONOUNCED).min(MAX_PENALTY);
    round1((avg - penalty).max(0.0))
}
