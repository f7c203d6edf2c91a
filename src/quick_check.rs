use crate::pronunciation::{EditDistanceAligner, EditOp};
use crate::util::words;
use itertools::Itertools;
use serde::Serialize;

/// Transcript-only check of which words were skipped or said differently
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickCheck {
    pub score: u32,
    pub missed_words: Vec<String>,
    /// (expected, spoken) pairs.
    pub mispronounced: Vec<(String, String)>,
    pub feedback: String,
}

pub fn quick_check(expected_text: &str, transcribed_text: &str) -> QuickCheck {
    let expected = words(expected_text);
    let spoken = words(transcribed_text);

    let mut missed_words = Vec::new();
    let mut mispronounced = Vec::new();
    for op in EditDistanceAligner::opcodes(&expected, &spoken) {
        match op {
            EditOp::Delete { expected: e } => missed_words.push(expected[e].clone()),
            EditOp::Replace { expected: e, spoken: s } => {
                mispronounced.push((expected[e].clone(), spoken[s].clone()))
            }
            EditOp::Equal { .. } | EditOp::Insert { .. } => {}
        }
    }

    let score = if expected.is_empty() {
        0
    } else {
        let correct = expected.len() - missed_words.len() - mispronounced.len();
        (correct * 100 / expected.len()) as u32
    };

    let feedback = quick_feedback(score, &missed_words, &mispronounced);
    QuickCheck {
        score,
        missed_words,
        mispronounced,
        feedback,
    }
}

fn quick_feedback(score: u32, missed: &[String], mispronounced: &[(String, String)]) -> String {
    let mut message = match score {
        90.. => "Amazing job! 🌟 ",
        70..=89 => "Great effort! 👍 ",
        _ => "Keep practicing! 💪 ",
    }
    .to_string();

    if !missed.is_empty() {
        message.push_str(&format!("Try not to skip: {}. ", missed.join(", ")));
    }
    if !mispronounced.is_empty() {
        message.push_str(&format!(
            "Let's practice these words: {}",
            mispronounced.iter().map(|(expected, _)| expected).join(", ")
        ));
    }
    message
}
