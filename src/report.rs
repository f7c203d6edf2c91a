use crate::error::ScoringError;
use crate::types::{FeedbackPayload, OverallResult};
use itertools::Itertools;
use serde::Serialize;
use std::io::Write;

/// Everything returned for one reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub analysis: OverallResult,
    pub feedback: FeedbackPayload,
}

fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

/// Flat key/value record; numbers to one decimal place, lists joined with `|`.
pub fn flatten(assessment: &Assessment) -> Vec<(&'static str, String)> {
    let a = &assessment.analysis;
    let f = &assessment.feedback;
    let p = &a.pronunciation;
    let fl = &a.fluency;

    vec![
        ("expected_text", a.expected_text.clone()),
        ("transcribed_text", a.transcribed_text.clone()),
        ("recognition_method", a.recognition_method.to_string()),
        ("overall_score", one_decimal(a.overall_score)),
        ("word_accuracy", one_decimal(a.word_accuracy)),
        ("pronunciation_score", one_decimal(p.score)),
        ("pronunciation_mode", p.mode.to_string()),
        ("mispronounced_words", p.mispronounced_words.join("|")),
        (
            "word_scores",
            p.word_scores
                .iter()
                .map(|(word, score)| format!("{word}={}", one_decimal(score)))
                .join("|"),
        ),
        ("fluency_score", one_decimal(fl.score)),
        ("fluency_mode", fl.mode.to_string()),
        ("speaking_rate", one_decimal(fl.speaking_rate)),
        ("pause_count", fl.pause_count.to_string()),
        ("hesitations", fl.hesitations.to_string()),
        ("stuttering_detected", fl.stuttering_detected.to_string()),
        ("recommendations", fl.recommendations.join("|")),
        ("feedback_score", one_decimal(f.score)),
        ("feedback_message", f.message.clone()),
        ("specific_feedback", f.specific_feedback.join("|")),
        ("encouragement", f.encouragement.clone()),
    ]
}

/// Header row plus one record row.
pub fn write_csv<W: Write>(writer: W, assessment: &Assessment) -> Result<(), ScoringError> {
    let record = flatten(assessment);
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(record.iter().map(|(key, _)| *key))
        .map_err(|e| ScoringError::csv("write header", e))?;
    csv.write_record(record.iter().map(|(_, value)| value.as_str()))
        .map_err(|e| ScoringError::csv("write record", e))?;
    csv.flush().map_err(|e| ScoringError::io("flush csv", e))
}

pub fn write_json<W: Write>(writer: W, assessment: &Assessment) -> Result<(), ScoringError> {
    serde_json::to_writer_pretty(writer, assessment)
        .map_err(|e| ScoringError::json("write assessment", e))
}
