use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Whether a stage measured its inputs or substituted a fallback value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScoreMode {
    #[default]
    Measured,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RecognitionMethod {
    Primary,
    FallbackEngine,
    Degraded,
}

/// Expected word -> similarity in [0, 100], in first-seen order.
///
/// A word that repeats in the expected sentence keeps a single entry holding
/// the score of its last occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordScores {
    entries: Vec<(String, f64)>,
}

impl WordScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: impl Into<String>, score: f64) {
        let word = word.into();
        match self.entries.iter_mut().find(|(w, _)| *w == word) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((word, score)),
        }
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(w, s)| (w.as_str(), *s))
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(w, _)| w.as_str())
    }

    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, s)| *s).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for WordScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, score) in &self.entries {
            map.serialize_entry(word, score)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PronunciationResult {
    pub score: f64,
    pub word_scores: WordScores,
    pub mispronounced_words: Vec<String>,
    pub phonetic_accuracy: f64,
    pub mode: ScoreMode,
}

/// A silent stretch of audio, in seconds from the start of the clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pause {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluencyResult {
    pub score: f64,
    /// Words per minute.
    pub speaking_rate: f64,
    pub pause_count: usize,
    pub hesitations: usize,
    pub pauses: Vec<Pause>,
    pub stuttering_detected: bool,
    pub recommendations: Vec<String>,
    pub mode: ScoreMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallResult {
    pub transcribed_text: String,
    pub expected_text: String,
    pub pronunciation: PronunciationResult,
    pub fluency: FluencyResult,
    pub overall_score: f64,
    pub word_accuracy: f64,
    pub recognition_method: RecognitionMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackPayload {
    pub score: f64,
    pub message: String,
    pub specific_feedback: Vec<String>,
    pub encouragement: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_scores_last_write_wins_in_first_position() {
        let mut scores = WordScores::new();
        scores.insert("the", 100.0);
        scores.insert("cat", 40.0);
        scores.insert("the", 0.0);

        assert_eq!(scores.len(), 2);
        assert_eq!(scores.get("the"), Some(0.0));
        assert_eq!(scores.words().collect::<Vec<_>>(), vec!["the", "cat"]);
        assert_eq!(scores.scores(), vec![0.0, 40.0]);
    }

    #[test]
    fn word_scores_serialize_as_ordered_object() {
        let mut scores = WordScores::new();
        scores.insert("zebra", 90.0);
        scores.insert("apple", 10.0);

        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"{"zebra":90.0,"apple":10.0}"#);
    }

    #[test]
    fn enums_render_kebab_case() {
        assert_eq!(RecognitionMethod::FallbackEngine.to_string(), "fallback-engine");
        assert_eq!(
            serde_json::to_string(&RecognitionMethod::Degraded).unwrap(),
            r#""degraded""#
        );
        assert_eq!(ScoreMode::Fallback.to_string(), "fallback");
    }
}
