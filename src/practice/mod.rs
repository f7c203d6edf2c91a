use crate::error::ScoringError;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::str::FromStr;

static SENTENCE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/practice");

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
}

impl Level {
    pub const ALL: [Level; 2] = [Level::Beginner, Level::Intermediate];
}

impl FromStr for Level {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            _ => Err(ScoringError::invalid_level(s)),
        }
    }
}

/// Sentences offered for reading practice at one level
#[derive(Deserialize, Clone, Debug)]
pub struct PracticeSet {
    pub level: String,
    pub sentences: Vec<String>,
}

impl PracticeSet {
    pub fn for_level(level: Level) -> Result<Self, ScoringError> {
        let file_name = format!("{level}.json");
        let file = SENTENCE_DIR.get_file(&file_name).ok_or_else(|| {
            ScoringError::processing("loading practice sentences", format!("{file_name} not embedded"))
        })?;
        let contents = file.contents_utf8().ok_or_else(|| {
            ScoringError::processing("loading practice sentences", format!("{file_name} is not UTF-8"))
        })?;
        serde_json::from_str(contents).map_err(|e| ScoringError::json("parse practice sentences", e))
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.sentences.choose(rng).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_level_has_sentences() {
        for level in Level::ALL {
            let set = PracticeSet::for_level(level).unwrap();
            assert_eq!(set.level, level.to_string());
            assert!(!set.sentences.is_empty());
        }
    }

    #[test]
    fn beginner_sentences() {
        let set = PracticeSet::for_level(Level::Beginner).unwrap();
        assert_eq!(set.sentences.len(), 5);
        assert!(set.sentences.contains(&"The cat sits on the mat.".to_string()));
    }

    #[test]
    fn pick_comes_from_the_set() {
        let set = PracticeSet::for_level(Level::Intermediate).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            let s = set.pick(&mut rng).unwrap();
            assert!(set.sentences.iter().any(|x| x == s));
        }
    }

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!("beginner".parse::<Level>().unwrap(), Level::Beginner);
        assert_eq!(" Intermediate ".parse::<Level>().unwrap(), Level::Intermediate);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = "expert".parse::<Level>().unwrap_err();
        assert_matches!(err, ScoringError::InvalidLevel { ref level } if level == "expert");
        assert!(err.is_configuration_error());
    }
}
