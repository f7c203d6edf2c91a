use super::pauses::PauseDetector;
use crate::audio::AudioClip;
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::types::{FluencyResult, ScoreMode};
use crate::util::{round1, word_count, words};
use itertools::Itertools;
use log::{debug, warn};

/// Score used when there is no usable audio.
pub const TEXT_ONLY_SCORE: f64 = 75.0;
/// Stutter scores below this flag stuttering.
pub const STUTTER_FLAG_BELOW: f64 = 80.0;

const RATE_WEIGHT: f64 = 0.4;
const PAUSE_WEIGHT: f64 = 0.3;
const STUTTER_WEIGHT: f64 = 0.3;
const PAUSE_PENALTY: f64 = 10.0;
const MAX_PAUSE_PENALTY: f64 = 40.0;

pub const HINT_FASTER: &str = "Try speaking a little faster";
pub const HINT_SLOWER: &str = "Try speaking a little slower";
pub const HINT_SMOOTHER: &str = "Practice reading more smoothly";
pub const HINT_TAKE_TIME: &str = "Take your time with each word";
pub const HINT_KEEP_PRACTICING: &str = "Keep practicing!";

/// Pause, rate, and repetition analysis of one reading
#[derive(Debug, Clone)]
pub struct FluencyAnalyzer {
    detector: PauseDetector,
    optimal_rate: (f64, f64),
    slow_rate_wpm: f64,
    fast_rate_wpm: f64,
    pause_hint_count: usize,
}

impl FluencyAnalyzer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            detector: PauseDetector::new(
                config.silence_threshold,
                config.min_pause_secs,
                config.frame_ms,
                config.hop_ms,
            ),
            optimal_rate: (config.optimal_rate_min_wpm, config.optimal_rate_max_wpm),
            slow_rate_wpm: config.slow_rate_wpm,
            fast_rate_wpm: config.fast_rate_wpm,
            pause_hint_count: config.pause_hint_count,
        }
    }

    /// Never fails: absent or unusable audio yields the text-only estimate.
    pub fn analyze(&self, audio: Option<&AudioClip>, transcribed_text: &str) -> FluencyResult {
        let Some(clip) = audio else {
            debug!("no audio, using text-only fluency estimate");
            return text_only(transcribed_text);
        };

        match self.measure(clip, transcribed_text) {
            Ok(result) => result,
            Err(err) => {
                warn!("fluency analysis fell back to text only: {err}");
                text_only(transcribed_text)
            }
        }
    }

    fn measure(&self, clip: &AudioClip, transcribed_text: &str) -> Result<FluencyResult, ScoringError> {
        let pauses = self.detector.detect(clip)?;
        let speaking_rate = speaking_rate(transcribed_text, clip.duration_secs());
        let stutter = stutter_score(transcribed_text);
        let score = self.fluency_score(speaking_rate, pauses.len(), stutter);
        debug!(
            "fluency {score}: {speaking_rate:.1} wpm, {} pauses, stutter {stutter:.1}",
            pauses.len()
        );

        Ok(FluencyResult {
            score,
            speaking_rate,
            pause_count: pauses.len(),
            hesitations: pauses.len(),
            stuttering_detected: stutter < STUTTER_FLAG_BELOW,
            recommendations: self.recommendations(speaking_rate, pauses.len(), stutter),
            pauses,
            mode: ScoreMode::Measured,
        })
    }

    pub fn rate_score(&self, speaking_rate: f64) -> f64 {
        let (lo, hi) = self.optimal_rate;
        if (lo..=hi).contains(&speaking_rate) {
            100.0
        } else if speaking_rate < lo {
            (speaking_rate / lo * 100.0).max(0.0)
        } else {
            (100.0 - (speaking_rate - hi) / 50.0 * 20.0).max(0.0)
        }
    }

    pub fn fluency_score(&self, speaking_rate: f64, pause_count: usize, stutter: f64) -> f64 {
        round1(
            self.rate_score(speaking_rate) * RATE_WEIGHT
                + pause_score(pause_count) * PAUSE_WEIGHT
                + stutter * STUTTER_WEIGHT,
        )
    }

    pub fn recommendations(&self, speaking_rate: f64, pause_count: usize, stutter: f64) -> Vec<String> {
        let mut hints = Vec::new();
        if speaking_rate < self.slow_rate_wpm {
            hints.push(HINT_FASTER.to_string());
        }
        if speaking_rate > self.fast_rate_wpm {
            hints.push(HINT_SLOWER.to_string());
        }
        if pause_count > self.pause_hint_count {
            hints.push(HINT_SMOOTHER.to_string());
        }
        if stutter < STUTTER_FLAG_BELOW {
            hints.push(HINT_TAKE_TIME.to_string());
        }
        hints
    }
}

/// Words per minute over the whole clip; 0 for an empty clip.
pub fn speaking_rate(transcribed_text: &str, duration_secs: f64) -> f64 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    word_count(transcribed_text) as f64 / duration_secs * 60.0
}

/// 100 minus twice the share of words that repeat the word before them, floored at 0.
pub fn stutter_score(transcribed_text: &str) -> f64 {
    let tokens = words(transcribed_text);
    if tokens.is_empty() {
        return 100.0;
    }
    let repeated = tokens.iter().tuple_windows().filter(|(a, b)| a == b).count();
    let repetition_rate = repeated as f64 / tokens.len() as f64;
    (100.0 - repetition_rate * 200.0).max(0.0)
}

pub fn pause_score(pause_count: usize) -> f64 {
    (100.0 - (pause_count as f64 * PAUSE_PENALTY).min(MAX_PAUSE_PENALTY)).max(0.0)
}

fn text_only(transcribed_text: &str) -> FluencyResult {
    FluencyResult {
        score: TEXT_ONLY_SCORE,
        speaking_rate: (word_count(transcribed_text) * 2) as f64,
        pause_count: 0,
        hesitations: 0,
        pauses: Vec::new(),
        stuttering_detected: false,
        recommendations: vec![HINT_KEEP_PRACTICING.to_string()],
        mode: ScoreMode::Fallback,
    }
}
