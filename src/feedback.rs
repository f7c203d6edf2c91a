use crate::types::{FeedbackPayload, OverallResult};
use crate::util::round1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const CELEBRATORY: [&str; 5] = [
    "Great job! You're doing amazing! 🌟",
    "Fantastic reading! Keep it up! 🎉",
    "You're getting better every time! 👏",
    "Wonderful pronunciation! 🎊",
    "You're a reading superstar! ⭐",
];

pub const ENCOURAGING: [&str; 5] = [
    "Don't worry, practice makes perfect! 💪",
    "You're learning so well! Try again! 🎯",
    "Almost there! One more try! 🚀",
    "Great effort! Let's practice together! 🤝",
    "You're on the right track! Keep going! 📈",
];

/// Scores at or above this draw from the celebratory pool.
pub const CELEBRATE_FROM: f64 = 70.0;
const MAX_WORD_PROMPTS: usize = 3;
const HESITATION_PROMPT_ABOVE: usize = 2;

pub fn tier_message(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "Perfect! You nailed it! 🏆",
        s if s >= 80.0 => "Excellent work! Almost perfect! 🥇",
        s if s >= 70.0 => "Good job! Just a little more practice! 🥈",
        s if s >= 60.0 => "Nice try! Let's work on a few words! 🥉",
        _ => "Great effort! Let's practice together! 💝",
    }
}

/// Turns a scored reading into learner-facing feedback.
///
/// The encouragement line is a random draw; inject a seeded rng to make it
/// repeatable.
pub struct FeedbackComposer<R = StdRng> {
    rng: R,
    slow_rate_wpm: f64,
    fast_rate_wpm: f64,
}

impl FeedbackComposer<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FeedbackComposer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            slow_rate_wpm: 100.0,
            fast_rate_wpm: 200.0,
        }
    }

    pub fn with_rate_thresholds(mut self, slow_rate_wpm: f64, fast_rate_wpm: f64) -> Self {
        self.slow_rate_wpm = slow_rate_wpm;
        self.fast_rate_wpm = fast_rate_wpm;
        self
    }

    pub fn compose(&mut self, overall: &OverallResult) -> FeedbackPayload {
        let score = overall.overall_score;
        let pool: &[&str] = if score >= CELEBRATE_FROM {
            &CELEBRATORY
        } else {
            &ENCOURAGING
        };
        let encouragement = pool.choose(&mut self.rng).unwrap_or(&pool[0]).to_string();

        let mut specific_feedback: Vec<String> = overall
            .pronunciation
            .mispronounced_words
            .iter()
            .take(MAX_WORD_PROMPTS)
            .map(|word| format!("Try saying '{word}' a bit clearer! 🗣️"))
            .collect();

        let fluency = &overall.fluency;
        if fluency.hesitations > HESITATION_PROMPT_ABOVE {
            specific_feedback.push("Try reading a bit more smoothly! Take your time! ⏰".to_string());
        }
        if fluency.speaking_rate < self.slow_rate_wpm {
            specific_feedback.push("You can speak a little faster! 🏃‍♀️".to_string());
        } else if fluency.speaking_rate > self.fast_rate_wpm {
            specific_feedback.push("Try slowing down just a little! 🐌".to_string());
        }

        FeedbackPayload {
            score: round1(score),
            message: tier_message(score).to_string(),
            specific_feedback,
            encouragement,
        }
    }
}
