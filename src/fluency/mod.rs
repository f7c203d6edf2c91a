pub mod analyzer;
pub mod pauses;

pub use analyzer::{pause_score, speaking_rate, stutter_score, FluencyAnalyzer};
pub use pauses::PauseDetector;
