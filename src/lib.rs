// Library surface for the scoring engine; main.rs is a thin CLI over it.
pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod fluency;
pub mod practice;
pub mod proficiency;
pub mod pronunciation;
pub mod quick_check;
pub mod report;
pub mod text;
pub mod transcription;
pub mod types;
pub mod util;

pub use audio::AudioClip;
pub use config::{AlignerKind, ConfigStore, FileConfigStore, ScoringConfig};
pub use engine::ProficiencyEngine;
pub use error::ScoringError;
pub use feedback::FeedbackComposer;
pub use practice::{Level, PracticeSet};
pub use report::Assessment;
pub use transcription::{FixedTranscript, FnTranscriber, Transcriber, TranscriberChain, Transcription};
pub use types::{
    FeedbackPayload, FluencyResult, OverallResult, Pause, PronunciationResult, RecognitionMethod,
    ScoreMode, WordScores,
};
