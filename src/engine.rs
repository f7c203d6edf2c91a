use crate::audio::AudioClip;
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::fluency::FluencyAnalyzer;
use crate::proficiency::{fuse, word_accuracy};
use crate::pronunciation::{aligner_for, PronunciationChecker, WordAligner};
use crate::transcription::{Transcriber, TranscriberChain, Transcription};
use crate::types::{OverallResult, RecognitionMethod, ScoreMode};
use crate::util::clamp_score;
use log::{debug, warn};

/// Scores one reading at a time. Holds no per-call state, so a single engine
/// can be shared across threads.
pub struct ProficiencyEngine {
    config: ScoringConfig,
    pronunciation: PronunciationChecker,
    fluency: FluencyAnalyzer,
}

impl std::fmt::Debug for ProficiencyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProficiencyEngine")
            .field("config", &self.config)
            .field("fluency", &self.fluency)
            .finish_non_exhaustive()
    }
}

impl ProficiencyEngine {
    /// Fails only on invalid configuration.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        let aligner = aligner_for(config.aligner);
        Self::with_aligner(config, aligner)
    }

    pub fn with_aligner(
        config: ScoringConfig,
        aligner: Box<dyn WordAligner>,
    ) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self {
            pronunciation: PronunciationChecker::new(aligner, config.mispronounced_below),
            fluency: FluencyAnalyzer::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a reading whose transcript is already known.
    pub fn analyze(
        &self,
        expected_text: &str,
        transcription: Transcription,
        audio: Option<&AudioClip>,
    ) -> OverallResult {
        let Transcription { text, method } = transcription;

        let mut pronunciation = self.pronunciation.check(expected_text, &text);
        let mut fluency = self.fluency.analyze(audio, &text);
        pronunciation.score = clamp_score(pronunciation.score);
        pronunciation.phonetic_accuracy = pronunciation.score;
        fluency.score = clamp_score(fluency.score);

        let overall_score = fuse(&pronunciation, &fluency);
        let word_accuracy = word_accuracy(expected_text, &text);

        let degraded = pronunciation.mode == ScoreMode::Fallback || fluency.mode == ScoreMode::Fallback;
        let recognition_method = if degraded {
            RecognitionMethod::Degraded
        } else {
            method
        };
        debug!(
            "overall {overall_score} (pronunciation {}, fluency {}), {recognition_method}",
            pronunciation.score, fluency.score
        );

        OverallResult {
            transcribed_text: text,
            expected_text: expected_text.to_string(),
            pronunciation,
            fluency,
            overall_score,
            word_accuracy,
            recognition_method,
        }
    }

    /// Transcribe with the chain, then score.
    pub fn assess(
        &self,
        expected_text: &str,
        audio: Option<&AudioClip>,
        chain: &TranscriberChain,
    ) -> OverallResult {
        let transcription = chain.run(audio);
        self.analyze(expected_text, transcription, audio)
    }

    /// Score with a single transcriber.
    pub fn assess_with(
        &self,
        expected_text: &str,
        audio: Option<&AudioClip>,
        transcriber: &dyn Transcriber,
    ) -> OverallResult {
        let transcription = match transcriber.transcribe(audio) {
            Ok(text) if !text.trim().is_empty() => Transcription::primary(text.trim()),
            Ok(_) => Transcription::degraded(),
            Err(err) => {
                warn!("{} failed: {err}", transcriber.name());
                Transcription::degraded()
            }
        };
        self.analyze(expected_text, transcription, audio)
    }
}
