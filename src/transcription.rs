use crate::audio::AudioClip;
use crate::error::ScoringError;
use crate::types::RecognitionMethod;
use log::{info, warn};

/// Text recognised from a reading, and which strategy produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub text: String,
    pub method: RecognitionMethod,
}

impl Transcription {
    pub fn primary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            method: RecognitionMethod::Primary,
        }
    }

    /// Nothing was recognised.
    pub fn degraded() -> Self {
        Self {
            text: String::new(),
            method: RecognitionMethod::Degraded,
        }
    }
}

/// A speech recogniser the engine can ask for a transcript
pub trait Transcriber: Send + Sync {
    fn name(&self) -> &str;

    /// Empty text means nothing was recognised; errors are treated the same way.
    fn transcribe(&self, audio: Option<&AudioClip>) -> Result<String, ScoringError>;
}

/// Returns text supplied up front, e.g. from an external recogniser.
#[derive(Debug, Clone)]
pub struct FixedTranscript {
    name: String,
    text: String,
}

impl FixedTranscript {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl Transcriber for FixedTranscript {
    fn name(&self) -> &str {
        &self.name
    }

    fn transcribe(&self, _audio: Option<&AudioClip>) -> Result<String, ScoringError> {
        Ok(self.text.clone())
    }
}

/// Adapts a closure into a transcriber
pub struct FnTranscriber<F> {
    name: String,
    f: F,
}

impl<F> FnTranscriber<F>
where
    F: Fn(Option<&AudioClip>) -> Result<String, ScoringError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Transcriber for FnTranscriber<F>
where
    F: Fn(Option<&AudioClip>) -> Result<String, ScoringError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transcribe(&self, audio: Option<&AudioClip>) -> Result<String, ScoringError> {
        (self.f)(audio)
    }
}

/// Ordered transcribers, tried until one recognises something
#[derive(Default)]
pub struct TranscriberChain {
    strategies: Vec<Box<dyn Transcriber>>,
}

impl TranscriberChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, strategy: impl Transcriber + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn push(&mut self, strategy: Box<dyn Transcriber>) {
        self.strategies.push(strategy);
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// The first strategy is `Primary`, any later one `FallbackEngine`;
    /// if none yields text the result is empty and `Degraded`.
    pub fn run(&self, audio: Option<&AudioClip>) -> Transcription {
        for (i, strategy) in self.strategies.iter().enumerate() {
            match strategy.transcribe(audio) {
                Ok(text) if !text.trim().is_empty() => {
                    info!("transcribed with {}", strategy.name());
                    let method = if i == 0 {
                        RecognitionMethod::Primary
                    } else {
                        RecognitionMethod::FallbackEngine
                    };
                    return Transcription {
                        text: text.trim().to_string(),
                        method,
                    };
                }
                Ok(_) => info!("{} recognised nothing", strategy.name()),
                Err(err) => warn!("{} failed: {err}", strategy.name()),
            }
        }
        Transcription::degraded()
    }
}
