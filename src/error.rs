use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid level '{level}' (expected one of: beginner, intermediate)")]
    InvalidLevel { level: String },
    #[error("invalid setting `{field}`: {message}")]
    InvalidSetting {
        field: &'static str,
        message: String,
    },
    #[error("invalid text: {message}")]
    InvalidText { message: String },
    #[error("audio error while {context}: {source}")]
    Audio {
        context: &'static str,
        #[source]
        source: hound::Error,
    },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("CSV error while {context}: {source}")]
    Csv {
        context: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("{stage} failed: {message}")]
    Processing {
        stage: &'static str,
        message: String,
    },
}

impl ScoringError {
    pub(crate) fn invalid_level(level: impl Into<String>) -> Self {
        Self::InvalidLevel {
            level: level.into(),
        }
    }

    pub(crate) fn invalid_setting(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_text(message: impl Into<String>) -> Self {
        Self::InvalidText {
            message: message.into(),
        }
    }

    pub(crate) fn audio(context: &'static str, source: hound::Error) -> Self {
        Self::Audio { context, source }
    }

    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn csv(context: &'static str, source: csv::Error) -> Self {
        Self::Csv { context, source }
    }

    pub(crate) fn processing(stage: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Processing {
            stage,
            message: err.to_string(),
        }
    }

    /// Whether this error reflects caller misuse rather than poor input quality.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLevel { .. } | Self::InvalidSetting { .. } | Self::InvalidText { .. }
        )
    }
}
