use crate::error::ScoringError;

pub const MAX_EXPECTED_CHARS: usize = 1000;
const FORBIDDEN: [char; 4] = ['<', '>', '{', '}'];

/// Check a target sentence before it is offered for scoring.
pub fn validate_expected_text(text: &str) -> Result<(), ScoringError> {
    if text.trim().is_empty() {
        return Err(ScoringError::invalid_text("text cannot be empty"));
    }
    let chars = text.chars().count();
    if chars > MAX_EXPECTED_CHARS {
        return Err(ScoringError::invalid_text(format!(
            "text is too long ({chars} characters, max {MAX_EXPECTED_CHARS})"
        )));
    }
    if let Some(c) = text.chars().find(|c| FORBIDDEN.contains(c)) {
        return Err(ScoringError::invalid_text(format!(
            "text contains invalid character '{c}'"
        )));
    }
    Ok(())
}
