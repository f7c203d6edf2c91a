pub mod aligner;
pub mod checker;
pub mod similarity;

// Re-export the main types for convenience
pub use aligner::{AlignedWord, EditDistanceAligner, EditOp, PositionalAligner, WordAligner};
pub use checker::PronunciationChecker;
pub use similarity::{word_similarity, words_similar};

use crate::config::AlignerKind;

/// Build the aligner selected in configuration.
pub fn aligner_for(kind: AlignerKind) -> Box<dyn WordAligner> {
    match kind {
        AlignerKind::Positional => Box::new(PositionalAligner),
        AlignerKind::EditDistance => Box::new(EditDistanceAligner),
    }
}
