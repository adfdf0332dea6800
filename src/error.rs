use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a single augmentation call or by engine construction.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// The candidate selector exhausted its threshold relaxation without
    /// finding at least two terms to rank. Appending fewer than two breaks
    /// the top-two comparison, so this is fatal to the call.
    #[error("only {found} candidate term(s) available after threshold relaxation, need at least 2")]
    InsufficientCandidates { found: usize },

    /// Feedback vector and result batch must share one index space.
    #[error("feedback length {feedback} does not match result count {results}")]
    FeedbackMismatch { feedback: usize, results: usize },

    /// The stop-word file could not be read at construction.
    #[error("failed to load stop words from {path}")]
    StopWords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
