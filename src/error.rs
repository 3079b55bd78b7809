use thiserror::Error;

/// Failure of the external fitting/scoring primitive.
///
/// Non-convergence, singular covariances and malformed inputs are all
/// reported through the same two variants; the selection layer treats them
/// uniformly and only ever skips the offending candidate.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("fit with {num_states} states failed: {message}")]
    Fit { num_states: usize, message: String },
    #[error("scoring failed: {message}")]
    Score { message: String },
}

impl ModelError {
    pub fn fit(num_states: usize, err: impl std::fmt::Display) -> Self {
        Self::Fit {
            num_states,
            message: err.to_string(),
        }
    }

    pub fn score(err: impl std::fmt::Display) -> Self {
        Self::Score {
            message: err.to_string(),
        }
    }
}

/// Fold construction was impossible for a word.
#[derive(Debug, Error)]
#[error("cannot split {num_items} sequences into {num_folds} folds")]
pub struct PartitionError {
    pub num_items: usize,
    pub num_folds: usize,
}

/// Errors surfaced by `ModelSelector::select`.
///
/// Candidate failures never reach the caller; selection degrades toward the
/// constant-state-count baseline instead. The variants here are the two
/// paths where no usable model exists at all, plus construction with an
/// unknown word.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("word {word:?} is not present in the training corpus")]
    UnknownWord { word: String },
    #[error("fallback fit with {num_states} states failed for word {word:?}: {source}")]
    FallbackFit {
        word: String,
        num_states: usize,
        #[source]
        source: ModelError,
    },
    #[error(
        "no candidate in [{min_states}, {max_states}] produced a cross-validation \
         score for word {word:?}; check the candidate range against the corpus"
    )]
    NoScoredCandidate {
        word: String,
        min_states: usize,
        max_states: usize,
    },
}

impl SelectionError {
    pub(crate) fn unknown_word(word: impl Into<String>) -> Self {
        Self::UnknownWord { word: word.into() }
    }

    pub(crate) fn fallback_fit(word: &str, num_states: usize, source: ModelError) -> Self {
        Self::FallbackFit {
            word: word.to_string(),
            num_states,
            source,
        }
    }
}

/// Errors raised while loading a training configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }
}
