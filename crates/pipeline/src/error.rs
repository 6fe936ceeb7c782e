//! Error types for the scoring pipeline.

use thiserror::Error;

/// Conditions the pipeline surfaces to its caller instead of resolving by policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// The profile's genre weights sum to zero, so no score can be normalized.
    /// Callers treat this as "no recommendation possible".
    #[error("Degenerate profile: total genre weight is {total_weight}, no recommendation possible")]
    DegenerateProfile { total_weight: f64 },

    /// A genre weight or the total is NaN or infinite; scores would be NaN
    #[error("Non-finite profile: total genre weight is {total_weight}")]
    NonFiniteProfile { total_weight: f64 },

    /// Profile and feature matrix were built over different genre vocabularies
    #[error("Vocabulary mismatch: matrix has {expected} genres, profile has {found}")]
    VocabularyMismatch { expected: usize, found: usize },

    /// There is nothing to score
    #[error("Catalog is empty")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, RecommendError>;
