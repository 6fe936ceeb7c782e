//! The Recommendation Scorer.
//!
//! ## Algorithm
//! For every movie m in the feature matrix:
//! - raw(m) = Σ_g vector_m[g] * profile[g]
//! - score(m) = raw(m) / Σ_g profile[g]
//!
//! The normalizer is the profile's total weight, not the movie's genre count:
//! scores are comparable across users with different rating magnitudes but
//! are not probabilities.
//!
//! Ranking is by descending score, ties by ascending movie id. Truncation to
//! a top N is left to the caller.

use crate::error::{RecommendError, Result};
use crate::features::{FeatureVector, GenreFeatureMatrix};
use crate::profile::UserProfile;
use data_loader::MovieId;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// A movie's normalized score against a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredMovie {
    pub movie_id: MovieId,
    pub score: f64,
}

/// Scores and ranks the feature matrix against a user profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationScorer;

impl RecommendationScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score every movie in the matrix and rank the result.
    ///
    /// # Returns
    /// * `Ok(Vec<ScoredMovie>)` - every matrix movie, best first
    /// * `Err(DegenerateProfile)` - the profile's weights sum to zero
    /// * `Err(NonFiniteProfile)` - a weight or the total is NaN or infinite
    /// * `Err(VocabularyMismatch)` - profile and matrix use different vocabularies
    pub fn score(
        &self,
        matrix: &GenreFeatureMatrix,
        profile: &UserProfile,
    ) -> Result<Vec<ScoredMovie>> {
        if !Arc::ptr_eq(matrix.vocabulary(), profile.vocabulary())
            && matrix.vocabulary() != profile.vocabulary()
        {
            return Err(RecommendError::VocabularyMismatch {
                expected: matrix.vocabulary().len(),
                found: profile.vocabulary().len(),
            });
        }

        let total_weight = profile.total_weight();
        if !total_weight.is_finite() || profile.weights().iter().any(|w| !w.is_finite()) {
            return Err(RecommendError::NonFiniteProfile { total_weight });
        }
        if profile.is_degenerate() {
            return Err(RecommendError::DegenerateProfile { total_weight });
        }

        let mut scored: Vec<ScoredMovie> = matrix
            .rows()
            .map(|(movie_id, row)| ScoredMovie {
                movie_id,
                score: positive_zero(raw_score(row, profile.weights()) / total_weight),
            })
            .collect();

        rank(&mut scored);

        debug!(
            "Scored {} movies against profile weight {}",
            scored.len(),
            total_weight
        );
        Ok(scored)
    }
}

/// Σ_g vector[g] * weights[g]
fn raw_score(row: &FeatureVector, weights: &[f64]) -> f64 {
    row.active_positions().map(|pos| weights[pos]).sum()
}

/// Map `-0.0` to `0.0`. An empty float sum is `-0.0`, and `total_cmp`
/// would otherwise order it below an equal `0.0`.
fn positive_zero(score: f64) -> f64 {
    score + 0.0
}

/// Sort by descending score, then ascending movie id.
pub fn rank(scored: &mut [ScoredMovie]) {
    scored.sort_by(compare_ranked);
}

fn compare_ranked(a: &ScoredMovie, b: &ScoredMovie) -> Ordering {
    positive_zero(b.score)
        .total_cmp(&positive_zero(a.score))
        .then_with(|| a.movie_id.cmp(&b.movie_id))
}
