//! # Recommender
//!
//! Coordinates one recommendation request:
//! 1. Resolve rating titles against the catalog
//! 2. Build the user profile from the shared feature matrix
//! 3. Score and rank every catalog movie
//! 4. Optionally drop movies the user already rated
//! 5. Truncate to the requested limit and join back to catalog entries
//!
//! The catalog and feature matrix are built once and shared behind `Arc`;
//! everything a request computes is local to it.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::error::{RecommendError, Result};
use crate::features::GenreFeatureMatrix;
use crate::profile::{Resolution, UserProfile, resolve_ratings};
use crate::scoring::{RecommendationScorer, ScoredMovie};
use data_loader::{CatalogIndex, MovieId, RatedMovie, RatingInput};

/// Final recommendation handed to the result consumer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub year: Option<u16>,
    pub genres: BTreeSet<String>,
    pub score: f64,
}

/// Per-request settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Number of recommendations to return
    pub limit: usize,
    /// Leave out movies the user rated
    pub exclude_rated: bool,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            exclude_rated: false,
        }
    }
}

/// Everything a request produced
#[derive(Debug, Clone)]
pub struct RecommendationReport {
    pub recommendations: Vec<MovieRecommendation>,
    pub profile: UserProfile,
    pub resolution: Resolution,
}

/// Orchestrates profile building and scoring over a shared catalog.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<CatalogIndex>,
    matrix: Arc<GenreFeatureMatrix>,
    scorer: RecommendationScorer,
}

impl Recommender {
    /// Build the feature matrix once for the given catalog.
    pub fn new(catalog: Arc<CatalogIndex>) -> Result<Self> {
        if catalog.is_empty() {
            return Err(RecommendError::EmptyCatalog);
        }
        let matrix = Arc::new(GenreFeatureMatrix::build(&catalog));
        info!(
            "Recommender ready: {} movies, {} genres",
            matrix.len(),
            matrix.vocabulary().len()
        );
        Ok(Self {
            catalog,
            matrix,
            scorer: RecommendationScorer::new(),
        })
    }

    pub fn catalog(&self) -> &Arc<CatalogIndex> {
        &self.catalog
    }

    pub fn matrix(&self) -> &Arc<GenreFeatureMatrix> {
        &self.matrix
    }

    /// Main entry point: recommendations for titled ratings.
    ///
    /// # Returns
    /// The report on success; `DegenerateProfile` if nothing the user rated
    /// contributed any genre weight.
    pub fn recommend(
        &self,
        inputs: &[RatingInput],
        options: RecommendOptions,
    ) -> Result<RecommendationReport> {
        let start_time = Instant::now();

        let resolution = resolve_ratings(inputs, &*self.catalog);
        info!(
            "Resolved {} of {} rated titles ({} unresolved, {} ambiguous)",
            resolution.rated.len(),
            inputs.len(),
            resolution.unresolved_count(),
            resolution.ambiguous_count()
        );

        let report = self.recommend_resolved(resolution, options)?;
        info!(
            "Total time to get {} recommendations: {:.2?}",
            report.recommendations.len(),
            start_time.elapsed()
        );
        Ok(report)
    }

    /// Recommendations for ratings already resolved to ids.
    pub fn recommend_rated(
        &self,
        rated: &[RatedMovie],
        options: RecommendOptions,
    ) -> Result<RecommendationReport> {
        let resolution = Resolution {
            rated: rated.to_vec(),
            issues: Vec::new(),
        };
        self.recommend_resolved(resolution, options)
    }

    /// Profile only, for inspection.
    pub fn profile(&self, rated: &[RatedMovie]) -> UserProfile {
        UserProfile::from_rated(rated, &self.matrix)
    }

    fn recommend_resolved(
        &self,
        resolution: Resolution,
        options: RecommendOptions,
    ) -> Result<RecommendationReport> {
        let profile = UserProfile::from_rated(&resolution.rated, &self.matrix);
        info!(
            "Built user profile over {} genres, total weight {}",
            profile.len(),
            profile.total_weight()
        );

        let scored = self.scorer.score(&self.matrix, &profile)?;
        info!("Scored {} movies", scored.len());

        let excluded: HashSet<MovieId> = if options.exclude_rated {
            resolution.rated.iter().map(|r| r.movie_id).collect()
        } else {
            HashSet::new()
        };

        let recommendations = self.select_top(scored, &excluded, options.limit);
        info!("Selected top {} recommendations", recommendations.len());

        Ok(RecommendationReport {
            recommendations,
            profile,
            resolution,
        })
    }

    /// Keep ranking order, skip excluded ids, stop at `limit`.
    fn select_top(
        &self,
        scored: Vec<ScoredMovie>,
        excluded: &HashSet<MovieId>,
        limit: usize,
    ) -> Vec<MovieRecommendation> {
        scored
            .into_iter()
            .filter(|s| !excluded.contains(&s.movie_id))
            .filter_map(|s| {
                self.catalog.get_movie(s.movie_id).map(|movie| MovieRecommendation {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    year: movie.year,
                    genres: movie.genres.clone(),
                    score: s.score,
                })
            })
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RawMovieRecord;

    fn create_test_recommender() -> Recommender {
        let catalog = CatalogIndex::load(vec![
            RawMovieRecord::new(1, "Toy Story", "Animation|Comedy"),
            RawMovieRecord::new(2, "Jumanji", "Adventure|Fantasy"),
            RawMovieRecord::new(3, "Grumpier Old Men", "Comedy|Romance"),
            RawMovieRecord::new(4, "Heat", "Action|Crime"),
        ]);
        Recommender::new(Arc::new(catalog)).unwrap()
    }

    #[test]
    fn test_recommend_ranks_and_truncates() {
        let recommender = create_test_recommender();
        let inputs = vec![
            RatingInput::new("Toy Story", 3.5),
            RatingInput::new("Jumanji", 2.0),
        ];
        let options = RecommendOptions { limit: 3, exclude_rated: false };

        let report = recommender.recommend(&inputs, options).unwrap();
        let ids: Vec<MovieId> = report.recommendations.iter().map(|r| r.movie_id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(report.recommendations[0].title, "Toy Story");
        assert_eq!(report.profile.total_weight(), 11.0);
    }

    #[test]
    fn test_exclude_rated() {
        let recommender = create_test_recommender();
        let inputs = vec![RatingInput::new("Toy Story", 5.0)];
        let options = RecommendOptions { limit: 10, exclude_rated: true };

        let report = recommender.recommend(&inputs, options).unwrap();
        let ids: Vec<MovieId> = report.recommendations.iter().map(|r| r.movie_id).collect();

        // 3 shares Comedy; 2 and 4 tie at zero
        assert_eq!(ids, vec![3, 2, 4]);
    }

    #[test]
    fn test_unresolvable_input_is_degenerate() {
        let recommender = create_test_recommender();
        let inputs = vec![RatingInput::new("Akira", 4.5)];

        let err = recommender
            .recommend(&inputs, RecommendOptions::default())
            .unwrap_err();
        assert!(matches!(err, RecommendError::DegenerateProfile { .. }));
    }

    #[test]
    fn test_recommend_rated_by_id() {
        let recommender = create_test_recommender();
        let report = recommender
            .recommend_rated(&[RatedMovie::new(4, 4.0)], RecommendOptions::default())
            .unwrap();

        assert_eq!(report.recommendations.len(), 4);
        assert_eq!(report.recommendations[0].movie_id, 4);
        assert_eq!(report.recommendations[0].score, 1.0);
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let catalog = CatalogIndex::load(Vec::<RawMovieRecord>::new());
        let err = Recommender::new(Arc::new(catalog)).unwrap_err();
        assert_eq!(err, RecommendError::EmptyCatalog);
    }
}
