//! The User Profile Builder.
//!
//! Turns a user's ratings into a weighted genre-preference vector:
//!
//! ```text
//! profile[g] = Σ rating_i * vector_i[g]
//! ```
//!
//! i.e. the ratings vector times the genre membership matrix of the rated
//! movies. This is a sum, not an average; the scorer normalizes by the
//! profile's total weight.
//!
//! Title resolution policies:
//! - a title with no catalog match is dropped
//! - a title shared by several movies resolves to the first in catalog order
//!
//! Both are reported as [`ResolutionIssue`]s, never as errors.

use crate::features::GenreFeatureMatrix;
use crate::traits::{TitleMatch, TitleResolver};
use data_loader::{GenreVocabulary, MovieId, RatedMovie, RatingInput};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// A rating input the builder could not take at face value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionIssue {
    /// No catalog movie carries the title; the input was dropped
    UnresolvedTitle { title: String },
    /// Several movies carry the title; `chosen` is the first in catalog order
    AmbiguousTitle {
        title: String,
        candidates: Vec<MovieId>,
        chosen: MovieId,
    },
}

/// Rating inputs after title resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Resolved ratings in input order
    pub rated: Vec<RatedMovie>,
    pub issues: Vec<ResolutionIssue>,
}

impl Resolution {
    pub fn unresolved_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, ResolutionIssue::UnresolvedTitle { .. }))
            .count()
    }

    pub fn ambiguous_count(&self) -> usize {
        self.issues.len() - self.unresolved_count()
    }
}

/// Resolve titled ratings to catalog ids.
pub fn resolve_ratings(inputs: &[RatingInput], resolver: &impl TitleResolver) -> Resolution {
    let mut resolution = Resolution::default();

    for input in inputs {
        match resolver.resolve(&input.title) {
            TitleMatch::Unique(movie_id) => {
                resolution.rated.push(RatedMovie::new(movie_id, input.rating));
            }
            TitleMatch::Ambiguous(candidates) => {
                // An empty candidate list counts as no match
                let Some(&chosen) = candidates.first() else {
                    warn!("Title '{}' resolved to no candidates, dropping", input.title);
                    resolution.issues.push(ResolutionIssue::UnresolvedTitle {
                        title: input.title.clone(),
                    });
                    continue;
                };
                warn!(
                    "Title '{}' matches {} movies {:?}, using {}",
                    input.title,
                    candidates.len(),
                    candidates,
                    chosen
                );
                resolution.rated.push(RatedMovie::new(chosen, input.rating));
                resolution.issues.push(ResolutionIssue::AmbiguousTitle {
                    title: input.title.clone(),
                    candidates,
                    chosen,
                });
            }
            TitleMatch::None => {
                warn!("Title '{}' not in catalog, dropping", input.title);
                resolution.issues.push(ResolutionIssue::UnresolvedTitle {
                    title: input.title.clone(),
                });
            }
        }
    }

    resolution
}

/// A user's genre-preference weights, aligned with the catalog vocabulary.
///
/// Computed per request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    vocabulary: Arc<GenreVocabulary>,
    weights: Vec<f64>,
}

/// A profile together with how its inputs were resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileBuild {
    pub profile: UserProfile,
    pub resolution: Resolution,
}

impl UserProfile {
    /// Resolve titled ratings and build the profile in one step.
    pub fn build(
        inputs: &[RatingInput],
        resolver: &impl TitleResolver,
        matrix: &GenreFeatureMatrix,
    ) -> ProfileBuild {
        let resolution = resolve_ratings(inputs, resolver);
        let profile = Self::from_rated(&resolution.rated, matrix);
        ProfileBuild {
            profile,
            resolution,
        }
    }

    /// Rating-weighted sum of the rated movies' feature vectors.
    ///
    /// Ids without a matrix row contribute nothing. With no contributing
    /// movie every weight is zero; see [`UserProfile::is_degenerate`].
    pub fn from_rated(rated: &[RatedMovie], matrix: &GenreFeatureMatrix) -> Self {
        let vocabulary = matrix.vocabulary().clone();
        let mut weights = vec![0.0; vocabulary.len()];

        let user_rows = matrix.restrict(rated.iter().map(|r| r.movie_id));
        let mut contributing = 0;
        for rated_movie in rated {
            let Some(row) = user_rows.vector(rated_movie.movie_id) else {
                debug!("Rated movie {} has no feature row, skipping", rated_movie.movie_id);
                continue;
            };
            contributing += 1;
            for position in row.active_positions() {
                weights[position] += rated_movie.rating;
            }
        }

        debug!(
            "Built user profile from {} of {} rated movies",
            contributing,
            rated.len()
        );

        Self {
            vocabulary,
            weights,
        }
    }

    /// Weight of a genre; `None` if the genre is not in the vocabulary
    pub fn weight(&self, genre: &str) -> Option<f64> {
        self.vocabulary
            .position(genre)
            .map(|pos| self.weights[pos])
    }

    /// Weights in vocabulary order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// (genre, weight) pairs in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.vocabulary.iter().zip(self.weights.iter().copied())
    }

    /// Sum of all genre weights, the scorer's normalizer
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// True when scores cannot be normalized.
    ///
    /// The comparison is exact: a tiny nonzero total left over from
    /// cancelling ratings (0.1 + 0.2 - 0.3) is not degenerate and yields
    /// very large scores.
    pub fn is_degenerate(&self) -> bool {
        self.total_weight() == 0.0
    }

    /// The `n` heaviest genres, ties in vocabulary order
    pub fn top_genres(&self, n: usize) -> Vec<(&str, f64)> {
        let mut genres: Vec<(&str, f64)> = self.iter().collect();
        // Stable sort keeps vocabulary order among equal weights
        genres.sort_by(|a, b| b.1.total_cmp(&a.1));
        genres.truncate(n);
        genres
    }

    pub fn vocabulary(&self) -> &Arc<GenreVocabulary> {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CatalogIndex, RawMovieRecord};

    fn create_test_catalog() -> CatalogIndex {
        CatalogIndex::load(vec![
            RawMovieRecord::new(1, "Toy Story", "Animation|Comedy"),
            RawMovieRecord::new(2, "Jumanji", "Adventure|Fantasy"),
            RawMovieRecord::new(3, "Grumpier Old Men", "Comedy|Romance"),
            RawMovieRecord::new(7, "Hamlet", "Drama"),
            RawMovieRecord::new(5, "Hamlet", "Drama|Romance"),
        ])
    }

    #[test]
    fn test_profile_is_rating_weighted_sum() {
        let catalog = create_test_catalog();
        let matrix = GenreFeatureMatrix::build(&catalog);
        let inputs = vec![
            RatingInput::new("Toy Story", 3.5),
            RatingInput::new("Jumanji", 2.0),
        ];

        let build = UserProfile::build(&inputs, &catalog, &matrix);
        let profile = &build.profile;

        assert!(build.resolution.issues.is_empty());
        assert_eq!(profile.weight("Animation"), Some(3.5));
        assert_eq!(profile.weight("Comedy"), Some(3.5));
        assert_eq!(profile.weight("Adventure"), Some(2.0));
        assert_eq!(profile.weight("Fantasy"), Some(2.0));
        assert_eq!(profile.weight("Romance"), Some(0.0));
        assert_eq!(profile.weight("Drama"), Some(0.0));
        assert_eq!(profile.weight("Western"), None);
        assert_eq!(profile.total_weight(), 11.0);
        assert_eq!(profile.len(), catalog.vocabulary().len());
    }

    #[test]
    fn test_unresolved_title_is_dropped() {
        let catalog = create_test_catalog();
        let matrix = GenreFeatureMatrix::build(&catalog);
        let inputs = vec![
            RatingInput::new("Akira", 4.5),
            RatingInput::new("Jumanji", 2.0),
        ];

        let build = UserProfile::build(&inputs, &catalog, &matrix);

        assert_eq!(build.resolution.rated, vec![RatedMovie::new(2, 2.0)]);
        assert_eq!(
            build.resolution.issues,
            vec![ResolutionIssue::UnresolvedTitle {
                title: "Akira".to_string()
            }]
        );
        assert_eq!(build.profile.total_weight(), 4.0);
    }

    #[test]
    fn test_ambiguous_title_takes_first_in_catalog_order() {
        let catalog = create_test_catalog();
        let matrix = GenreFeatureMatrix::build(&catalog);

        let build = UserProfile::build(&[RatingInput::new("Hamlet", 4.0)], &catalog, &matrix);

        assert_eq!(build.resolution.rated, vec![RatedMovie::new(5, 4.0)]);
        assert_eq!(build.resolution.ambiguous_count(), 1);
        assert_eq!(
            build.resolution.issues[0],
            ResolutionIssue::AmbiguousTitle {
                title: "Hamlet".to_string(),
                candidates: vec![5, 7],
                chosen: 5,
            }
        );
        // Movie 5 is Drama|Romance
        assert_eq!(build.profile.weight("Romance"), Some(4.0));
    }

    #[test]
    fn test_no_resolved_movies_gives_degenerate_profile() {
        let catalog = create_test_catalog();
        let matrix = GenreFeatureMatrix::build(&catalog);

        let build = UserProfile::build(&[RatingInput::new("Akira", 5.0)], &catalog, &matrix);

        assert!(build.profile.weights().iter().all(|w| *w == 0.0));
        assert!(build.profile.is_degenerate());
        assert_eq!(build.resolution.unresolved_count(), 1);
    }

    #[test]
    fn test_from_rated_skips_unknown_ids_and_allows_negative_ratings() {
        let catalog = create_test_catalog();
        let matrix = GenreFeatureMatrix::build(&catalog);
        let rated = vec![
            RatedMovie::new(3, -1.5),
            RatedMovie::new(404, 5.0),
            RatedMovie::new(1, 2.0),
        ];

        let profile = UserProfile::from_rated(&rated, &matrix);

        assert_eq!(profile.weight("Comedy"), Some(0.5));
        assert_eq!(profile.weight("Romance"), Some(-1.5));
        assert_eq!(profile.weight("Animation"), Some(2.0));
    }

    #[test]
    fn test_top_genres() {
        let catalog = create_test_catalog();
        let matrix = GenreFeatureMatrix::build(&catalog);
        let rated = vec![RatedMovie::new(1, 3.5), RatedMovie::new(3, 1.0)];

        let profile = UserProfile::from_rated(&rated, &matrix);
        let top = profile.top_genres(2);

        assert_eq!(top, vec![("Comedy", 4.5), ("Animation", 3.5)]);
    }
}
