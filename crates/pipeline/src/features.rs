//! The Genre Feature Matrix.
//!
//! One-hot encodes every catalog movie against the genre vocabulary. The
//! matrix is built in a single pass, never mutated afterwards, and shared by
//! the profile builder and the scorer.

use data_loader::{CatalogIndex, GenreVocabulary, Movie, MovieId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// One-hot genre membership of a single movie.
///
/// Cell `i` is 1 iff vocabulary label `i` is in the movie's genre set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureVector {
    cells: Vec<u8>,
}

impl FeatureVector {
    /// Encode a movie against a vocabulary.
    pub fn encode(movie: &Movie, vocabulary: &GenreVocabulary) -> Self {
        let cells = vocabulary
            .iter()
            .map(|label| u8::from(movie.has_genre(label)))
            .collect();
        Self { cells }
    }

    /// Value at a vocabulary position; 0 past the end
    pub fn get(&self, position: usize) -> u8 {
        self.cells.get(position).copied().unwrap_or(0)
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Positions holding a 1
    pub fn active_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == 1)
            .map(|(pos, _)| pos)
    }

    /// Number of genres the movie carries
    pub fn genre_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == 1).count()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Feature vectors for every movie, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreFeatureMatrix {
    vocabulary: Arc<GenreVocabulary>,
    rows: BTreeMap<MovieId, FeatureVector>,
}

impl GenreFeatureMatrix {
    /// Build the matrix over a catalog and its own vocabulary.
    pub fn build(catalog: &CatalogIndex) -> Self {
        Self::from_movies(catalog.movies(), catalog.vocabulary().clone())
    }

    /// Build the matrix over any movies and an explicit vocabulary.
    ///
    /// Genres a movie carries that the vocabulary lacks are not encoded.
    pub fn from_movies<'a, I>(movies: I, vocabulary: Arc<GenreVocabulary>) -> Self
    where
        I: IntoIterator<Item = &'a Movie>,
    {
        let rows: BTreeMap<MovieId, FeatureVector> = movies
            .into_iter()
            .map(|movie| (movie.id, FeatureVector::encode(movie, &vocabulary)))
            .collect();

        debug!(
            "Built genre feature matrix: {} movies x {} genres",
            rows.len(),
            vocabulary.len()
        );

        Self { vocabulary, rows }
    }

    /// Sub-matrix over the given ids, sharing the same vocabulary.
    ///
    /// Ids without a row are skipped.
    pub fn restrict<I>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = MovieId>,
    {
        let rows = ids
            .into_iter()
            .filter_map(|id| self.rows.get(&id).map(|row| (id, row.clone())))
            .collect();
        Self {
            vocabulary: self.vocabulary.clone(),
            rows,
        }
    }

    pub fn vector(&self, movie_id: MovieId) -> Option<&FeatureVector> {
        self.rows.get(&movie_id)
    }

    /// Membership of one genre for one movie.
    ///
    /// `None` if the movie has no row or the genre is not in the vocabulary.
    pub fn value(&self, movie_id: MovieId, genre: &str) -> Option<u8> {
        let position = self.vocabulary.position(genre)?;
        self.rows.get(&movie_id).map(|row| row.get(position))
    }

    /// Rows in ascending id order
    pub fn rows(&self) -> impl Iterator<Item = (MovieId, &FeatureVector)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    pub fn vocabulary(&self) -> &Arc<GenreVocabulary> {
        &self.vocabulary
    }

    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.rows.contains_key(&movie_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
