//! Core domain types for the movie catalog.
//!
//! Everything the scoring pipeline consumes is defined here:
//! - Type aliases for ids (MovieId, UserId)
//! - Raw catalog records and the normalized Movie
//! - The shared GenreVocabulary
//! - User rating inputs, both by title and already resolved to an id

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (`movieId` column of movies.csv)
pub type MovieId = u32;

/// Unique identifier for a user (`userId` column of ratings.csv)
pub type UserId = u32;

/// Delimiter between genre labels in a raw genres string
pub const GENRE_DELIMITER: char = '|';

// =============================================================================
// Movie-related Types
// =============================================================================

/// A catalog record as handed to the Catalog Index.
///
/// The title is expected to be normalized already (no year suffix).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMovieRecord {
    pub id: MovieId,
    pub title: String,
    /// Pipe-delimited genre labels, e.g. "Adventure|Animation|Comedy"
    pub genres: String,
    /// Year split out of the raw title, if the source had one
    #[serde(default)]
    pub year: Option<u16>,
}

impl RawMovieRecord {
    pub fn new(id: MovieId, title: impl Into<String>, genres: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: genres.into(),
            year: None,
        }
    }
}

/// A movie in the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Display only; scoring never looks at it
    pub year: Option<u16>,
    /// Genre labels parsed from the pipe-delimited source string
    pub genres: BTreeSet<String>,
}

impl Movie {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.contains(genre)
    }
}

/// Split a raw genres string into a set of labels.
///
/// Empty pieces are discarded, so `""` yields an empty set.
pub fn parse_genre_set(raw: &str) -> BTreeSet<String> {
    raw.split(GENRE_DELIMITER)
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Genre Vocabulary
// =============================================================================

/// All distinct genre labels seen in the catalog, in first-seen order.
///
/// Every genre-indexed vector in the pipeline uses these positions, so the
/// vocabulary is frozen once the catalog is built and shared behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreVocabulary {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl GenreVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label if unseen. Returns its position either way.
    pub(crate) fn observe(&mut self, label: &str) -> usize {
        if let Some(&pos) = self.positions.get(label) {
            return pos;
        }
        let pos = self.labels.len();
        self.labels.push(label.to_string());
        self.positions.insert(label.to_string(), pos);
        pos
    }

    /// Position of a label, or `None` if the catalog never mentioned it
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn label(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.positions.contains_key(label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for GenreVocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocabulary = GenreVocabulary::new();
        for label in iter {
            vocabulary.observe(label.as_ref());
        }
        vocabulary
    }
}

// =============================================================================
// Rating Types
// =============================================================================

/// A user's rating of a movie identified by title.
///
/// The rating is a raw weight: it is not clamped to any range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingInput {
    pub title: String,
    pub rating: f64,
}

impl RatingInput {
    pub fn new(title: impl Into<String>, rating: f64) -> Self {
        Self {
            title: title.into(),
            rating,
        }
    }
}

/// A rating already resolved to a catalog id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatedMovie {
    pub movie_id: MovieId,
    pub rating: f64,
}

impl RatedMovie {
    pub fn new(movie_id: MovieId, rating: f64) -> Self {
        Self { movie_id, rating }
    }
}

/// A row of ratings.csv. The timestamp is kept for completeness only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f64,
    pub timestamp: i64,
}

impl From<&Rating> for RatedMovie {
    fn from(rating: &Rating) -> Self {
        RatedMovie::new(rating.movie_id, rating.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genre_set() {
        let genres = parse_genre_set("Adventure|Animation|Children|Comedy|Fantasy");
        assert_eq!(genres.len(), 5);
        assert!(genres.contains("Animation"));

        assert!(parse_genre_set("").is_empty());
        assert_eq!(parse_genre_set("Drama||Drama").len(), 1);
    }

    #[test]
    fn test_vocabulary_keeps_first_seen_order() {
        let vocabulary: GenreVocabulary = ["Comedy", "Action", "Comedy", "Drama"]
            .into_iter()
            .collect();

        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.labels(), &["Comedy", "Action", "Drama"]);
        assert_eq!(vocabulary.position("Drama"), Some(2));
        assert_eq!(vocabulary.position("Western"), None);
        assert_eq!(vocabulary.label(1), Some("Action"));
    }
}
