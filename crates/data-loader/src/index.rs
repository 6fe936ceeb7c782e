//! The Catalog Index.
//!
//! Normalizes raw movie records into an id lookup, discovers the genre
//! vocabulary and builds a title index for resolving user input.
//!
//! Policies:
//! - Duplicate ids: last write wins. Every overwrite is recorded in
//!   [`CatalogIndex::duplicates`] and logged; loading never fails on it.
//! - Iteration order is ascending movie id, and [`CatalogIndex::ids_for_title`]
//!   lists shared titles in that order.

use crate::types::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Record of a catalog id that appeared more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCatalogId {
    pub movie_id: MovieId,
    pub replaced_title: String,
    pub kept_title: String,
}

/// Frozen catalog of movies plus the genre vocabulary they define.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    movies: BTreeMap<MovieId, Movie>,
    vocabulary: Arc<GenreVocabulary>,
    title_index: HashMap<String, Vec<MovieId>>,
    duplicates: Vec<DuplicateCatalogId>,
}

impl CatalogIndex {
    /// Build the index from records in source order.
    ///
    /// The vocabulary grows in first-seen order across the whole sequence,
    /// including records later overwritten by a duplicate id.
    pub fn load<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawMovieRecord>,
    {
        let mut movies = BTreeMap::new();
        let mut vocabulary = GenreVocabulary::new();
        let mut duplicates = Vec::new();

        for record in records {
            let genres = parse_genre_set(&record.genres);
            // Observe in source string order, not set order
            for label in record.genres.split(GENRE_DELIMITER).map(str::trim) {
                if !label.is_empty() {
                    vocabulary.observe(label);
                }
            }

            let movie = Movie {
                id: record.id,
                title: record.title,
                year: record.year,
                genres,
            };

            if let Some(replaced) = movies.insert(movie.id, movie) {
                let kept_title = movies
                    .get(&replaced.id)
                    .map(|m: &Movie| m.title.clone())
                    .unwrap_or_default();
                warn!(
                    "Duplicate catalog id {}: '{}' replaced by '{}'",
                    replaced.id, replaced.title, kept_title
                );
                duplicates.push(DuplicateCatalogId {
                    movie_id: replaced.id,
                    replaced_title: replaced.title,
                    kept_title,
                });
            }
        }

        let title_index = build_title_index(&movies);

        debug!(
            "Catalog built: {} movies, {} genres, {} duplicate ids",
            movies.len(),
            vocabulary.len(),
            duplicates.len()
        );

        Self {
            movies,
            vocabulary: Arc::new(vocabulary),
            title_index,
            duplicates,
        }
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.contains_key(&id)
    }

    /// All movies in ascending id order
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    pub fn movie_ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.movies.keys().copied()
    }

    /// Shared handle to the frozen genre vocabulary
    pub fn vocabulary(&self) -> &Arc<GenreVocabulary> {
        &self.vocabulary
    }

    /// Ids that were overwritten during load, in the order it happened
    pub fn duplicates(&self) -> &[DuplicateCatalogId] {
        &self.duplicates
    }

    /// All catalog ids carrying exactly this title, ascending.
    ///
    /// Surrounding whitespace in `title` is ignored; case is not.
    pub fn ids_for_title(&self, title: &str) -> &[MovieId] {
        self.title_index
            .get(title.trim())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Exact (case-insensitive) matches come first, then substring matches;
    /// each group in id order.
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &Movie)> = self
            .movies
            .values()
            .filter_map(|movie| {
                let title = movie.title.to_lowercase();
                if title == query {
                    Some((0, movie))
                } else if title.contains(&query) {
                    Some((1, movie))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));
        matches.into_iter().map(|(_, movie)| movie).collect()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Index titles once all records are in, so overwritten titles never resolve.
fn build_title_index(movies: &BTreeMap<MovieId, Movie>) -> HashMap<String, Vec<MovieId>> {
    let mut index: HashMap<String, Vec<MovieId>> = HashMap::new();
    // BTreeMap iteration keeps each id list ascending
    for (id, movie) in movies {
        index.entry(movie.title.clone()).or_default().push(*id);
    }
    index
}
