//! Loading a dataset directory into a catalog plus per-user ratings.
//!
//! Expected layout (MovieLens "latest-small"):
//! - movies.csv (required)
//! - ratings.csv (optional; only used for `--user-id` style requests)

use crate::error::Result;
use crate::index::CatalogIndex;
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// A loaded catalog and, if present, the ratings shipped with it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: CatalogIndex,
    user_ratings: HashMap<UserId, Vec<Rating>>,
}

impl Dataset {
    /// Load movies.csv and ratings.csv from a directory.
    ///
    /// Both files are parsed in parallel with `rayon::join`.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading dataset from {:?}", data_dir);

        let movies_path = data_dir.join("movies.csv");
        let ratings_path = data_dir.join("ratings.csv");

        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path),
            || {
                if ratings_path.exists() {
                    parser::parse_ratings(&ratings_path).map(Some)
                } else {
                    Ok(None)
                }
            },
        );

        let movies = movies?;
        let ratings = ratings?.unwrap_or_default();

        info!("Parsed {} movies, {} ratings", movies.len(), ratings.len());

        Ok(Self::from_parts(CatalogIndex::load(movies), ratings))
    }

    /// Assemble a dataset from an already-built catalog and rating rows.
    pub fn from_parts(catalog: CatalogIndex, ratings: Vec<Rating>) -> Self {
        let mut user_ratings: HashMap<UserId, Vec<Rating>> = HashMap::new();
        for rating in ratings {
            user_ratings.entry(rating.user_id).or_default().push(rating);
        }
        Self {
            catalog,
            user_ratings,
        }
    }

    /// Get all ratings made by a user, in file order
    pub fn get_user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// A user's ratings as already-resolved profile input
    pub fn rated_movies_for_user(&self, user_id: UserId) -> Vec<RatedMovie> {
        self.get_user_ratings(user_id)
            .iter()
            .map(RatedMovie::from)
            .collect()
    }

    /// (movies, users with ratings, total ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.user_ratings.values().map(|v| v.len()).sum();
        (self.catalog.len(), self.user_ratings.len(), total_ratings)
    }
}
