//! # Data Loader Crate
//!
//! Loads a MovieLens-style catalog and builds the Catalog Index consumed by
//! the scoring pipeline.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, GenreVocabulary, RatingInput, RatedMovie)
//! - **title**: Split the parenthesized year out of raw titles
//! - **parser**: Parse CSV files into Rust structs
//! - **index**: The Catalog Index and title resolution
//! - **dataset**: Load a data directory into a catalog plus user ratings
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_dir(Path::new("data/ml-latest-small"))?;
//! let catalog = &dataset.catalog;
//!
//! println!("{} movies, {} genres", catalog.len(), catalog.vocabulary().len());
//! println!("{:?}", catalog.ids_for_title("Toy Story"));
//! ```

pub mod error;
pub mod types;
pub mod title;
pub mod parser;
pub mod index;
pub mod dataset;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    GenreVocabulary,
    Movie,
    MovieId,
    RatedMovie,
    Rating,
    RatingInput,
    RawMovieRecord,
    UserId,
    parse_genre_set,
};
pub use title::{NormalizedTitle, normalize_title};
pub use index::{CatalogIndex, DuplicateCatalogId};
pub use dataset::Dataset;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let catalog = CatalogIndex::load(Vec::<RawMovieRecord>::new());

        assert!(catalog.is_empty());
        assert!(catalog.vocabulary().is_empty());
        assert!(catalog.get_movie(1).is_none());
        assert!(catalog.ids_for_title("Toy Story").is_empty());
    }

    #[test]
    fn test_parsed_records_feed_the_index() {
        let data = "movieId,title,genres\n\
                    1,Toy Story (1995),Animation|Comedy\n\
                    2,Jumanji (1995),Adventure|Fantasy\n";
        let records = parser::movies_from_reader(data.as_bytes()).unwrap();
        let catalog = CatalogIndex::load(records);

        let movie = catalog.get_movie(2).unwrap();
        assert_eq!(movie.title, "Jumanji");
        assert_eq!(movie.year, Some(1995));
        assert_eq!(catalog.ids_for_title("Toy Story"), &[1]);
    }
}
