//! Core traits for the profile pipeline.
//!
//! `TitleResolver` is the seam between user input and the catalog: the
//! profile builder only needs "which ids carry this title", not the whole
//! index, so tests and alternative catalogs can plug in their own lookup.

use data_loader::{CatalogIndex, MovieId};

/// Result of looking a title up in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleMatch {
    /// No catalog movie carries this title
    None,
    Unique(MovieId),
    /// Several movies share the title; ids in catalog iteration order
    Ambiguous(Vec<MovieId>),
}

/// Resolves user-supplied titles to catalog ids.
///
/// ## Design Note
/// - `Ambiguous` ids must come back in catalog iteration order; the profile
///   builder picks the first one.
pub trait TitleResolver {
    fn resolve(&self, title: &str) -> TitleMatch;
}

impl TitleResolver for CatalogIndex {
    fn resolve(&self, title: &str) -> TitleMatch {
        match self.ids_for_title(title) {
            [] => TitleMatch::None,
            [id] => TitleMatch::Unique(*id),
            ids => TitleMatch::Ambiguous(ids.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RawMovieRecord;

    #[test]
    fn test_catalog_resolves_titles() {
        let catalog = CatalogIndex::load(vec![
            RawMovieRecord::new(40, "Hamlet", "Drama"),
            RawMovieRecord::new(12, "Hamlet", "Drama|Romance"),
            RawMovieRecord::new(5, "Heat", "Action|Crime"),
        ]);

        assert_eq!(catalog.resolve("Hamlet"), TitleMatch::Ambiguous(vec![12, 40]));
        assert_eq!(catalog.resolve("Heat"), TitleMatch::Unique(5));
        assert_eq!(catalog.resolve("heat"), TitleMatch::None);
        assert_eq!(catalog.resolve("Casino"), TitleMatch::None);
    }
}
