//! Content-based scoring pipeline for movie recommendations.
//!
//! This crate provides:
//! - GenreFeatureMatrix: one-hot genre encoding of the catalog
//! - UserProfile: rating-weighted genre preferences
//! - RecommendationScorer: weighted-average scoring and deterministic ranking
//! - Recommender: one request from rated titles to top-N recommendations
//!
//! ## Architecture
//! Catalog Index → Genre Feature Matrix (built once) → User Profile
//! (matrix restricted to the user's rated ids) → Scorer (full matrix) →
//! ranked output.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RecommendOptions, Recommender};
//! use data_loader::{Dataset, RatingInput};
//! use std::sync::Arc;
//!
//! let dataset = Dataset::load_from_dir(path)?;
//! let recommender = Recommender::new(Arc::new(dataset.catalog))?;
//!
//! let inputs = vec![RatingInput::new("Toy Story", 3.5), RatingInput::new("Jumanji", 2.0)];
//! let report = recommender.recommend(&inputs, RecommendOptions::default())?;
//! ```

pub mod error;
pub mod traits;
pub mod features;
pub mod profile;
pub mod scoring;
pub mod recommender;

// Re-export main types
pub use error::{RecommendError, Result};
pub use traits::{TitleMatch, TitleResolver};
pub use features::{FeatureVector, GenreFeatureMatrix};
pub use profile::{ProfileBuild, Resolution, ResolutionIssue, UserProfile, resolve_ratings};
pub use scoring::{RecommendationScorer, ScoredMovie, rank};
pub use recommender::{MovieRecommendation, RecommendOptions, RecommendationReport, Recommender};
