//! Benchmarks for matrix construction and scoring
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic catalog shaped like MovieLens latest-small
//! (~10k movies, 20 genres).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{CatalogIndex, RatedMovie, RawMovieRecord};
use pipeline::{GenreFeatureMatrix, RecommendationScorer, UserProfile};

const GENRES: [&str; 20] = [
    "Action", "Adventure", "Animation", "Children", "Comedy", "Crime", "Documentary",
    "Drama", "Fantasy", "Film-Noir", "Horror", "IMAX", "Musical", "Mystery", "Romance",
    "Sci-Fi", "Thriller", "War", "Western", "(no genres listed)",
];

fn synthetic_catalog(size: u32) -> CatalogIndex {
    let records = (1..=size).map(|id| {
        let genres: Vec<&str> = (0..3)
            .map(|k| GENRES[((id as usize) * (k + 7) + k * 3) % GENRES.len()])
            .collect();
        RawMovieRecord::new(id, format!("Movie {}", id), genres.join("|"))
    });
    CatalogIndex::load(records)
}

fn bench_build_matrix(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);

    c.bench_function("build_feature_matrix", |b| {
        b.iter(|| GenreFeatureMatrix::build(black_box(&catalog)))
    });
}

fn bench_score(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);
    let matrix = GenreFeatureMatrix::build(&catalog);
    let rated: Vec<RatedMovie> = (1..=50).map(|id| RatedMovie::new(id * 13, 3.5)).collect();
    let profile = UserProfile::from_rated(&rated, &matrix);
    let scorer = RecommendationScorer::new();

    c.bench_function("score_catalog", |b| {
        b.iter(|| scorer.score(black_box(&matrix), black_box(&profile)).unwrap())
    });
}

fn bench_build_profile(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);
    let matrix = GenreFeatureMatrix::build(&catalog);
    let rated: Vec<RatedMovie> = (1..=50).map(|id| RatedMovie::new(id * 13, 3.5)).collect();

    c.bench_function("build_user_profile", |b| {
        b.iter(|| UserProfile::from_rated(black_box(&rated), black_box(&matrix)))
    });
}

criterion_group!(benches, bench_build_matrix, bench_build_profile, bench_score);
criterion_main!(benches);
