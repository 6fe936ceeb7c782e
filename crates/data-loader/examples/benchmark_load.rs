use data_loader::Dataset;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data/ml-latest-small");

    println!("Loading MovieLens latest-small dataset...\n");

    let start = Instant::now();
    let dataset = Dataset::load_from_dir(data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (movies, users, ratings) = dataset.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Genres: {}", dataset.catalog.vocabulary().len());
    println!("Duplicate ids: {}", dataset.catalog.duplicates().len());
    println!("Users with ratings: {}", users);
    println!("Ratings: {}", ratings);
    println!("\nPerformance: {:.0} movies/second",
             movies as f64 / elapsed.as_secs_f64());
}
