use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::{Dataset, RatedMovie, RatingInput, UserId, parser};
use pipeline::{
    MovieRecommendation, RecommendError, RecommendOptions, RecommendationReport, Recommender,
    Resolution, ResolutionIssue, UserProfile, resolve_ratings,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// ReelRecs Content - genre-based movie recommendations
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Content-based movie recommendations from a handful of ratings", long_about = None)]
struct Cli {
    /// Path to a MovieLens-style dataset directory (movies.csv, optional ratings.csv)
    #[arg(short, long, env = "REEL_RECS_DATA_DIR", default_value = "data/ml-latest-small")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations from a set of ratings
    Recommend {
        #[command(flatten)]
        ratings: RatingArgs,

        /// Number of recommendations to return
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Leave out movies that were rated
        #[arg(long)]
        exclude_rated: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the genre profile built from a set of ratings
    Profile {
        #[command(flatten)]
        ratings: RatingArgs,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Maximum number of matches to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

/// Where the user's ratings come from
#[derive(Args)]
struct RatingArgs {
    /// CSV file with `title,rating` rows
    #[arg(long, conflicts_with = "user_id")]
    ratings: Option<PathBuf>,

    /// A single rating as "Title=4.5" (repeatable)
    #[arg(long = "rate", value_name = "TITLE=RATING", conflicts_with = "user_id")]
    rate: Vec<String>,

    /// Use this user's rows from the dataset's ratings.csv
    #[arg(long)]
    user_id: Option<UserId>,
}

/// Ratings as the pipeline takes them: by title, or already resolved by id
enum RatingSource {
    Titles(Vec<RatingInput>),
    Ids(Vec<RatedMovie>),
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    eprintln!("Loading dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let dataset = Dataset::load_from_dir(&cli.data_dir).context("Failed to load dataset")?;
    eprintln!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        dataset.catalog.len(),
        start.elapsed()
    );
    let (movie_count, user_count, rating_count) = dataset.counts();
    debug!("Dataset: {} movies, {} users, {} ratings", movie_count, user_count, rating_count);

    match cli.command {
        Commands::Recommend {
            ratings,
            limit,
            exclude_rated,
            json,
        } => {
            let source = read_ratings(&dataset, &ratings)?;
            let options = RecommendOptions {
                limit,
                exclude_rated,
            };
            handle_recommend(dataset, source, options, json)?
        }
        Commands::Profile { ratings } => {
            let source = read_ratings(&dataset, &ratings)?;
            handle_profile(dataset, source)?
        }
        Commands::Search { title, limit } => handle_search(&dataset, &title, limit),
    }

    Ok(())
}

/// Collect ratings from exactly one of the supported inputs
fn read_ratings(dataset: &Dataset, args: &RatingArgs) -> Result<RatingSource> {
    if let Some(user_id) = args.user_id {
        let rated = dataset.rated_movies_for_user(user_id);
        if rated.is_empty() {
            bail!("User {} has no ratings in the dataset", user_id);
        }
        return Ok(RatingSource::Ids(rated));
    }

    let mut inputs = match &args.ratings {
        Some(path) => parser::parse_rating_inputs(path)
            .with_context(|| format!("Failed to read ratings from {}", path.display()))?,
        None => Vec::new(),
    };
    for arg in &args.rate {
        inputs.push(parser::parse_rating_arg(arg).with_context(|| format!("Bad --rate '{}'", arg))?);
    }

    if inputs.is_empty() {
        bail!("No ratings given: use --ratings <FILE>, --rate \"Title=4.5\" or --user-id <ID>");
    }
    Ok(RatingSource::Titles(inputs))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    recommendations: &'a [MovieRecommendation],
    issues: &'a [ResolutionIssue],
    total_weight: f64,
}

/// Handle the 'recommend' command
fn handle_recommend(
    dataset: Dataset,
    source: RatingSource,
    options: RecommendOptions,
    json: bool,
) -> Result<()> {
    let recommender = Recommender::new(Arc::new(dataset.catalog))?;

    let result = match &source {
        RatingSource::Titles(inputs) => recommender.recommend(inputs, options),
        RatingSource::Ids(rated) => recommender.recommend_rated(rated, options),
    };

    let report = match result {
        Ok(report) => report,
        Err(RecommendError::DegenerateProfile { .. }) => {
            return Err(anyhow!(
                "No recommendation possible: none of the rated movies contributed a genre"
            ));
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        let out = JsonReport {
            recommendations: &report.recommendations,
            issues: &report.resolution.issues,
            total_weight: report.profile.total_weight(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_issues(&report.resolution);
    print_recommendations(&report);
    Ok(())
}

/// Handle the 'profile' command
fn handle_profile(dataset: Dataset, source: RatingSource) -> Result<()> {
    let recommender = Recommender::new(Arc::new(dataset.catalog))?;

    let (profile, resolution): (UserProfile, Resolution) = match source {
        RatingSource::Titles(inputs) => {
            let resolution = resolve_ratings(&inputs, &**recommender.catalog());
            (recommender.profile(&resolution.rated), resolution)
        }
        RatingSource::Ids(rated) => (
            recommender.profile(&rated),
            Resolution {
                rated,
                issues: Vec::new(),
            },
        ),
    };

    print_issues(&resolution);

    println!("{}", "Rated movies:".bold().blue());
    for rated in &resolution.rated {
        if let Some(movie) = recommender.catalog().get_movie(rated.movie_id) {
            println!("  - {} (Rating: {})", movie.title, rated.rating);
        }
    }

    println!("{}", "Genre weights:".bold().blue());
    for (genre, weight) in profile.top_genres(profile.len()) {
        println!("{}{}: {:.2}", "• ".green(), genre, weight);
    }
    println!("{}Total weight: {:.2}", "• ".cyan(), profile.total_weight());
    if profile.is_degenerate() {
        println!("{}", "No recommendation possible from these ratings".yellow());
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(dataset: &Dataset, title: &str, limit: usize) {
    let matches = dataset.catalog.search(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for movie in matches.iter().take(limit) {
        let genres = movie.genres.iter().cloned().collect::<Vec<_>>().join(", ");
        println!(
            "{}: {} ({}) [{}]",
            movie.id,
            movie.title,
            movie.year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string()),
            genres
        );
    }
    if matches.is_empty() {
        println!("No matches");
    }
}

fn print_issues(resolution: &Resolution) {
    for issue in &resolution.issues {
        match issue {
            ResolutionIssue::UnresolvedTitle { title } => {
                eprintln!("{} '{}' is not in the catalog, ignored", "!".yellow(), title);
            }
            ResolutionIssue::AmbiguousTitle {
                title,
                candidates,
                chosen,
            } => {
                eprintln!(
                    "{} '{}' matches movies {:?}, using {}",
                    "!".yellow(),
                    title,
                    candidates,
                    chosen
                );
            }
        }
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(report: &RecommendationReport) {
    println!("{}", "Movie Recommendations:".bold().blue());
    for (i, rec) in report.recommendations.iter().enumerate() {
        let genres = rec.genres.iter().cloned().collect::<Vec<_>>().join(", ");
        println!(
            "{}. {} ({}) [{}] - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.title,
            rec.year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string()),
            genres,
            rec.score
        );
    }
}
