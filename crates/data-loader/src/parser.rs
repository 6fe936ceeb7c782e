//! Parser for MovieLens-style CSV files.
//!
//! - movies.csv: movieId,title,genres
//! - ratings.csv: userId,movieId,rating,timestamp
//! - user rating input: title,rating
//!
//! Each file has a `*_from_reader` variant so callers (and tests) can feed
//! any `Read` source. A row with a missing field or a malformed number is a
//! hard error: nothing is defaulted.

use crate::error::{DataLoadError, Result};
use crate::title::normalize_title;
use crate::types::*;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const MOVIES_FILE: &str = "movies.csv";
const RATINGS_FILE: &str = "ratings.csv";
const RATING_INPUT_FILE: &str = "rating input";

#[derive(Debug, Deserialize)]
struct MovieRow {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    genres: String,
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    #[serde(rename = "userId")]
    user_id: UserId,
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    rating: f64,
    timestamp: i64,
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Parse the movies.csv file
pub fn parse_movies(path: &Path) -> Result<Vec<RawMovieRecord>> {
    movies_from_reader(open_file(path)?)
}

/// Parse movie rows, normalizing each title.
///
/// The title "Toy Story (1995)" becomes "Toy Story" with year 1995.
/// Genres stay as the raw pipe-delimited string; splitting them is the
/// catalog index's job.
pub fn movies_from_reader<R: Read>(reader: R) -> Result<Vec<RawMovieRecord>> {
    let mut reader = csv_reader(reader);
    let mut movies = Vec::new();

    for row in reader.deserialize::<MovieRow>() {
        let row = row.map_err(|e| DataLoadError::from_csv(MOVIES_FILE, e))?;
        let normalized = normalize_title(&row.title);
        if normalized.title.is_empty() {
            return Err(DataLoadError::InvalidValue {
                field: "title".to_string(),
                value: row.title,
            });
        }

        movies.push(RawMovieRecord {
            id: row.movie_id,
            title: normalized.title,
            genres: row.genres,
            year: normalized.year,
        });
    }
    Ok(movies)
}

/// Parse the ratings.csv file
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    ratings_from_reader(open_file(path)?)
}

pub fn ratings_from_reader<R: Read>(reader: R) -> Result<Vec<Rating>> {
    let mut reader = csv_reader(reader);
    let mut ratings = Vec::new();

    for row in reader.deserialize::<RatingRow>() {
        let row = row.map_err(|e| DataLoadError::from_csv(RATINGS_FILE, e))?;
        if !row.rating.is_finite() {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: row.rating.to_string(),
            });
        }
        ratings.push(Rating {
            user_id: row.user_id,
            movie_id: row.movie_id,
            rating: row.rating,
            timestamp: row.timestamp,
        });
    }
    Ok(ratings)
}

/// Parse a user's `title,rating` input file
pub fn parse_rating_inputs(path: &Path) -> Result<Vec<RatingInput>> {
    rating_inputs_from_reader(open_file(path)?)
}

pub fn rating_inputs_from_reader<R: Read>(reader: R) -> Result<Vec<RatingInput>> {
    let mut reader = csv_reader(reader);
    let mut inputs = Vec::new();

    for row in reader.deserialize::<RatingInput>() {
        let input = row.map_err(|e| DataLoadError::from_csv(RATING_INPUT_FILE, e))?;
        if !input.rating.is_finite() {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: input.rating.to_string(),
            });
        }
        inputs.push(input);
    }
    Ok(inputs)
}

/// Parse a single `Title=4.5` rating argument.
///
/// The last `=` separates title from rating, so titles may contain `=`.
pub fn parse_rating_arg(arg: &str) -> Result<RatingInput> {
    let (title, rating) = arg.rsplit_once('=').ok_or_else(|| DataLoadError::InvalidValue {
        field: "rating argument".to_string(),
        value: arg.to_string(),
    })?;

    let title = title.trim();
    if title.is_empty() {
        return Err(DataLoadError::InvalidValue {
            field: "title".to_string(),
            value: arg.to_string(),
        });
    }

    let rating: f64 = rating
        .trim()
        .parse()
        .map_err(|_| DataLoadError::InvalidValue {
            field: "rating".to_string(),
            value: rating.to_string(),
        })?;
    if !rating.is_finite() {
        return Err(DataLoadError::InvalidValue {
            field: "rating".to_string(),
            value: rating.to_string(),
        });
    }

    Ok(RatingInput::new(title, rating))
}
