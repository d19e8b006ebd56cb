//! Parser for seed rating text.
//!
//! One rating per line, fields separated by `::`:
//!
//! ```text
//! user_id::user_name::movie_id::movie_title::rating
//! 1::User 1::1::Batman Begins::5
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::error::{RatingsError, Result};
use crate::store::RatingStore;
use crate::types::{Movie, MovieId, Rating, User, UserId};
use tracing::debug;

const FIELD_COUNT: usize = 5;

/// One parsed seed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRating {
    pub user: User,
    pub movie: Movie,
    pub rating: Rating,
}

/// Parse every rating line in `text`
pub fn parse_ratings(text: &str) -> Result<Vec<SeedRating>> {
    let mut ratings = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }
        ratings.push(parse_line(line_trimmed, line_no)?);
    }

    Ok(ratings)
}

fn parse_line(line: &str, line_no: usize) -> Result<SeedRating> {
    let parts: Vec<&str> = line.split("::").map(str::trim).collect();
    if parts.len() != FIELD_COUNT {
        return Err(RatingsError::FieldCountMismatch {
            expected: FIELD_COUNT,
            found: parts.len(),
            line: line_no,
        });
    }

    let user_id: UserId = parts[0].parse().map_err(|_| RatingsError::ParseError {
        line: line_no,
        reason: format!("Invalid user id '{}'", parts[0]),
    })?;
    let movie_id: MovieId = parts[2].parse().map_err(|_| RatingsError::ParseError {
        line: line_no,
        reason: format!("Invalid movie id '{}'", parts[2]),
    })?;
    let value: u8 = parts[4].parse().map_err(|_| RatingsError::ParseError {
        line: line_no,
        reason: format!("Invalid rating '{}'", parts[4]),
    })?;

    Ok(SeedRating {
        user: User::new(user_id, parts[1]),
        movie: Movie::new(movie_id, parts[3]),
        rating: Rating::try_from(value)?,
    })
}

impl RatingStore {
    /// Build a store from seed text, applying ratings in file order.
    ///
    /// Any malformed line or `NotSeen` rating aborts the load.
    pub fn from_seed(text: &str) -> Result<Self> {
        let ratings = parse_ratings(text)?;
        let mut store = RatingStore::new();
        for seed in &ratings {
            store.add_rating(&seed.user, &seed.movie, seed.rating)?;
        }

        let (users, movies, count) = store.counts();
        debug!("Loaded seed: {} users, {} movies, {} ratings", users, movies, count);
        Ok(store)
    }
}
