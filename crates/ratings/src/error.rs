//! Error types for the ratings crate.
//!
//! Only two things are treated as errors here: submitting a rating that is
//! not a real score, and asking for a rating pair that was never recorded.
//! Everything else that means "no data yet" is answered with a sentinel
//! (0.0 average, empty set, `None`).

use crate::types::{MovieId, UserId};
use thiserror::Error;

/// Errors raised by the rating store and the seed parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingsError {
    /// Rating is `NotSeen` or outside the 1-5 ordinal range
    #[error("Invalid rating value: {value} (expected 1-5)")]
    InvalidRating { value: u8 },

    /// No rating was ever recorded for this (movie, user) pair
    #[error("Unknown entity: no rating by user {user_id} for movie {movie_id}")]
    UnknownEntity { movie_id: MovieId, user_id: UserId },

    /// Line in seed text couldn't be parsed
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    /// Expected number of fields in a seed line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RatingsError>;
