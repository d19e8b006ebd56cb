//! Core domain types shared by the store and the recommendation engine.
//!
//! Users and movies are plain identities. `Rating` is a closed ordinal enum so
//! arbitrary integers can't slip into the store.

use crate::error::{RatingsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Identities
// =============================================================================

/// A user known to the store. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A movie known to the store. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Ordinal rating a user gives a movie.
///
/// `NotSeen` is a sentinel: it is never stored, its presence is inferred
/// from the absence of a stored rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rating {
    NotSeen = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl Rating {
    /// Numeric ordinal of this rating (0 for `NotSeen`)
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Whether this is a real score, i.e. anything but `NotSeen`
    pub fn is_seen(self) -> bool {
        self != Rating::NotSeen
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingsError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Rating::NotSeen),
            1 => Ok(Rating::One),
            2 => Ok(Rating::Two),
            3 => Ok(Rating::Three),
            4 => Ok(Rating::Four),
            5 => Ok(Rating::Five),
            _ => Err(RatingsError::InvalidRating { value }),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
