//! # Ratings Crate
//!
//! The authoritative in-memory repository of users, movies and ratings.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (User, Movie, Rating)
//! - **store**: `RatingStore`, the two rating indices and aggregate queries
//! - **parser**: Build a store from `::`-separated seed text
//! - **error**: Error types for the crate
//!
//! ## Example Usage
//!
//! ```
//! use ratings::{Movie, Rating, RatingStore, User};
//!
//! let mut store = RatingStore::new();
//! store.add_rating(&User::new(1, "User 1"), &Movie::new(1, "Batman Begins"), Rating::Five)?;
//!
//! assert_eq!(store.average_rating(1), 5.0);
//! assert_eq!(store.average_rating(42), 0.0); // unknown movie
//! # Ok::<(), ratings::RatingsError>(())
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod store;
pub mod parser;

// Re-export commonly used types for convenience
pub use error::{RatingsError, Result};
pub use parser::{SeedRating, parse_ratings};
pub use store::RatingStore;
pub use types::{
    // Type aliases
    MovieId,
    UserId,
    // Core types
    Movie,
    Rating,
    User,
};
