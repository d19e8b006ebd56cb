//! # Engine Crate
//!
//! Similarity and recommendation over a shared `RatingStore`.
//!
//! ## Components
//!
//! ### SimilarityEngine
//! Mean absolute rating difference over co-rated movies. Lower is more
//! similar; no overlap means infinitely dissimilar.
//!
//! ### RecommendationEngine
//! Two branches keyed on the user's history:
//! - Cold start: highest average rating in the catalog
//! - Warm: best-rated unwatched movie of the most similar neighbor
//!
//! ## Example Usage
//!
//! ```
//! use engine::RecommendationEngine;
//! use ratings::{Movie, Rating, RatingStore, User};
//! use std::sync::Arc;
//!
//! let mut store = RatingStore::new();
//! store.add_rating(&User::new(1, "User 1"), &Movie::new(1, "Batman Begins"), Rating::Five)?;
//!
//! let engine = RecommendationEngine::new(Arc::new(store));
//! assert_eq!(engine.recommend(2).map(|m| m.title), Some("Batman Begins".to_string()));
//! # Ok::<(), ratings::RatingsError>(())
//! ```
//!
//! ## Concurrency
//!
//! The store is shared through `Arc` and never mutated by this crate.
//! Neighbor similarity scores are computed in parallel with Rayon; the
//! selection over them stays sequential so first-seen tie-breaking holds.

// Public modules
pub mod similarity;
pub mod recommender;

// Re-export commonly used types
pub use recommender::{NeighborPolicy, Recommendation, RecommendationEngine, RecommendationSource};
pub use similarity::SimilarityEngine;
