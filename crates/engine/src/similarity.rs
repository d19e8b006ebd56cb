//! SimilarityEngine - how alike two users' rating histories are.
//!
//! The score is the mean absolute difference of ordinal ratings over the
//! movies both users rated. Lower is more similar. With no co-rated movie
//! the score is `f64::INFINITY`, so such a pair can never act as a
//! recommendation source.

use ratings::{MovieId, RatingStore, UserId};
use std::sync::Arc;
use tracing::trace;

/// Stateless similarity over a shared, read-only store
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    store: Arc<RatingStore>,
}

impl SimilarityEngine {
    pub fn new(store: Arc<RatingStore>) -> Self {
        Self { store }
    }

    /// Movies rated by both users, sorted by id
    pub fn co_rated(&self, user_a: UserId, user_b: UserId) -> Vec<MovieId> {
        let (Some(a), Some(b)) = (self.store.watched_set(user_a), self.store.watched_set(user_b))
        else {
            return Vec::new();
        };

        let mut shared: Vec<MovieId> = a.intersection(b).copied().collect();
        shared.sort_unstable();
        shared
    }

    /// Mean absolute rating difference over co-rated movies.
    ///
    /// Symmetric in its arguments. `f64::INFINITY` when nothing is co-rated.
    pub fn similarity(&self, user_a: UserId, user_b: UserId) -> f64 {
        let shared = self.co_rated(user_a, user_b);
        if shared.is_empty() {
            return f64::INFINITY;
        }

        let diffs: Vec<u32> = shared
            .iter()
            .filter_map(|&movie_id| {
                let a = self.store.rating_of(movie_id, user_a).ok()?;
                let b = self.store.rating_of(movie_id, user_b).ok()?;
                Some(u32::from(a.value().abs_diff(b.value())))
            })
            .collect();
        // Watched sets and rating maps are updated together in `add_rating`
        debug_assert_eq!(
            diffs.len(),
            shared.len(),
            "watched set and rating index disagree for users {user_a} and {user_b}"
        );
        if diffs.is_empty() {
            return f64::INFINITY;
        }

        let score = f64::from(diffs.iter().sum::<u32>()) / diffs.len() as f64;
        trace!(
            "similarity({}, {}) = {:.3} over {} co-rated movies",
            user_a,
            user_b,
            score,
            shared.len()
        );
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratings::{Movie, Rating, User};

    fn create_test_store() -> Arc<RatingStore> {
        let mut store = RatingStore::new();
        let alice = User::new(1, "Alice");
        let bob = User::new(2, "Bob");
        let carol = User::new(3, "Carol");

        store.add_rating(&alice, &Movie::new(1, "Alien"), Rating::Five).unwrap();
        store.add_rating(&alice, &Movie::new(2, "Brazil"), Rating::Two).unwrap();
        store.add_rating(&alice, &Movie::new(3, "Casablanca"), Rating::Four).unwrap();

        store.add_rating(&bob, &Movie::new(1, "Alien"), Rating::Three).unwrap();
        store.add_rating(&bob, &Movie::new(2, "Brazil"), Rating::Two).unwrap();

        // Carol shares nothing with Alice or Bob
        store.add_rating(&carol, &Movie::new(4, "Dune"), Rating::One).unwrap();

        Arc::new(store)
    }

    #[test]
    fn test_mean_absolute_difference() {
        let engine = SimilarityEngine::new(create_test_store());
        // |5-3| + |2-2| over 2 movies
        assert_eq!(engine.similarity(1, 2), 1.0);
    }

    #[test]
    fn test_mean_over_every_co_rated_movie() {
        let mut store = RatingStore::new();
        let a = User::new(1, "A");
        let b = User::new(2, "B");
        let pairs = [
            (1, Rating::Five, Rating::One),
            (2, Rating::Three, Rating::Three),
            (3, Rating::Two, Rating::Three),
        ];
        for (id, ra, rb) in pairs {
            let movie = Movie::new(id, format!("Movie {id}"));
            store.add_rating(&a, &movie, ra).unwrap();
            store.add_rating(&b, &movie, rb).unwrap();
        }
        // Only A rated this one, so it stays out of the mean
        store.add_rating(&a, &Movie::new(4, "Movie 4"), Rating::Five).unwrap();

        let engine = SimilarityEngine::new(Arc::new(store));
        // (4 + 0 + 1) / 3
        assert!((engine.similarity(1, 2) - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(engine.co_rated(1, 2), vec![1, 2, 3]);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let engine = SimilarityEngine::new(create_test_store());
        for a in 1..=4 {
            for b in 1..=4 {
                let ab = engine.similarity(a, b);
                let ba = engine.similarity(b, a);
                assert!(ab == ba, "similarity({a},{b})={ab} but similarity({b},{a})={ba}");
            }
        }
    }

    #[test]
    fn test_no_overlap_is_infinite() {
        let engine = SimilarityEngine::new(create_test_store());
        assert_eq!(engine.similarity(1, 3), f64::INFINITY);
        assert_eq!(engine.similarity(3, 2), f64::INFINITY);
        // Unknown user has no history at all
        assert_eq!(engine.similarity(1, 99), f64::INFINITY);
    }

    #[test]
    fn test_identical_histories_score_zero() {
        let engine = SimilarityEngine::new(create_test_store());
        assert_eq!(engine.similarity(1, 1), 0.0);
    }

    #[test]
    fn test_co_rated() {
        let engine = SimilarityEngine::new(create_test_store());
        assert_eq!(engine.co_rated(1, 2), vec![1, 2]);
        assert!(engine.co_rated(1, 3).is_empty());
    }
}
