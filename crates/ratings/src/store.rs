//! RatingStore - the in-memory repository of users, movies and ratings.
//!
//! Two indices describe the same facts:
//! - user -> set of movies they rated
//! - movie -> (user -> rating)
//!
//! Both are only touched inside `add_rating`, after validation, so they can't
//! drift apart. The user and movie registries keep first-seen order, which
//! the recommendation engine relies on for tie-breaking.

use crate::error::{RatingsError, Result};
use crate::types::{Movie, MovieId, Rating, User, UserId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Append-only store of ratings.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    // Registries in first-seen order
    users: Vec<User>,
    movies: Vec<Movie>,

    /// Movies each user has rated
    user_movies: HashMap<UserId, HashSet<MovieId>>,
    /// Rating each user gave, per movie
    movie_ratings: HashMap<MovieId, HashMap<UserId, Rating>>,
}

impl RatingStore {
    /// Creates a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rating` for the (user, movie) pair.
    ///
    /// Registers the user and the movie the first time their ids are seen.
    /// A second rating for the same pair replaces the first.
    ///
    /// Fails with `InvalidRating` for `Rating::NotSeen`, leaving the store
    /// unchanged.
    pub fn add_rating(&mut self, user: &User, movie: &Movie, rating: Rating) -> Result<()> {
        if !rating.is_seen() {
            return Err(RatingsError::InvalidRating {
                value: rating.value(),
            });
        }

        if !self.user_movies.contains_key(&user.id) {
            debug!("Registering user {} ({})", user.id, user.name);
            self.users.push(user.clone());
        }
        if !self.movie_ratings.contains_key(&movie.id) {
            debug!("Registering movie {} ({})", movie.id, movie.title);
            self.movies.push(movie.clone());
        }

        self.user_movies
            .entry(user.id)
            .or_default()
            .insert(movie.id);
        let previous = self
            .movie_ratings
            .entry(movie.id)
            .or_default()
            .insert(user.id, rating);

        if let Some(previous) = previous {
            debug!(
                "User {} re-rated movie {}: {} -> {}",
                user.id, movie.id, previous, rating
            );
        }
        Ok(())
    }

    /// Arithmetic mean of every stored rating for `movie_id`.
    ///
    /// Returns `0.0` (the `NotSeen` value) for an unknown movie. That is a
    /// "no data" sentinel, not a real average.
    pub fn average_rating(&self, movie_id: MovieId) -> f64 {
        match self.movie_ratings.get(&movie_id) {
            Some(ratings) if !ratings.is_empty() => {
                let total: u32 = ratings.values().map(|r| u32::from(r.value())).sum();
                f64::from(total) / ratings.len() as f64
            }
            _ => f64::from(Rating::NotSeen.value()),
        }
    }

    /// Ids of every movie the user has rated; empty if the user is unknown
    pub fn watched_movies(&self, user_id: UserId) -> HashSet<MovieId> {
        self.watched_set(user_id).cloned().unwrap_or_default()
    }

    /// Borrowing view of a user's watched set, `None` if the user is unknown
    pub fn watched_set(&self, user_id: UserId) -> Option<&HashSet<MovieId>> {
        self.user_movies.get(&user_id)
    }

    /// Whether the user has rated this movie
    pub fn has_watched(&self, user_id: UserId, movie_id: MovieId) -> bool {
        self.user_movies
            .get(&user_id)
            .is_some_and(|movies| movies.contains(&movie_id))
    }

    /// Users in the order they were first seen
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Movies in the order they were first seen
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Look up a registered user by id
    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Look up a registered movie by id
    pub fn movie(&self, movie_id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == movie_id)
    }

    /// The rating `user_id` gave `movie_id`.
    ///
    /// Fails with `UnknownEntity` if that exact pair was never rated.
    pub fn rating_of(&self, movie_id: MovieId, user_id: UserId) -> Result<Rating> {
        self.movie_ratings
            .get(&movie_id)
            .and_then(|ratings| ratings.get(&user_id))
            .copied()
            .ok_or(RatingsError::UnknownEntity { movie_id, user_id })
    }

    /// Every (user, rating) pair recorded for a movie, sorted by user id
    pub fn ratings_for(&self, movie_id: MovieId) -> Vec<(UserId, Rating)> {
        let mut ratings: Vec<(UserId, Rating)> = self
            .movie_ratings
            .get(&movie_id)
            .map(|r| r.iter().map(|(&uid, &rating)| (uid, rating)).collect())
            .unwrap_or_default();
        ratings.sort_unstable_by_key(|(uid, _)| *uid);
        ratings
    }

    /// Get counts for debugging/validation: (users, movies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.movie_ratings.values().map(|r| r.len()).sum();
        (self.users.len(), self.movies.len(), total_ratings)
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_store() -> RatingStore {
        let user1 = User::new(1, "User 1");
        let user2 = User::new(2, "User 2");
        let batman = Movie::new(1, "Batman Begins");
        let liar = Movie::new(2, "Liar Liar");
        let godfather = Movie::new(3, "The Godfather");

        let mut store = RatingStore::new();
        store.add_rating(&user1, &batman, Rating::Five).unwrap();
        store.add_rating(&user1, &liar, Rating::Two).unwrap();
        store.add_rating(&user2, &liar, Rating::Two).unwrap();
        store.add_rating(&user2, &godfather, Rating::Four).unwrap();
        store
    }

    #[test]
    fn test_empty_store() {
        let store = RatingStore::new();
        assert!(store.is_empty());
        assert_eq!(store.counts(), (0, 0, 0));
        assert_eq!(store.average_rating(1), 0.0);
        assert!(store.watched_movies(1).is_empty());
        assert!(store.users().is_empty());
        assert!(store.movies().is_empty());
    }

    #[test]
    fn test_average_rating_is_exact_mean() {
        let mut store = RatingStore::new();
        let movie = Movie::new(10, "Heat");
        store.add_rating(&User::new(1, "a"), &movie, Rating::Five).unwrap();
        store.add_rating(&User::new(2, "b"), &movie, Rating::Two).unwrap();
        store.add_rating(&User::new(3, "c"), &movie, Rating::Four).unwrap();

        assert!((store.average_rating(10) - 11.0 / 3.0).abs() < 1e-12);
        assert_eq!(store.average_rating(11), 0.0);
    }

    #[test]
    fn test_registries_keep_first_seen_order() {
        let store = reference_store();

        let user_ids: Vec<UserId> = store.users().iter().map(|u| u.id).collect();
        assert_eq!(user_ids, vec![1, 2]);

        let titles: Vec<&str> = store.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Batman Begins", "Liar Liar", "The Godfather"]);
        assert_eq!(store.counts(), (2, 3, 4));
    }

    #[test]
    fn test_watched_movies() {
        let store = reference_store();
        let watched = store.watched_movies(1);
        assert_eq!(watched.len(), 2);
        assert!(watched.contains(&1));
        assert!(watched.contains(&2));
        assert!(store.has_watched(2, 3));
        assert!(!store.has_watched(2, 1));
        assert!(store.watched_movies(99).is_empty());
    }

    #[test]
    fn test_re_adding_same_rating_is_idempotent() {
        let mut store = reference_store();
        let before = store.average_rating(2);

        let user1 = User::new(1, "User 1");
        store.add_rating(&user1, &Movie::new(2, "Liar Liar"), Rating::Two).unwrap();

        assert_eq!(store.average_rating(2), before);
        assert_eq!(store.counts(), (2, 3, 4));
    }

    #[test]
    fn test_re_rating_replaces_previous_value() {
        let mut store = reference_store();
        // Liar Liar: user1=2, user2=2 -> user1 now 5
        let user1 = User::new(1, "User 1");
        store.add_rating(&user1, &Movie::new(2, "Liar Liar"), Rating::Five).unwrap();

        assert_eq!(store.average_rating(2), 3.5);
        assert_eq!(store.rating_of(2, 1).unwrap(), Rating::Five);
        assert_eq!(store.ratings_for(2), vec![(1, Rating::Five), (2, Rating::Two)]);
        assert_eq!(store.counts(), (2, 3, 4));
    }

    #[test]
    fn test_not_seen_is_rejected_and_store_unchanged() {
        let mut store = reference_store();
        let result = store.add_rating(
            &User::new(7, "New"),
            &Movie::new(9, "New Movie"),
            Rating::NotSeen,
        );

        assert_eq!(result, Err(RatingsError::InvalidRating { value: 0 }));
        assert_eq!(store.counts(), (2, 3, 4));
        assert!(store.user(7).is_none());
        assert!(store.movie(9).is_none());
        assert!(store.watched_movies(7).is_empty());
    }

    #[test]
    fn test_rating_of_unknown_pair() {
        let store = reference_store();
        assert_eq!(store.rating_of(1, 1).unwrap(), Rating::Five);
        assert_eq!(
            store.rating_of(3, 1),
            Err(RatingsError::UnknownEntity { movie_id: 3, user_id: 1 })
        );
    }

    #[test]
    fn test_lookups() {
        let store = reference_store();
        assert_eq!(store.user(2).map(|u| u.name.as_str()), Some("User 2"));
        assert_eq!(store.movie(3).map(|m| m.title.as_str()), Some("The Godfather"));
        assert!(store.movie(4).is_none());
    }
}
