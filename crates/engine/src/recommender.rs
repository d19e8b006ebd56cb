//! RecommendationEngine - picks the next movie for a user.
//!
//! ## Algorithm
//! Users with no rating history get the catalog's highest average rating
//! (cold start). Users with history get the best-rated movie, by average,
//! that their most similar neighbor watched and they did not
//! (collaborative filtering).
//!
//! Every scan runs in registry (first-seen) order and only replaces the
//! running best on a strict improvement, so ties go to whoever was seen
//! first.
//!
//! ## Neighbor policy
//! The most similar neighbor may have nothing left to offer. `NeighborPolicy`
//! decides what happens then; see its variants.

use crate::similarity::SimilarityEngine;
use ratings::{Movie, RatingStore, User, UserId};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// How the warm branch chooses the neighbor that supplies the movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborPolicy {
    /// Most similar neighbor among those that still have an unwatched movie
    /// to offer. A closer neighbor with nothing to offer never hides a
    /// farther one that does.
    #[default]
    ProducingNeighbor,
    /// Every new closest neighbor raises the bar, even when it has nothing to
    /// offer; the result only changes when that neighbor produced a movie.
    NearestNeighbor,
}

/// Where a recommendation came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Cold start: highest average rating in the catalog
    Popularity,
    /// Collaborative filtering through this neighbor
    SimilarUser { user_id: UserId, similarity: f64 },
}

/// A chosen movie along with why it was chosen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie: Movie,
    pub source: RecommendationSource,
    pub average_rating: f64,
}

impl Recommendation {
    /// Human-readable reason for the pick
    pub fn explanation(&self) -> String {
        match self.source {
            RecommendationSource::Popularity => format!(
                "Highest average rating in the catalog ({:.2})",
                self.average_rating
            ),
            RecommendationSource::SimilarUser { user_id, similarity } => format!(
                "Best unwatched movie of user {} (similarity {:.2}, average rating {:.2})",
                user_id, similarity, self.average_rating
            ),
        }
    }
}

/// Answers "what should this user watch next"
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    /// Shared reference to the store (read-only, so no Mutex needed)
    store: Arc<RatingStore>,
    similarity: SimilarityEngine,
    policy: NeighborPolicy,
}

impl RecommendationEngine {
    pub fn new(store: Arc<RatingStore>) -> Self {
        Self {
            similarity: SimilarityEngine::new(Arc::clone(&store)),
            store,
            policy: NeighborPolicy::default(),
        }
    }

    /// Configure the neighbor policy (default: `ProducingNeighbor`)
    pub fn with_neighbor_policy(mut self, policy: NeighborPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> NeighborPolicy {
        self.policy
    }

    pub fn similarity_engine(&self) -> &SimilarityEngine {
        &self.similarity
    }

    /// The movie to suggest to `user_id`, or `None` when nothing qualifies
    pub fn recommend(&self, user_id: UserId) -> Option<Movie> {
        self.explain(user_id).map(|rec| rec.movie)
    }

    /// Same choice as `recommend`, with its source and average rating
    #[instrument(skip(self), fields(policy = ?self.policy))]
    pub fn explain(&self, user_id: UserId) -> Option<Recommendation> {
        let has_history = self
            .store
            .watched_set(user_id)
            .is_some_and(|watched| !watched.is_empty());

        let recommendation = if has_history {
            self.recommend_from_neighbors(user_id)
        } else {
            self.recommend_for_new_user()
        };

        debug!(
            "Recommendation for user {}: {:?}",
            user_id,
            recommendation.as_ref().map(|rec| rec.movie.title.as_str())
        );
        recommendation
    }

    /// Movie with the strictly greatest average rating, first-seen on ties
    pub fn most_popular(&self) -> Option<Movie> {
        best_by_average(&self.store, self.store.movies().iter()).map(|(movie, _)| movie.clone())
    }

    /// Best-rated movie that `neighbor` watched and `target` did not
    pub fn best_unwatched(&self, target: UserId, neighbor: UserId) -> Option<Movie> {
        self.best_unwatched_with_average(target, neighbor)
            .map(|(movie, _)| movie.clone())
    }

    fn best_unwatched_with_average(
        &self,
        target: UserId,
        neighbor: UserId,
    ) -> Option<(&Movie, f64)> {
        let unwatched = self.store.movies().iter().filter(|movie| {
            self.store.has_watched(neighbor, movie.id) && !self.store.has_watched(target, movie.id)
        });
        best_by_average(&self.store, unwatched)
    }

    fn recommend_for_new_user(&self) -> Option<Recommendation> {
        let (movie, average_rating) = best_by_average(&self.store, self.store.movies().iter())?;
        Some(Recommendation {
            movie: movie.clone(),
            source: RecommendationSource::Popularity,
            average_rating,
        })
    }

    fn recommend_from_neighbors(&self, user_id: UserId) -> Option<Recommendation> {
        let others: Vec<&User> = self
            .store
            .users()
            .iter()
            .filter(|other| other.id != user_id)
            .collect();

        // Scores come back in registry order; the selection below stays sequential
        let scores: Vec<f64> = others
            .par_iter()
            .map(|other| self.similarity.similarity(user_id, other.id))
            .collect();

        let mut best_similarity = f64::INFINITY;
        let mut best: Option<Recommendation> = None;

        for (other, similarity) in others.iter().zip(scores) {
            // Infinite similarity never passes this check
            if similarity >= best_similarity {
                continue;
            }

            match (self.best_unwatched_with_average(user_id, other.id), self.policy) {
                (Some((movie, average_rating)), _) => {
                    debug!(
                        "New best neighbor {} (similarity {:.3}) offers '{}'",
                        other.id, similarity, movie.title
                    );
                    best_similarity = similarity;
                    best = Some(Recommendation {
                        movie: movie.clone(),
                        source: RecommendationSource::SimilarUser {
                            user_id: other.id,
                            similarity,
                        },
                        average_rating,
                    });
                }
                (None, NeighborPolicy::NearestNeighbor) => {
                    debug!(
                        "Neighbor {} (similarity {:.3}) is closest but has nothing unwatched",
                        other.id, similarity
                    );
                    best_similarity = similarity;
                }
                (None, NeighborPolicy::ProducingNeighbor) => {
                    debug!(
                        "Skipping neighbor {} (similarity {:.3}): nothing unwatched",
                        other.id, similarity
                    );
                }
            }
        }

        best
    }
}

/// Highest `average_rating` among `movies`, keeping the first on ties
fn best_by_average<'a>(
    store: &RatingStore,
    movies: impl Iterator<Item = &'a Movie>,
) -> Option<(&'a Movie, f64)> {
    let mut best: Option<(&'a Movie, f64)> = None;
    for movie in movies {
        let average = store.average_rating(movie.id);
        if best.is_none_or(|(_, best_average)| average > best_average) {
            best = Some((movie, average));
        }
    }
    best
}
