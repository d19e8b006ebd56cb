//! Example: Recommend movies for the reference users
//!
//! Run with: cargo run --package engine --example reference_scenario
//!
//! This example shows how to:
//! 1. Fill a RatingStore
//! 2. Ask for collaborative recommendations (users with history)
//! 3. Ask for a cold-start recommendation (a user with none)

use engine::RecommendationEngine;
use ratings::{Movie, Rating, RatingStore, User};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,engine=debug")
        .init();

    println!("=== Reference Recommendation Example ===\n");

    let user1 = User::new(1, "User 1");
    let user2 = User::new(2, "User 2");
    let user3 = User::new(3, "User 3");

    let batman = Movie::new(1, "Batman Begins");
    let liar = Movie::new(2, "Liar Liar");
    let godfather = Movie::new(3, "The Godfather");

    let mut store = RatingStore::new();
    store.add_rating(&user1, &batman, Rating::Five)?;
    store.add_rating(&user1, &liar, Rating::Two)?;
    store.add_rating(&user2, &liar, Rating::Two)?;
    store.add_rating(&user2, &godfather, Rating::Four)?;

    let engine = RecommendationEngine::new(Arc::new(store));

    for user in [&user1, &user2, &user3] {
        match engine.explain(user.id) {
            Some(rec) => println!("{}: {}\n  {}", user.name, rec.movie, rec.explanation()),
            None => println!("{}: no recommendation", user.name),
        }
    }

    Ok(())
}
