//! Benchmarks for recommendation
//!
//! Run with: cargo bench --package engine
//!
//! Uses a synthetic, deterministic store so no data files are needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::{RecommendationEngine, SimilarityEngine};
use ratings::{Movie, Rating, RatingStore, User};
use std::sync::Arc;

const USERS: u32 = 500;
const MOVIES: u32 = 200;

fn build_synthetic_store() -> Arc<RatingStore> {
    let mut store = RatingStore::new();
    let movies: Vec<Movie> = (1..=MOVIES)
        .map(|id| Movie::new(id, format!("Movie {id}")))
        .collect();

    for user_id in 1..=USERS {
        let user = User::new(user_id, format!("User {user_id}"));
        // Each user rates roughly one movie in seven, with a spread of scores
        for movie in movies.iter().filter(|m| (m.id * 31 + user_id * 17) % 7 == 0) {
            let value = ((movie.id + user_id) % 5 + 1) as u8;
            let rating = Rating::try_from(value).expect("value is within 1-5");
            store.add_rating(&user, movie, rating).expect("rating is seen");
        }
    }
    Arc::new(store)
}

fn bench_recommend_existing_user(c: &mut Criterion) {
    let engine = RecommendationEngine::new(build_synthetic_store());

    c.bench_function("recommend_existing_user", |b| {
        b.iter(|| black_box(engine.recommend(black_box(1))))
    });
}

fn bench_recommend_new_user(c: &mut Criterion) {
    let engine = RecommendationEngine::new(build_synthetic_store());

    c.bench_function("recommend_new_user", |b| {
        b.iter(|| black_box(engine.recommend(black_box(USERS + 1))))
    });
}

fn bench_similarity(c: &mut Criterion) {
    let similarity = SimilarityEngine::new(build_synthetic_store());

    c.bench_function("similarity_pair", |b| {
        b.iter(|| black_box(similarity.similarity(black_box(1), black_box(2))))
    });
}

criterion_group!(
    benches,
    bench_recommend_existing_user,
    bench_recommend_new_user,
    bench_similarity
);
criterion_main!(benches);
