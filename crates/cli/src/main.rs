use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use engine::{NeighborPolicy, Recommendation, RecommendationEngine};
use ratings::{Movie, Rating, RatingStore, User, UserId};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// movie-recs - pick the next movie for a user
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Movie recommendation by popularity and user similarity", long_about = None)]
struct Cli {
    /// Seed file with one `user_id::user_name::movie_id::title::rating` per line.
    /// The built-in reference ratings are used when omitted.
    #[arg(short, long, global = true)]
    ratings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a movie for every known user plus one newcomer
    Demo,

    /// Get a movie recommendation for a user
    Recommend {
        /// User ID to get a recommendation for
        #[arg(long)]
        user_id: UserId,

        /// Show why the movie was picked
        #[arg(long)]
        explain: bool,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,

        /// How to treat a closest neighbor with nothing left to offer
        #[arg(long, value_enum, default_value_t = PolicyArg::Producing)]
        policy: PolicyArg,
    },

    /// Show a user's ratings
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// List the catalog with average ratings
    Movies,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Closest neighbor that still has an unwatched movie
    Producing,
    /// Closest neighbor only, even if it has nothing to offer
    Nearest,
}

impl From<PolicyArg> for NeighborPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Producing => NeighborPolicy::ProducingNeighbor,
            PolicyArg::Nearest => NeighborPolicy::NearestNeighbor,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = match &cli.ratings {
        Some(path) => load_store(path)?,
        None => reference_store()?,
    };
    let (users, movies, ratings) = store.counts();
    info!("Store ready: {} users, {} movies, {} ratings", users, movies, ratings);
    let store = Arc::new(store);

    match cli.command {
        Commands::Demo => handle_demo(store),
        Commands::Recommend {
            user_id,
            explain,
            json,
            policy,
        } => handle_recommend(store, user_id, explain, json, policy.into()),
        Commands::User { user_id } => handle_user(&store, user_id),
        Commands::Movies => handle_movies(&store),
    }
}

fn load_store(path: &Path) -> Result<RatingStore> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ratings file {}", path.display()))?;
    RatingStore::from_seed(&text)
        .with_context(|| format!("Failed to parse ratings file {}", path.display()))
}

/// The three-user, three-movie sample data
fn reference_store() -> Result<RatingStore> {
    let user1 = User::new(1, "User 1");
    let user2 = User::new(2, "User 2");

    let batman = Movie::new(1, "Batman Begins");
    let liar = Movie::new(2, "Liar Liar");
    let godfather = Movie::new(3, "The Godfather");

    let mut store = RatingStore::new();
    store.add_rating(&user1, &batman, Rating::Five)?;
    store.add_rating(&user1, &liar, Rating::Two)?;
    store.add_rating(&user2, &liar, Rating::Two)?;
    store.add_rating(&user2, &godfather, Rating::Four)?;
    Ok(store)
}

/// Handle the 'demo' command
fn handle_demo(store: Arc<RatingStore>) -> Result<()> {
    let engine = RecommendationEngine::new(Arc::clone(&store));

    // Every known user, then one id nobody has used yet
    let mut user_ids: Vec<UserId> = store.users().iter().map(|u| u.id).collect();
    let newcomer =
        newcomer_id(&store).ok_or_else(|| anyhow!("Every user id is taken, no newcomer to show"))?;
    user_ids.push(newcomer);

    println!("{}", "Movie Recommendations:".bold().blue());
    for user_id in user_ids {
        let name = store
            .user(user_id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| format!("User {user_id} (new)"));
        print_recommendation(&name, engine.explain(user_id).as_ref(), true);
    }
    Ok(())
}

/// An id no registered user has: one past the largest, or the smallest free id
/// when the largest is `UserId::MAX`
fn newcomer_id(store: &RatingStore) -> Option<UserId> {
    let max = store.users().iter().map(|u| u.id).max().unwrap_or(0);
    max.checked_add(1)
        .or_else(|| (0..=UserId::MAX).find(|&id| store.user(id).is_none()))
}

/// Handle the 'recommend' command
fn handle_recommend(
    store: Arc<RatingStore>,
    user_id: UserId,
    explain: bool,
    json: bool,
    policy: NeighborPolicy,
) -> Result<()> {
    let engine = RecommendationEngine::new(Arc::clone(&store)).with_neighbor_policy(policy);
    let recommendation = engine.explain(user_id);

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
        return Ok(());
    }

    let name = store
        .user(user_id)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| format!("User {user_id}"));
    print_recommendation(&name, recommendation.as_ref(), explain);
    Ok(())
}

/// Handle the 'user' command
fn handle_user(store: &RatingStore, user_id: UserId) -> Result<()> {
    let user = store
        .user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    println!("{}", format!("User ID: {} ({})", user.id, user.name).bold().blue());

    // Registry order keeps the listing stable
    let mut count = 0;
    let mut total = 0u32;
    for movie in store.movies() {
        let Ok(rating) = store.rating_of(movie.id, user_id) else {
            continue;
        };
        count += 1;
        total += u32::from(rating.value());
        println!("{}{} (Rating: {})", "• ".green(), movie.title, rating);
    }

    let avg = if count > 0 {
        total as f64 / count as f64
    } else {
        0.0
    };
    println!("{}Number of ratings: {}", "• ".cyan(), count);
    println!("{}Average rating given: {:.2}", "• ".cyan(), avg);
    Ok(())
}

/// Handle the 'movies' command
fn handle_movies(store: &RatingStore) -> Result<()> {
    println!("{}", "Catalog:".bold().blue());
    for movie in store.movies() {
        println!(
            "{}: {} avg {:.2} ({} ratings)",
            movie.id,
            movie.title,
            store.average_rating(movie.id),
            store.ratings_for(movie.id).len()
        );
    }
    Ok(())
}

/// Helper function to format and print one recommendation
fn print_recommendation(name: &str, recommendation: Option<&Recommendation>, explain: bool) {
    match recommendation {
        Some(rec) => {
            println!("{} -> {}", name.green(), rec.movie.title.bold());
            if explain {
                println!("   Explanation: {}", rec.explanation());
            }
        }
        None => println!("{} -> {}", name.green(), "no recommendation".dimmed()),
    }
}
