use chrono::Utc;
use dotenvy::dotenv;
use rand::Rng;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use uuid::Uuid;

use sportsday::database::{self, activity_repo, registrant_repo};
use sportsday::models::Role;

const ACTIVITIES: &[(&str, &str, &str)] = &[
    ("Carrom", "INDOOR", "🎯"),
    ("Volley Ball", "OUTDOOR", "🏐"),
    ("Throw Ball", "OUTDOOR", "⚽"),
    ("Koko", "OUTDOOR", "🥎"),
    ("Tennikoit", "OUTDOOR", "🎾"),
    ("100m Sprint", "TRACK", "🏃"),
    ("200m Sprint", "TRACK", "🏃‍♀️"),
    ("Relay Race (4x100m)", "TRACK", "🏃‍♂️"),
    ("Shot Put", "FIELD", "🏋️"),
    ("Long Jump", "FIELD", "🤸"),
    ("Lemon in the Spoon", "FUN", "🍋"),
];

const PARTICIPANT_NAMES: &[&str] = &[
    "Rajesh Kumar",
    "Priya Sharma",
    "Arun Patel",
    "Sneha Reddy",
    "Vikram Singh",
    "Kavita Jain",
    "Manoj Gupta",
    "Ritu Malhotra",
    "Suresh Yadav",
    "Meena Agarwal",
    "Rahul Verma",
    "Pooja Chopra",
    "Amit Thakur",
    "Sunita Roy",
    "Deepak Mishra",
    "Nisha Bansal",
    "Kiran Shah",
    "Rekha Nair",
    "Sanjay Tiwari",
    "Anita Kapoor",
    "Naveen Kumar",
    "Geeta Prasad",
    "Rohit Saxena",
    "Shweta Dubey",
    "Ajay Pandey",
];

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://sportsday.db".to_string());
    let options = SqliteConnectOptions::from_str(&db_url)
        .expect("invalid DATABASE_URL")
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("failed to connect to database");

    database::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let mut conn = pool.acquire().await.expect("failed to acquire connection");

    // Start from a clean slate so the seed can be re-run.
    for table in [
        "match_participations",
        "matches",
        "interests",
        "registrants",
        "activities",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *conn)
            .await
            .expect("failed to clear table");
    }

    let mut rng = rand::thread_rng();
    let now = Utc::now().to_rfc3339();

    for (name, category, icon) in ACTIVITIES {
        activity_repo::insert(
            &mut *conn,
            &Uuid::new_v4().to_string(),
            name,
            category,
            Some(icon),
            &now,
        )
        .await
        .expect("failed to seed activity");
    }

    registrant_repo::insert(
        &mut *conn,
        registrant_repo::NewRegistrant {
            id: &Uuid::new_v4().to_string(),
            code: "ADMIN2026",
            full_name: "Organizer",
            role: Role::Organizer,
            active: true,
            created_at: &now,
        },
    )
    .await
    .expect("failed to seed organizer");

    for (i, full_name) in PARTICIPANT_NAMES.iter().enumerate() {
        registrant_repo::insert(
            &mut *conn,
            registrant_repo::NewRegistrant {
                id: &Uuid::new_v4().to_string(),
                code: &format!("USER{:03}", i + 1),
                full_name,
                role: Role::Participant,
                // Most of the field shows up on the day itself.
                active: rng.gen_bool(0.9),
                created_at: &now,
            },
        )
        .await
        .expect("failed to seed participant");
    }

    println!(
        "seeded {} activities and {} registrants",
        ACTIVITIES.len(),
        PARTICIPANT_NAMES.len() + 1
    );
}
