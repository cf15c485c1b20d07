use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use sportsday::database;
use sportsday::web::middleware::auth as auth_middleware;
use sportsday::web::routes::{activities, leaderboard, matches, registrants, votes};
use sportsday::web::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Connect to the database
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

    let state = AppState::new(pool);

    // 3. All API routes sit under one identity-check layer; role checks
    // happen in the handlers.
    let app = Router::new()
        .route("/api/activities", get(activities::list_activities_handler))
        .route(
            "/api/activities/:activity_id/participants",
            get(activities::participants_handler),
        )
        .route(
            "/api/activities/:activity_id/schedule",
            post(activities::schedule_activity_handler),
        )
        .route("/api/matches", get(matches::list_matches_handler))
        .route(
            "/api/matches/:match_id/reschedule",
            post(matches::reschedule_match_handler),
        )
        .route(
            "/api/matches/:match_id/result",
            post(matches::record_outcome_handler),
        )
        .route("/api/leaderboard", get(leaderboard::leaderboard_handler))
        .route("/api/registrants", get(registrants::list_registrants_handler))
        .route(
            "/api/registrants/:registrant_id",
            put(registrants::update_registrant_handler),
        )
        .route(
            "/api/votes",
            get(votes::list_votes_handler).post(votes::update_votes_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state);

    // 4. Start the server
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("invalid host/port");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    let bound_addr = listener.local_addr().unwrap();
    tracing::info!("listening on http://{}", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
