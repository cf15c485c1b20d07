use sqlx::SqlitePool;

pub mod activity_repo;
pub mod interest_repo;
pub mod match_repo;
pub mod registrant_repo;

const SCHEMA: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS registrants (
  id TEXT PRIMARY KEY,
  code TEXT NOT NULL UNIQUE,
  full_name TEXT NOT NULL,
  role TEXT NOT NULL DEFAULT 'PARTICIPANT',
  active INTEGER NOT NULL DEFAULT 1,
  created_at TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS activities (
  id TEXT PRIMARY KEY,
  name TEXT NOT NULL,
  category TEXT NOT NULL,
  icon TEXT,
  created_at TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS interests (
  registrant_id TEXT NOT NULL REFERENCES registrants(id),
  activity_id TEXT NOT NULL REFERENCES activities(id),
  created_at TEXT NOT NULL,
  PRIMARY KEY (registrant_id, activity_id)
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS matches (
  id TEXT PRIMARY KEY,
  activity_id TEXT NOT NULL REFERENCES activities(id),
  scheduled_at TEXT NOT NULL,
  status TEXT NOT NULL DEFAULT 'SCHEDULED',
  created_at TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS match_participations (
  match_id TEXT NOT NULL REFERENCES matches(id),
  registrant_id TEXT NOT NULL REFERENCES registrants(id),
  outcome TEXT,
  PRIMARY KEY (match_id, registrant_id)
)
"#,
    "CREATE INDEX IF NOT EXISTS idx_interests_activity ON interests(activity_id)",
    "CREATE INDEX IF NOT EXISTS idx_matches_activity ON matches(activity_id)",
];

/// Create the schema if it does not exist yet. Idempotent; run at startup,
/// by the seed binary, and by every test database.
pub async fn run_migrations(pool: &SqlitePool) -> sqlx::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::SqlitePool;
    use uuid::Uuid;

    use super::{activity_repo, interest_repo, registrant_repo};
    use crate::models::Role;

    /// Fresh database in a temp file, schema applied. A file (not :memory:)
    /// so every pool connection sees the same data.
    pub async fn test_pool() -> SqlitePool {
        let db_path = std::env::temp_dir().join(format!("sportsday_test_{}.sqlite", Uuid::new_v4()));
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("failed to create test database");
        super::run_migrations(&pool)
            .await
            .expect("failed to run migrations");
        pool
    }

    /// Monotonic registration timestamps so seeded registrants keep a
    /// deterministic registration order.
    fn next_created_at() -> String {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TICK: AtomicU64 = AtomicU64::new(0);
        let tick = TICK.fetch_add(1, Ordering::Relaxed);
        format!("2026-08-01T00:{:02}:{:02}Z", (tick / 60) % 60, tick % 60)
    }

    pub async fn seed_registrant(pool: &SqlitePool, id: &str, active: bool) {
        let mut conn = pool.acquire().await.unwrap();
        registrant_repo::insert(
            &mut *conn,
            registrant_repo::NewRegistrant {
                id,
                code: &format!("CODE-{id}"),
                full_name: &format!("Registrant {id}"),
                role: Role::Participant,
                active,
                created_at: &next_created_at(),
            },
        )
        .await
        .unwrap();
    }

    pub async fn seed_activity(pool: &SqlitePool, id: &str) {
        let mut conn = pool.acquire().await.unwrap();
        activity_repo::insert(&mut *conn, id, "Carrom", "INDOOR", Some("🎯"), "2026-08-01T00:00:00Z")
            .await
            .unwrap();
    }

    pub async fn seed_vote(pool: &SqlitePool, registrant_id: &str, activity_id: &str) {
        let mut conn = pool.acquire().await.unwrap();
        interest_repo::insert(&mut *conn, registrant_id, activity_id, "2026-08-01T00:00:00Z")
            .await
            .unwrap();
    }
}
