use sqlx::SqlitePool;

use crate::services::locks::KeyedLocks;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub locks: KeyedLocks,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            locks: KeyedLocks::new(),
        }
    }
}
