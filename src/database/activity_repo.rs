use sqlx::{SqliteConnection, SqlitePool};

use crate::models::ActivityRow;

const SQL_FIND_ACTIVITY: &str = r#"
SELECT
  id,
  name,
  category,
  icon,
  created_at
FROM activities
WHERE id = ?
"#;

pub async fn find_by_id(pool: &SqlitePool, activity_id: &str) -> sqlx::Result<Option<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_FIND_ACTIVITY)
        .bind(activity_id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_ACTIVITIES: &str = r#"
SELECT
  id,
  name,
  category,
  icon,
  created_at
FROM activities
ORDER BY category ASC, name ASC
"#;

pub async fn list_all(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LIST_ACTIVITIES)
        .fetch_all(pool)
        .await
}

#[derive(Debug, sqlx::FromRow)]
pub struct ActivityWithCountsRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon: Option<String>,
    pub votes_count: i64,
    pub matches_count: i64,
}

const SQL_LIST_WITH_COUNTS: &str = r#"
SELECT
  a.id,
  a.name,
  a.category,
  a.icon,
  (SELECT COUNT(*) FROM interests i WHERE i.activity_id = a.id) AS votes_count,
  (SELECT COUNT(*) FROM matches m WHERE m.activity_id = a.id) AS matches_count
FROM activities a
ORDER BY a.category ASC, a.name ASC
"#;

pub async fn list_with_counts(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityWithCountsRow>> {
    sqlx::query_as::<_, ActivityWithCountsRow>(SQL_LIST_WITH_COUNTS)
        .fetch_all(pool)
        .await
}

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO activities (
  id,
  name,
  category,
  icon,
  created_at
) VALUES (?, ?, ?, ?, ?)
"#;

pub async fn insert(
    conn: &mut SqliteConnection,
    id: &str,
    name: &str,
    category: &str,
    icon: Option<&str>,
    created_at: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_ACTIVITY)
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(icon)
        .bind(created_at)
        .execute(conn)
        .await?;
    Ok(())
}
