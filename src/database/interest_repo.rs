use sqlx::{SqliteConnection, SqlitePool};

const SQL_DELETE_FOR_REGISTRANT: &str = r#"
DELETE FROM interests
WHERE registrant_id = ?
"#;

pub async fn delete_for_registrant(
    conn: &mut SqliteConnection,
    registrant_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_FOR_REGISTRANT)
        .bind(registrant_id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

const SQL_INSERT_INTEREST: &str = r#"
INSERT INTO interests (
  registrant_id,
  activity_id,
  created_at
) VALUES (?, ?, ?)
"#;

pub async fn insert(
    conn: &mut SqliteConnection,
    registrant_id: &str,
    activity_id: &str,
    created_at: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_INTEREST)
        .bind(registrant_id)
        .bind(activity_id)
        .bind(created_at)
        .execute(conn)
        .await?;
    Ok(())
}

const SQL_COUNT_PER_REGISTRANT: &str = r#"
SELECT
  registrant_id,
  COUNT(*) AS votes
FROM interests
GROUP BY registrant_id
"#;

/// Vote counts per registrant across all activities.
pub async fn count_per_registrant(pool: &SqlitePool) -> sqlx::Result<Vec<(String, i64)>> {
    sqlx::query_as::<_, (String, i64)>(SQL_COUNT_PER_REGISTRANT)
        .fetch_all(pool)
        .await
}

#[derive(Debug, sqlx::FromRow)]
pub struct VoteContextRow {
    pub activity_id: String,
    pub activity_name: String,
    pub category: String,
    pub icon: Option<String>,
    pub registrant_code: String,
}

const SQL_LIST_WITH_CONTEXT: &str = r#"
SELECT
  i.activity_id,
  a.name AS activity_name,
  a.category,
  a.icon,
  r.code AS registrant_code
FROM interests i
JOIN activities a ON a.id = i.activity_id
JOIN registrants r ON r.id = i.registrant_id
ORDER BY a.category ASC, a.name ASC, i.activity_id ASC, r.code ASC
"#;

/// Every vote with its activity and voter context, for the grouped listing.
pub async fn list_with_context(pool: &SqlitePool) -> sqlx::Result<Vec<VoteContextRow>> {
    sqlx::query_as::<_, VoteContextRow>(SQL_LIST_WITH_CONTEXT)
        .fetch_all(pool)
        .await
}
