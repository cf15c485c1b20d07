use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{RegistrantRow, Role};

const SQL_FIND_REGISTRANT: &str = r#"
SELECT
  id,
  code,
  full_name,
  role,
  active,
  created_at
FROM registrants
WHERE id = ?
"#;

pub async fn find_by_id(pool: &SqlitePool, registrant_id: &str) -> sqlx::Result<Option<RegistrantRow>> {
    sqlx::query_as::<_, RegistrantRow>(SQL_FIND_REGISTRANT)
        .bind(registrant_id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_BY_ROLE: &str = r#"
SELECT
  id,
  code,
  full_name,
  role,
  active,
  created_at
FROM registrants
WHERE role = ?
ORDER BY created_at ASC
"#;

/// Registrants with the given role in registration order.
pub async fn list_by_role(pool: &SqlitePool, role: Role) -> sqlx::Result<Vec<RegistrantRow>> {
    sqlx::query_as::<_, RegistrantRow>(SQL_LIST_BY_ROLE)
        .bind(role)
        .fetch_all(pool)
        .await
}

const SQL_LIST_ACTIVE_VOTERS: &str = r#"
SELECT
  r.id,
  r.code,
  r.full_name,
  r.role,
  r.active,
  r.created_at
FROM registrants r
JOIN interests i ON i.registrant_id = r.id
WHERE i.activity_id = ?
  AND r.active = 1
ORDER BY r.created_at ASC
"#;

/// Active registrants holding an interest in the activity. The (registrant,
/// activity) pair is unique in the interests table, so rows come back
/// deduplicated.
pub async fn list_active_voters(
    pool: &SqlitePool,
    activity_id: &str,
) -> sqlx::Result<Vec<RegistrantRow>> {
    sqlx::query_as::<_, RegistrantRow>(SQL_LIST_ACTIVE_VOTERS)
        .bind(activity_id)
        .fetch_all(pool)
        .await
}

const SQL_LIST_VOTERS: &str = r#"
SELECT
  r.id,
  r.code,
  r.full_name,
  r.role,
  r.active,
  r.created_at
FROM registrants r
JOIN interests i ON i.registrant_id = r.id
WHERE i.activity_id = ?
ORDER BY r.created_at ASC
"#;

/// All registrants holding an interest in the activity, active or not.
pub async fn list_voters(pool: &SqlitePool, activity_id: &str) -> sqlx::Result<Vec<RegistrantRow>> {
    sqlx::query_as::<_, RegistrantRow>(SQL_LIST_VOTERS)
        .bind(activity_id)
        .fetch_all(pool)
        .await
}

const SQL_UPDATE_REGISTRANT: &str = r#"
UPDATE registrants
SET full_name = COALESCE(?, full_name),
    active = COALESCE(?, active)
WHERE id = ?
"#;

pub async fn update_profile(
    pool: &SqlitePool,
    registrant_id: &str,
    full_name: Option<&str>,
    active: Option<bool>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_REGISTRANT)
        .bind(full_name)
        .bind(active)
        .bind(registrant_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_INSERT_REGISTRANT: &str = r#"
INSERT INTO registrants (
  id,
  code,
  full_name,
  role,
  active,
  created_at
) VALUES (?, ?, ?, ?, ?, ?)
"#;

pub struct NewRegistrant<'a> {
    pub id: &'a str,
    pub code: &'a str,
    pub full_name: &'a str,
    pub role: Role,
    pub active: bool,
    pub created_at: &'a str,
}

pub async fn insert(conn: &mut SqliteConnection, registrant: NewRegistrant<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_REGISTRANT)
        .bind(registrant.id)
        .bind(registrant.code)
        .bind(registrant.full_name)
        .bind(registrant.role)
        .bind(registrant.active)
        .bind(registrant.created_at)
        .execute(conn)
        .await?;
    Ok(())
}
