use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{MatchOutcome, MatchParticipationRow, MatchRow, MatchStatus};

const SQL_FIND_MATCH: &str = r#"
SELECT
  id,
  activity_id,
  scheduled_at,
  status,
  created_at
FROM matches
WHERE id = ?
"#;

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    match_id: &str,
) -> sqlx::Result<Option<MatchRow>> {
    sqlx::query_as::<_, MatchRow>(SQL_FIND_MATCH)
        .bind(match_id)
        .fetch_optional(conn)
        .await
}

const SQL_LIST_ALL: &str = r#"
SELECT
  id,
  activity_id,
  scheduled_at,
  status,
  created_at
FROM matches
ORDER BY created_at DESC
"#;

const SQL_LIST_FOR_ACTIVITY: &str = r#"
SELECT
  id,
  activity_id,
  scheduled_at,
  status,
  created_at
FROM matches
WHERE activity_id = ?
ORDER BY created_at DESC
"#;

/// Matches newest first, optionally restricted to one activity.
pub async fn list(pool: &SqlitePool, activity_id: Option<&str>) -> sqlx::Result<Vec<MatchRow>> {
    match activity_id {
        Some(activity_id) => {
            sqlx::query_as::<_, MatchRow>(SQL_LIST_FOR_ACTIVITY)
                .bind(activity_id)
                .fetch_all(pool)
                .await
        }
        None => sqlx::query_as::<_, MatchRow>(SQL_LIST_ALL).fetch_all(pool).await,
    }
}

const SQL_DELETE_PARTICIPATIONS_FOR_ACTIVITY: &str = r#"
DELETE FROM match_participations
WHERE match_id IN (SELECT id FROM matches WHERE activity_id = ?)
"#;

const SQL_DELETE_MATCHES_FOR_ACTIVITY: &str = r#"
DELETE FROM matches
WHERE activity_id = ?
"#;

/// Drop every match (and its participations) for the activity. Caller wraps
/// this in the same transaction as the recreation.
pub async fn delete_for_activity(
    conn: &mut SqliteConnection,
    activity_id: &str,
) -> sqlx::Result<u64> {
    sqlx::query(SQL_DELETE_PARTICIPATIONS_FOR_ACTIVITY)
        .bind(activity_id)
        .execute(&mut *conn)
        .await?;
    let res = sqlx::query(SQL_DELETE_MATCHES_FOR_ACTIVITY)
        .bind(activity_id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

const SQL_INSERT_MATCH: &str = r#"
INSERT INTO matches (
  id,
  activity_id,
  scheduled_at,
  status,
  created_at
) VALUES (?, ?, ?, ?, ?)
"#;

pub async fn insert_match(
    conn: &mut SqliteConnection,
    id: &str,
    activity_id: &str,
    scheduled_at: &str,
    created_at: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_MATCH)
        .bind(id)
        .bind(activity_id)
        .bind(scheduled_at)
        .bind(MatchStatus::Scheduled)
        .bind(created_at)
        .execute(conn)
        .await?;
    Ok(())
}

const SQL_INSERT_PARTICIPATION: &str = r#"
INSERT INTO match_participations (
  match_id,
  registrant_id,
  outcome
) VALUES (?, ?, NULL)
"#;

pub async fn insert_participation(
    conn: &mut SqliteConnection,
    match_id: &str,
    registrant_id: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_PARTICIPATION)
        .bind(match_id)
        .bind(registrant_id)
        .execute(conn)
        .await?;
    Ok(())
}

const SQL_UPDATE_SCHEDULED_AT: &str = r#"
UPDATE matches
SET scheduled_at = ?
WHERE id = ?
"#;

pub async fn update_scheduled_at(
    pool: &SqlitePool,
    match_id: &str,
    scheduled_at: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_SCHEDULED_AT)
        .bind(scheduled_at)
        .bind(match_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_LIST_PARTICIPATIONS: &str = r#"
SELECT
  match_id,
  registrant_id,
  outcome
FROM match_participations
WHERE match_id = ?
"#;

pub async fn list_participations(
    conn: &mut SqliteConnection,
    match_id: &str,
) -> sqlx::Result<Vec<MatchParticipationRow>> {
    sqlx::query_as::<_, MatchParticipationRow>(SQL_LIST_PARTICIPATIONS)
        .bind(match_id)
        .fetch_all(conn)
        .await
}

const SQL_UPDATE_OUTCOME: &str = r#"
UPDATE match_participations
SET outcome = ?
WHERE match_id = ? AND registrant_id = ?
"#;

pub async fn update_outcome(
    conn: &mut SqliteConnection,
    match_id: &str,
    registrant_id: &str,
    outcome: MatchOutcome,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_OUTCOME)
        .bind(outcome)
        .bind(match_id)
        .bind(registrant_id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

const SQL_UPDATE_STATUS: &str = r#"
UPDATE matches
SET status = ?
WHERE id = ?
"#;

pub async fn update_status(
    conn: &mut SqliteConnection,
    match_id: &str,
    status: MatchStatus,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_STATUS)
        .bind(status)
        .bind(match_id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

#[derive(Debug, sqlx::FromRow)]
pub struct ParticipantViewRow {
    pub match_id: String,
    pub registrant_id: String,
    pub code: String,
    pub full_name: String,
    pub outcome: Option<MatchOutcome>,
}

const SQL_LIST_PARTICIPANT_VIEWS_ALL: &str = r#"
SELECT
  p.match_id,
  p.registrant_id,
  r.code,
  r.full_name,
  p.outcome
FROM match_participations p
JOIN registrants r ON r.id = p.registrant_id
"#;

const SQL_LIST_PARTICIPANT_VIEWS_FOR_ACTIVITY: &str = r#"
SELECT
  p.match_id,
  p.registrant_id,
  r.code,
  r.full_name,
  p.outcome
FROM match_participations p
JOIN registrants r ON r.id = p.registrant_id
JOIN matches m ON m.id = p.match_id
WHERE m.activity_id = ?
"#;

/// Participant rows (with registrant context) for the match listing,
/// optionally restricted to one activity's matches.
pub async fn list_participant_views(
    pool: &SqlitePool,
    activity_id: Option<&str>,
) -> sqlx::Result<Vec<ParticipantViewRow>> {
    match activity_id {
        Some(activity_id) => {
            sqlx::query_as::<_, ParticipantViewRow>(SQL_LIST_PARTICIPANT_VIEWS_FOR_ACTIVITY)
                .bind(activity_id)
                .fetch_all(pool)
                .await
        }
        None => {
            sqlx::query_as::<_, ParticipantViewRow>(SQL_LIST_PARTICIPANT_VIEWS_ALL)
                .fetch_all(pool)
                .await
        }
    }
}

const SQL_COUNT_OUTCOMES_PER_REGISTRANT: &str = r#"
SELECT
  registrant_id,
  outcome,
  COUNT(*) AS n
FROM match_participations
WHERE outcome IS NOT NULL
GROUP BY registrant_id, outcome
"#;

/// (registrant, outcome, count) triples across all recorded results.
pub async fn count_outcomes_per_registrant(
    pool: &SqlitePool,
) -> sqlx::Result<Vec<(String, MatchOutcome, i64)>> {
    sqlx::query_as::<_, (String, MatchOutcome, i64)>(SQL_COUNT_OUTCOMES_PER_REGISTRANT)
        .fetch_all(pool)
        .await
}
