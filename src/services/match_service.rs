use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::database::match_repo;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{MatchOutcome, MatchStatus, RegistrantRow};
use crate::services::locks::KeyedLocks;
use crate::services::pairing;
use crate::services::roster_service;

/// Fallback offset when the organizer does not supply a timestamp.
const DEFAULT_SCHEDULE_OFFSET_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize)]
pub struct PairedRegistrant {
    pub registrant_id: String,
    pub code: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct ScheduledPair {
    pub match_id: String,
    pub players: [PairedRegistrant; 2],
}

/// What a scheduling run produced: the new matches and, for an odd roster,
/// the registrant left without an opponent this round.
#[derive(Debug, Serialize)]
pub struct ScheduleReport {
    pub activity_id: String,
    pub scheduled_at: String,
    pub match_count: usize,
    pub pairs: Vec<ScheduledPair>,
    pub unmatched: Option<PairedRegistrant>,
}

fn registrant_view(row: &RegistrantRow) -> PairedRegistrant {
    PairedRegistrant {
        registrant_id: row.id.clone(),
        code: row.code.clone(),
        full_name: row.full_name.clone(),
    }
}

/// Pair the activity's active voters and replace its schedule.
///
/// The roster is resolved and paired before anything is deleted, so a failed
/// attempt (unknown activity, roster below 2) leaves the previous schedule
/// untouched. The discard and the recreation then run in one transaction
/// under the activity's lock.
pub async fn schedule_activity<R: Rng + ?Sized>(
    pool: &SqlitePool,
    locks: &KeyedLocks,
    activity_id: &str,
    scheduled_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ServiceResult<ScheduleReport> {
    let _guard = locks.acquire(&format!("activity:{activity_id}")).await;

    let roster = roster_service::resolve_roster(pool, activity_id).await?;
    let paired = pairing::pair_roster(roster, rng)?;

    let scheduled_at = scheduled_at
        .unwrap_or_else(|| now + Duration::days(DEFAULT_SCHEDULE_OFFSET_DAYS))
        .to_rfc3339();
    let created_at = now.to_rfc3339();

    let mut tx = pool.begin().await?;

    let discarded = match_repo::delete_for_activity(&mut *tx, activity_id).await?;

    let mut pairs = Vec::with_capacity(paired.pairs.len());
    for (first, second) in &paired.pairs {
        let match_id = Uuid::new_v4().to_string();
        match_repo::insert_match(&mut *tx, &match_id, activity_id, &scheduled_at, &created_at)
            .await?;
        match_repo::insert_participation(&mut *tx, &match_id, &first.id).await?;
        match_repo::insert_participation(&mut *tx, &match_id, &second.id).await?;
        pairs.push(ScheduledPair {
            match_id,
            players: [registrant_view(first), registrant_view(second)],
        });
    }

    tx.commit().await?;

    info!(
        activity_id,
        discarded,
        created = pairs.len(),
        "activity schedule replaced"
    );

    Ok(ScheduleReport {
        activity_id: activity_id.to_string(),
        scheduled_at,
        match_count: pairs.len(),
        pairs,
        unmatched: paired.unmatched.as_ref().map(registrant_view),
    })
}

/// Move an existing match to a new timestamp. Nothing else changes.
pub async fn reschedule_match(
    pool: &SqlitePool,
    match_id: &str,
    scheduled_at: DateTime<Utc>,
) -> ServiceResult<()> {
    let updated = match_repo::update_scheduled_at(pool, match_id, &scheduled_at.to_rfc3339()).await?;
    if updated == 0 {
        return Err(ServiceError::NotFound("match"));
    }
    Ok(())
}

/// Record one participant's outcome and propagate the complement to the
/// opponent in the same transaction. Both writes and the status transition
/// commit together: a match can never be observed with exactly one outcome.
pub async fn record_outcome(
    pool: &SqlitePool,
    locks: &KeyedLocks,
    match_id: &str,
    registrant_id: &str,
    outcome: MatchOutcome,
) -> ServiceResult<MatchStatus> {
    let _guard = locks.acquire(&format!("match:{match_id}")).await;

    // The lock serializes all access to this match, so reading ahead of the
    // write transaction is safe and keeps the transaction write-only.
    let mut conn = pool.acquire().await?;

    if match_repo::find_by_id(&mut *conn, match_id).await?.is_none() {
        return Err(ServiceError::NotFound("match"));
    }

    let participations = match_repo::list_participations(&mut *conn, match_id).await?;
    if participations.len() < 2 {
        return Err(ServiceError::NotFound("match participants"));
    }

    let Some(mine) = participations.iter().find(|p| p.registrant_id == registrant_id) else {
        return Err(ServiceError::NotFound("registrant"));
    };
    let opponent = participations
        .iter()
        .find(|p| p.registrant_id != mine.registrant_id)
        .ok_or(ServiceError::NotFound("match participants"))?;
    drop(conn);

    let mut tx = pool.begin().await?;

    match_repo::update_outcome(&mut *tx, match_id, &mine.registrant_id, outcome).await?;
    match_repo::update_outcome(&mut *tx, match_id, &opponent.registrant_id, outcome.complement())
        .await?;

    // Propagation leaves both outcomes set, so the match completes here.
    match_repo::update_status(&mut *tx, match_id, MatchStatus::Completed).await?;

    tx.commit().await?;

    info!(match_id, registrant_id, ?outcome, "outcome recorded and propagated");

    Ok(MatchStatus::Completed)
}

#[derive(Debug, Serialize)]
pub struct MatchParticipantView {
    pub registrant_id: String,
    pub code: String,
    pub full_name: String,
    pub outcome: Option<MatchOutcome>,
}

#[derive(Debug, Serialize)]
pub struct MatchView {
    pub id: String,
    pub activity_id: String,
    pub scheduled_at: String,
    pub status: MatchStatus,
    pub participants: Vec<MatchParticipantView>,
}

/// Matches with their participants, newest first. Refuses to serve a match
/// whose persisted outcomes are partial or non-complementary.
pub async fn list_matches(
    pool: &SqlitePool,
    activity_id: Option<&str>,
) -> ServiceResult<Vec<MatchView>> {
    let matches = match_repo::list(pool, activity_id).await?;
    let participant_rows = match_repo::list_participant_views(pool, activity_id).await?;

    let mut views = Vec::with_capacity(matches.len());
    for m in matches {
        let participants: Vec<MatchParticipantView> = participant_rows
            .iter()
            .filter(|p| p.match_id == m.id)
            .map(|p| MatchParticipantView {
                registrant_id: p.registrant_id.clone(),
                code: p.code.clone(),
                full_name: p.full_name.clone(),
                outcome: p.outcome,
            })
            .collect();

        verify_outcomes(&m.id, m.status, &participants)?;

        views.push(MatchView {
            id: m.id,
            activity_id: m.activity_id,
            scheduled_at: m.scheduled_at,
            status: m.status,
            participants,
        });
    }

    Ok(views)
}

/// A match with exactly one recorded outcome, or a completed match whose
/// outcomes are missing or not complementary, is corrupt state and must not
/// be served as if it were valid.
fn verify_outcomes(
    match_id: &str,
    status: MatchStatus,
    participants: &[MatchParticipantView],
) -> ServiceResult<()> {
    let outcomes: Vec<MatchOutcome> = participants.iter().filter_map(|p| p.outcome).collect();

    if outcomes.len() == 1 {
        return Err(ServiceError::Consistency(format!(
            "match {match_id} has exactly one recorded outcome"
        )));
    }

    if status == MatchStatus::Completed {
        match outcomes.as_slice() {
            [a, b] if a.is_complementary(*b) => {}
            _ => {
                return Err(ServiceError::Consistency(format!(
                    "completed match {match_id} has non-complementary outcomes"
                )));
            }
        }
    }

    Ok(())
}
