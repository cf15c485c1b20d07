use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::database::{interest_repo, match_repo, registrant_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{MatchOutcome, Role};

#[derive(Debug, Serialize)]
pub struct RegistrantStatsView {
    pub registrant_id: String,
    pub code: String,
    pub full_name: String,
    pub active: bool,
    pub votes: i64,
    pub wins: i64,
    pub losses: i64,
    pub draws: i64,
    pub total_matches: i64,
}

/// Participants with their vote and result statistics, in registration order.
pub async fn list_with_stats(pool: &SqlitePool) -> ServiceResult<Vec<RegistrantStatsView>> {
    let participants = registrant_repo::list_by_role(pool, Role::Participant).await?;
    let vote_counts: HashMap<String, i64> = interest_repo::count_per_registrant(pool)
        .await?
        .into_iter()
        .collect();
    let outcome_counts = match_repo::count_outcomes_per_registrant(pool).await?;

    let mut results: HashMap<String, (i64, i64, i64)> = HashMap::new();
    for (registrant_id, outcome, n) in outcome_counts {
        let entry = results.entry(registrant_id).or_default();
        match outcome {
            MatchOutcome::Win => entry.0 = n,
            MatchOutcome::Loss => entry.1 = n,
            MatchOutcome::Draw => entry.2 = n,
        }
    }

    let views = participants
        .into_iter()
        .map(|registrant| {
            let votes = vote_counts.get(&registrant.id).copied().unwrap_or(0);
            let (wins, losses, draws) = results.get(&registrant.id).copied().unwrap_or((0, 0, 0));
            RegistrantStatsView {
                registrant_id: registrant.id,
                code: registrant.code,
                full_name: registrant.full_name,
                active: registrant.active,
                votes,
                wins,
                losses,
                draws,
                total_matches: wins + losses + draws,
            }
        })
        .collect();

    Ok(views)
}

/// Administrator mutation: rename a registrant and/or flip the active flag.
/// Inactive registrants drop out of future pairings but keep their history.
pub async fn update_profile(
    pool: &SqlitePool,
    registrant_id: &str,
    full_name: Option<&str>,
    active: Option<bool>,
) -> ServiceResult<()> {
    if let Some(name) = full_name {
        if name.trim().is_empty() {
            return Err(ServiceError::Validation("full_name must not be empty".to_string()));
        }
    }

    let updated = registrant_repo::update_profile(pool, registrant_id, full_name, active).await?;
    if updated == 0 {
        return Err(ServiceError::NotFound("registrant"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::{seed_activity, seed_registrant, seed_vote, test_pool};

    #[tokio::test]
    async fn stats_reflect_votes_and_results() {
        let pool = test_pool().await;
        seed_activity(&pool, "act").await;
        seed_registrant(&pool, "r1", true).await;
        seed_registrant(&pool, "r2", true).await;
        seed_vote(&pool, "r1", "act").await;

        let mut conn = pool.acquire().await.unwrap();
        match_repo::insert_match(&mut *conn, "m1", "act", "2026-08-10T10:00:00Z", "2026-08-06T00:00:00Z")
            .await
            .unwrap();
        match_repo::insert_participation(&mut *conn, "m1", "r1").await.unwrap();
        match_repo::insert_participation(&mut *conn, "m1", "r2").await.unwrap();
        match_repo::update_outcome(&mut *conn, "m1", "r1", MatchOutcome::Win)
            .await
            .unwrap();
        match_repo::update_outcome(&mut *conn, "m1", "r2", MatchOutcome::Loss)
            .await
            .unwrap();
        drop(conn);

        let stats = list_with_stats(&pool).await.unwrap();
        let r1 = stats.iter().find(|s| s.registrant_id == "r1").unwrap();
        assert_eq!((r1.votes, r1.wins, r1.total_matches), (1, 1, 1));
        let r2 = stats.iter().find(|s| s.registrant_id == "r2").unwrap();
        assert_eq!((r2.votes, r2.losses, r2.total_matches), (0, 1, 1));
    }

    #[tokio::test]
    async fn deactivation_keeps_history() {
        let pool = test_pool().await;
        seed_registrant(&pool, "r1", true).await;

        update_profile(&pool, "r1", None, Some(false)).await.unwrap();

        let stats = list_with_stats(&pool).await.unwrap();
        assert_eq!(stats.len(), 1);
        assert!(!stats[0].active);
    }

    #[tokio::test]
    async fn updating_unknown_registrant_is_not_found() {
        let pool = test_pool().await;
        let err = update_profile(&pool, "ghost", Some("Name"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("registrant")));
    }
}
