use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::database::{interest_repo, match_repo, registrant_repo};
use crate::error::ServiceResult;
use crate::models::{MatchOutcome, Role};

const POINTS_PER_VOTE: i64 = 10;
const POINTS_PER_WIN: i64 = 50;

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub registrant_id: String,
    pub code: String,
    pub votes: i64,
    pub wins: i64,
    pub losses: i64,
    pub draws: i64,
    pub score: i64,
}

/// Score every participant: `votes * 10 + wins * 50`, ordered by descending
/// score. The sort is stable over registration order; no secondary tie-break
/// is applied. Pure read, computed fresh on every call.
pub async fn compute_leaderboard(pool: &SqlitePool) -> ServiceResult<Vec<LeaderboardEntry>> {
    let participants = registrant_repo::list_by_role(pool, Role::Participant).await?;
    let vote_counts = interest_repo::count_per_registrant(pool).await?;
    let outcome_counts = match_repo::count_outcomes_per_registrant(pool).await?;

    let votes_by_registrant: HashMap<String, i64> = vote_counts.into_iter().collect();

    let mut wins_by_registrant: HashMap<String, i64> = HashMap::new();
    let mut losses_by_registrant: HashMap<String, i64> = HashMap::new();
    let mut draws_by_registrant: HashMap<String, i64> = HashMap::new();
    for (registrant_id, outcome, n) in outcome_counts {
        let bucket = match outcome {
            MatchOutcome::Win => &mut wins_by_registrant,
            MatchOutcome::Loss => &mut losses_by_registrant,
            MatchOutcome::Draw => &mut draws_by_registrant,
        };
        bucket.insert(registrant_id, n);
    }

    let mut entries: Vec<LeaderboardEntry> = participants
        .into_iter()
        .map(|registrant| {
            let votes = votes_by_registrant.get(&registrant.id).copied().unwrap_or(0);
            let wins = wins_by_registrant.get(&registrant.id).copied().unwrap_or(0);
            let losses = losses_by_registrant.get(&registrant.id).copied().unwrap_or(0);
            let draws = draws_by_registrant.get(&registrant.id).copied().unwrap_or(0);
            LeaderboardEntry {
                registrant_id: registrant.id,
                code: registrant.code,
                votes,
                wins,
                losses,
                draws,
                score: votes * POINTS_PER_VOTE + wins * POINTS_PER_WIN,
            }
        })
        .collect();

    // Stable: ties keep registration order.
    entries.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::{seed_activity, seed_registrant, seed_vote, test_pool};
    use crate::database::match_repo;
    use crate::models::MatchOutcome;

    async fn seed_completed_match(pool: &SqlitePool, id: &str, winner: &str, loser: &str) {
        let mut conn = pool.acquire().await.unwrap();
        match_repo::insert_match(&mut *conn, id, "act", "2026-08-10T10:00:00Z", "2026-08-06T00:00:00Z")
            .await
            .unwrap();
        match_repo::insert_participation(&mut *conn, id, winner).await.unwrap();
        match_repo::insert_participation(&mut *conn, id, loser).await.unwrap();
        match_repo::update_outcome(&mut *conn, id, winner, MatchOutcome::Win)
            .await
            .unwrap();
        match_repo::update_outcome(&mut *conn, id, loser, MatchOutcome::Loss)
            .await
            .unwrap();
        match_repo::update_status(&mut *conn, id, crate::models::MatchStatus::Completed)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn score_is_votes_times_ten_plus_wins_times_fifty() {
        let pool = test_pool().await;
        seed_activity(&pool, "act").await;
        for id in ["a2", "a3"] {
            let mut conn = pool.acquire().await.unwrap();
            crate::database::activity_repo::insert(
                &mut *conn,
                id,
                "Volley Ball",
                "OUTDOOR",
                None,
                "2026-08-01T00:00:00Z",
            )
            .await
            .unwrap();
        }
        seed_registrant(&pool, "r1", true).await;
        seed_registrant(&pool, "r2", true).await;

        // r1: 3 votes, 2 wins -> 3*10 + 2*50 = 130
        for act in ["act", "a2", "a3"] {
            seed_vote(&pool, "r1", act).await;
        }
        seed_completed_match(&pool, "m1", "r1", "r2").await;
        seed_completed_match(&pool, "m2", "r1", "r2").await;

        let board = compute_leaderboard(&pool).await.unwrap();
        let r1 = board.iter().find(|e| e.registrant_id == "r1").unwrap();
        assert_eq!(r1.votes, 3);
        assert_eq!(r1.wins, 2);
        assert_eq!(r1.losses, 0);
        assert_eq!(r1.score, 130);

        let r2 = board.iter().find(|e| e.registrant_id == "r2").unwrap();
        assert_eq!(r2.losses, 2);
        assert_eq!(r2.score, 0);
    }

    #[tokio::test]
    async fn ordering_is_non_increasing_in_score() {
        let pool = test_pool().await;
        seed_activity(&pool, "act").await;
        for id in ["r1", "r2", "r3", "r4"] {
            seed_registrant(&pool, id, true).await;
        }
        seed_vote(&pool, "r3", "act").await;
        seed_completed_match(&pool, "m1", "r2", "r4").await;

        let board = compute_leaderboard(&pool).await.unwrap();
        assert_eq!(board.len(), 4);
        for pair in board.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // r2: 50 (one win), r3: 10 (one vote)
        assert_eq!(board[0].registrant_id, "r2");
        assert_eq!(board[1].registrant_id, "r3");
    }

    #[tokio::test]
    async fn ties_keep_registration_order() {
        let pool = test_pool().await;
        seed_registrant(&pool, "first", true).await;
        seed_registrant(&pool, "second", true).await;
        seed_registrant(&pool, "third", true).await;

        let board = compute_leaderboard(&pool).await.unwrap();
        let ids: Vec<&str> = board.iter().map(|e| e.registrant_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn organizers_are_not_ranked() {
        let pool = test_pool().await;
        seed_registrant(&pool, "r1", true).await;
        let mut conn = pool.acquire().await.unwrap();
        crate::database::registrant_repo::insert(
            &mut *conn,
            crate::database::registrant_repo::NewRegistrant {
                id: "org",
                code: "ADMIN2026",
                full_name: "Organizer",
                role: Role::Organizer,
                active: true,
                created_at: "2026-08-01T00:00:00Z",
            },
        )
        .await
        .unwrap();
        drop(conn);

        let board = compute_leaderboard(&pool).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].registrant_id, "r1");
    }
}
