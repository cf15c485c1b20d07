use sqlx::SqlitePool;

use crate::database::{activity_repo, registrant_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::models::RegistrantRow;

/// Active registrants who voted for the activity. Read-only; NotFound when
/// the activity id does not exist.
pub async fn resolve_roster(
    pool: &SqlitePool,
    activity_id: &str,
) -> ServiceResult<Vec<RegistrantRow>> {
    if activity_repo::find_by_id(pool, activity_id).await?.is_none() {
        return Err(ServiceError::NotFound("activity"));
    }

    let roster = registrant_repo::list_active_voters(pool, activity_id).await?;
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::{seed_activity, seed_registrant, seed_vote, test_pool};

    #[tokio::test]
    async fn unknown_activity_is_not_found() {
        let pool = test_pool().await;
        let err = resolve_roster(&pool, "missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("activity")));
    }

    #[tokio::test]
    async fn roster_contains_only_active_voters() {
        let pool = test_pool().await;
        seed_activity(&pool, "act").await;
        seed_registrant(&pool, "r1", true).await;
        seed_registrant(&pool, "r2", false).await;
        seed_registrant(&pool, "r3", true).await;
        seed_vote(&pool, "r1", "act").await;
        seed_vote(&pool, "r2", "act").await;

        let roster = resolve_roster(&pool, "act").await.unwrap();
        let ids: Vec<&str> = roster.iter().map(|r| r.id.as_str()).collect();
        // r2 is inactive, r3 never voted
        assert_eq!(ids, vec!["r1"]);
    }
}
