use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::database::{activity_repo, interest_repo, registrant_repo};
use crate::error::{ServiceError, ServiceResult};

/// Replace the registrant's interests with a new selection: delete-all,
/// insert-new, in one transaction. Unknown activity ids are rejected before
/// anything is deleted; duplicates in the input collapse to one vote.
pub async fn replace_votes(
    pool: &SqlitePool,
    registrant_id: &str,
    activity_ids: &[String],
    now: DateTime<Utc>,
) -> ServiceResult<usize> {
    if registrant_repo::find_by_id(pool, registrant_id).await?.is_none() {
        return Err(ServiceError::NotFound("registrant"));
    }

    let known: HashSet<String> = activity_repo::list_all(pool)
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect();

    let mut selection: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    for id in activity_ids {
        let id = id.trim();
        if id.is_empty() {
            return Err(ServiceError::Validation("empty activity id".to_string()));
        }
        if !known.contains(id) {
            return Err(ServiceError::NotFound("activity"));
        }
        if seen.insert(id) {
            selection.push(id);
        }
    }

    let created_at = now.to_rfc3339();
    let mut tx = pool.begin().await?;
    interest_repo::delete_for_registrant(&mut *tx, registrant_id).await?;
    for activity_id in &selection {
        interest_repo::insert(&mut *tx, registrant_id, activity_id, &created_at).await?;
    }
    tx.commit().await?;

    Ok(selection.len())
}

#[derive(Debug, Serialize)]
pub struct ActivityVotesView {
    pub activity_id: String,
    pub name: String,
    pub category: String,
    pub icon: Option<String>,
    pub voters: Vec<String>,
}

/// All votes grouped per activity, voters identified by code.
pub async fn list_votes_by_activity(pool: &SqlitePool) -> ServiceResult<Vec<ActivityVotesView>> {
    let rows = interest_repo::list_with_context(pool).await?;

    let mut views: Vec<ActivityVotesView> = Vec::new();
    for row in rows {
        match views.last_mut() {
            Some(view) if view.activity_id == row.activity_id => {
                view.voters.push(row.registrant_code);
            }
            _ => views.push(ActivityVotesView {
                activity_id: row.activity_id,
                name: row.activity_name,
                category: row.category,
                icon: row.icon,
                voters: vec![row.registrant_code],
            }),
        }
    }

    Ok(views)
}
