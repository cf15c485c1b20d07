use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::database::{activity_repo, registrant_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::services::match_service::{self, MatchView, ScheduleReport};
use crate::web::middleware::auth::AuthenticatedRegistrant;
use crate::web::state::AppState;

#[derive(Serialize)]
pub struct ActivityListItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon: Option<String>,
    pub votes_count: i64,
    pub matches_count: i64,
}

pub async fn list_activities_handler(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<ActivityListItem>>> {
    let rows = activity_repo::list_with_counts(&state.pool).await?;
    let items = rows
        .into_iter()
        .map(|row| ActivityListItem {
            id: row.id,
            name: row.name,
            category: row.category,
            icon: row.icon,
            votes_count: row.votes_count,
            matches_count: row.matches_count,
        })
        .collect();
    Ok(Json(items))
}

#[derive(Clone, Serialize)]
pub struct ParticipantItem {
    pub registrant_id: String,
    pub code: String,
    pub full_name: String,
    pub active: bool,
}

#[derive(Serialize)]
pub struct ActivityParticipantsResponse {
    pub activity_id: String,
    pub name: String,
    pub participants: Vec<ParticipantItem>,
    pub active_participants: Vec<ParticipantItem>,
    pub existing_matches: Vec<MatchView>,
    pub can_schedule: bool,
}

/// Everyone who voted for the activity, the subset eligible for pairing, and
/// the matches currently on the books.
pub async fn participants_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> ServiceResult<Json<ActivityParticipantsResponse>> {
    let Some(activity) = activity_repo::find_by_id(&state.pool, &activity_id).await? else {
        return Err(ServiceError::NotFound("activity"));
    };

    let voters = registrant_repo::list_voters(&state.pool, &activity_id).await?;
    let participants: Vec<ParticipantItem> = voters
        .iter()
        .map(|r| ParticipantItem {
            registrant_id: r.id.clone(),
            code: r.code.clone(),
            full_name: r.full_name.clone(),
            active: r.active,
        })
        .collect();
    let active_participants: Vec<ParticipantItem> =
        participants.iter().filter(|p| p.active).cloned().collect();

    let existing_matches = match_service::list_matches(&state.pool, Some(&activity_id)).await?;
    let can_schedule = active_participants.len() >= 2;

    Ok(Json(ActivityParticipantsResponse {
        activity_id: activity.id,
        name: activity.name,
        participants,
        active_participants,
        existing_matches,
        can_schedule,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Organizer action: pair the active voters and replace the activity's
/// schedule. The clock and the RNG are built here, at the edge; the service
/// below is deterministic given both.
pub async fn schedule_activity_handler(
    Extension(auth): Extension<AuthenticatedRegistrant>,
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
    Json(request): Json<ScheduleRequest>,
) -> ServiceResult<Json<ScheduleReport>> {
    if !auth.is_organizer() {
        return Err(ServiceError::Forbidden);
    }

    let mut rng = StdRng::from_entropy();
    let report = match_service::schedule_activity(
        &state.pool,
        &state.locks,
        &activity_id,
        request.scheduled_at,
        Utc::now(),
        &mut rng,
    )
    .await?;

    Ok(Json(report))
}
