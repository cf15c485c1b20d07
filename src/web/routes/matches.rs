use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ServiceError, ServiceResult};
use crate::models::MatchOutcome;
use crate::services::match_service::{self, MatchView};
use crate::web::middleware::auth::AuthenticatedRegistrant;
use crate::web::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct MatchesQuery {
    pub activity_id: Option<String>,
}

pub async fn list_matches_handler(
    State(state): State<AppState>,
    Query(query): Query<MatchesQuery>,
) -> ServiceResult<Json<Vec<MatchView>>> {
    let matches = match_service::list_matches(&state.pool, query.activity_id.as_deref()).await?;
    Ok(Json(matches))
}

#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub scheduled_at: DateTime<Utc>,
}

pub async fn reschedule_match_handler(
    Extension(auth): Extension<AuthenticatedRegistrant>,
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<RescheduleRequest>,
) -> ServiceResult<Json<Value>> {
    if !auth.is_organizer() {
        return Err(ServiceError::Forbidden);
    }

    match_service::reschedule_match(&state.pool, &match_id, request.scheduled_at).await?;

    Ok(Json(json!({
        "match_id": match_id,
        "scheduled_at": request.scheduled_at.to_rfc3339(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct RecordOutcomeRequest {
    pub registrant_id: String,
    pub outcome: MatchOutcome,
}

pub async fn record_outcome_handler(
    Extension(auth): Extension<AuthenticatedRegistrant>,
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<RecordOutcomeRequest>,
) -> ServiceResult<Json<Value>> {
    if !auth.is_organizer() {
        return Err(ServiceError::Forbidden);
    }

    let status = match_service::record_outcome(
        &state.pool,
        &state.locks,
        &match_id,
        &request.registrant_id,
        request.outcome,
    )
    .await?;

    Ok(Json(json!({
        "match_id": match_id,
        "status": status,
    })))
}
