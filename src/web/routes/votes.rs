use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ServiceError, ServiceResult};
use crate::services::vote_service::{self, ActivityVotesView};
use crate::web::middleware::auth::AuthenticatedRegistrant;
use crate::web::state::AppState;

pub async fn list_votes_handler(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<ActivityVotesView>>> {
    let votes = vote_service::list_votes_by_activity(&state.pool).await?;
    Ok(Json(votes))
}

#[derive(Debug, Deserialize)]
pub struct UpdateVotesRequest {
    pub activity_ids: Vec<String>,
}

/// A participant replaces their whole selection in one call.
pub async fn update_votes_handler(
    Extension(auth): Extension<AuthenticatedRegistrant>,
    State(state): State<AppState>,
    Json(request): Json<UpdateVotesRequest>,
) -> ServiceResult<Json<Value>> {
    if auth.is_organizer() {
        return Err(ServiceError::Forbidden);
    }

    let count =
        vote_service::replace_votes(&state.pool, &auth.id, &request.activity_ids, Utc::now())
            .await?;

    Ok(Json(json!({ "registrant_id": auth.id, "votes": count })))
}
