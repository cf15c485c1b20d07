use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ServiceError, ServiceResult};
use crate::services::registrant_service::{self, RegistrantStatsView};
use crate::web::middleware::auth::AuthenticatedRegistrant;
use crate::web::state::AppState;

pub async fn list_registrants_handler(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<RegistrantStatsView>>> {
    let registrants = registrant_service::list_with_stats(&state.pool).await?;
    Ok(Json(registrants))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRegistrantRequest {
    pub full_name: Option<String>,
    pub active: Option<bool>,
}

pub async fn update_registrant_handler(
    Extension(auth): Extension<AuthenticatedRegistrant>,
    State(state): State<AppState>,
    Path(registrant_id): Path<String>,
    Json(request): Json<UpdateRegistrantRequest>,
) -> ServiceResult<Json<Value>> {
    if !auth.is_organizer() {
        return Err(ServiceError::Forbidden);
    }

    registrant_service::update_profile(
        &state.pool,
        &registrant_id,
        request.full_name.as_deref(),
        request.active,
    )
    .await?;

    Ok(Json(json!({ "registrant_id": registrant_id })))
}
