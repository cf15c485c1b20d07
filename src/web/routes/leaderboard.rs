use axum::{extract::State, Json};

use crate::error::ServiceResult;
use crate::services::leaderboard_service::{self, LeaderboardEntry};
use crate::web::state::AppState;

pub async fn leaderboard_handler(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<LeaderboardEntry>>> {
    let board = leaderboard_service::compute_leaderboard(&state.pool).await?;
    Ok(Json(board))
}
