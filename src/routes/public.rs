use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::state::GameStateResponse, error::AppError, services::public_service, state::SharedState,
};

/// Public read-only endpoint exposing the cached ledger state.
pub fn router() -> Router<SharedState> {
    Router::new().route("/view_state", get(view_state))
}

#[utoipa::path(
    get,
    path = "/view_state",
    tag = "players",
    responses(
        (status = 200, description = "Last fetched game state", body = GameStateResponse),
        (status = 503, description = "Game state not fetched yet")
    )
)]
/// Return the game state as last read from the ledger; it may lag by one poll interval.
pub async fn view_state(
    State(state): State<SharedState>,
) -> Result<Json<GameStateResponse>, AppError> {
    let payload = public_service::view_state(&state).await?;
    Ok(Json(payload))
}
