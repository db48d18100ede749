use axum::{Json, Router, extract::State, routing::post};
use axum_valid::Valid;

use crate::{
    dto::score::{SubmitScoreRequest, SubmitScoreResponse},
    error::AppError,
    services::score_service,
    state::SharedState,
};

/// Score reporting endpoint used by game clients.
pub fn router() -> Router<SharedState> {
    Router::new().route("/send_score", post(send_score))
}

#[utoipa::path(
    post,
    path = "/send_score",
    tag = "players",
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Score processed", body = SubmitScoreResponse),
        (status = 400, description = "Malformed address or score")
    )
)]
/// Report a player's score for the running round. Only the first report per player counts.
pub async fn send_score(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SubmitScoreRequest>>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    let response = score_service::submit_score(&state, payload).await?;
    Ok(Json(response))
}
