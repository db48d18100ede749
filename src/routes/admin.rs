use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::post,
};
use axum_valid::Valid;
use tracing::warn;

use crate::{
    dto::admin::{InitGameRequest, InitGameResponse, TransactionOutcomeResponse},
    error::AppError,
    services::admin_service,
    state::SharedState,
};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Operator endpoints issuing ledger commands outside the round loop.
pub fn router(state: SharedState) -> Router<SharedState> {
    if is_unauthenticated(&state) {
        warn!("ADMIN_API_TOKEN is not set; admin routes accept unauthenticated requests");
    }

    Router::new()
        .route("/admin/game/init", post(init_game))
        .route("/admin/pool/clear", post(clear_pool))
        .route("/admin/joining/close", post(close_joining))
        .route("/admin/round/start", post(start_round))
        .route_layer(middleware::from_fn_with_state(state, require_admin_token))
}

/// Clear the pool and create a new game, using the configured defaults for omitted fields.
#[utoipa::path(
    post,
    path = "/admin/game/init",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Required when ADMIN_API_TOKEN is set")),
    request_body = InitGameRequest,
    responses(
        (status = 200, description = "Outcome of both transactions", body = InitGameResponse),
        (status = 400, description = "Invalid game parameters")
    )
)]
pub async fn init_game(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<InitGameRequest>>,
) -> Json<InitGameResponse> {
    Json(admin_service::init_game(&state, payload).await)
}

/// Force the pool back to its owner and reset the game.
#[utoipa::path(
    post,
    path = "/admin/pool/clear",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Required when ADMIN_API_TOKEN is set")),
    responses((status = 200, description = "Transaction outcome", body = TransactionOutcomeResponse))
)]
pub async fn clear_pool(State(state): State<SharedState>) -> Json<TransactionOutcomeResponse> {
    Json(admin_service::force_clear_pool(&state).await)
}

/// Close the joining phase so rounds can start.
#[utoipa::path(
    post,
    path = "/admin/joining/close",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Required when ADMIN_API_TOKEN is set")),
    responses((status = 200, description = "Transaction outcome", body = TransactionOutcomeResponse))
)]
pub async fn close_joining(State(state): State<SharedState>) -> Json<TransactionOutcomeResponse> {
    Json(admin_service::close_joining(&state).await)
}

/// Open the first round and restart the round timer.
#[utoipa::path(
    post,
    path = "/admin/round/start",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Required when ADMIN_API_TOKEN is set")),
    responses((status = 200, description = "Transaction outcome", body = TransactionOutcomeResponse))
)]
pub async fn start_round(State(state): State<SharedState>) -> Json<TransactionOutcomeResponse> {
    Json(admin_service::start_round(&state).await)
}

fn is_unauthenticated(state: &SharedState) -> bool {
    state.config().admin_token.is_none()
}

/// Reject admin calls lacking the configured token. Routes are open when no token is set.
async fn require_admin_token(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config().admin_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("missing admin token header `X-Admin-Token`".into())
        })?;

    if provided == expected {
        Ok(next.run(req).await)
    } else {
        Err(AppError::Unauthorized("invalid admin token".into()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        orchestrator::{clock::manual::ManualClock, testing::FakeLedger},
        state::AppState,
    };

    fn state_with_token(admin_token: Option<&str>) -> SharedState {
        let config = AppConfig {
            admin_token: admin_token.map(str::to_string),
            ..AppConfig::default()
        };
        AppState::new(
            config,
            Arc::new(FakeLedger::new()),
            Arc::new(ManualClock::new()),
        )
    }

    #[test]
    fn missing_token_is_flagged_as_unauthenticated() {
        assert!(is_unauthenticated(&state_with_token(None)));
        assert!(!is_unauthenticated(&state_with_token(Some("s3cret"))));
    }
}
