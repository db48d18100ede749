//! Business logic behind the admin REST routes. Every command goes through the shared
//! dispatcher so it never overlaps with a transition issued by the round loop.

use tracing::{info, warn};

use crate::{
    dto::admin::{InitGameRequest, InitGameResponse, TransactionOutcomeResponse},
    ledger::RoundTransitionCommand,
    state::SharedState,
};

/// Clear any previous pool, then create a new game from the request merged with the
/// configured defaults. The game is only created once the pool was cleared.
pub async fn init_game(state: &SharedState, request: InitGameRequest) -> InitGameResponse {
    let config = request.resolve(state.config().game_defaults);

    let clear_pool = state
        .dispatcher()
        .submit(RoundTransitionCommand::ForceClearPool)
        .await;
    if !clear_pool.is_success() {
        warn!("pool could not be cleared; game not initialised");
        return InitGameResponse {
            clear_pool: clear_pool.into(),
            init_game: None,
        };
    }

    let init_game = state
        .dispatcher()
        .submit(RoundTransitionCommand::StartGame(config))
        .await;
    if init_game.is_success() {
        state.scores().lock().await.clear();
        info!(
            seconds_between_rounds = config.seconds_between_rounds,
            buy_amount = config.buy_amount,
            max_players = config.max_players,
            num_max_winners = config.num_max_winners,
            "game initialised"
        );
    }

    InitGameResponse {
        clear_pool: clear_pool.into(),
        init_game: Some(init_game.into()),
    }
}

/// Return the pool to its owner and reset the game on the ledger.
pub async fn force_clear_pool(state: &SharedState) -> TransactionOutcomeResponse {
    state
        .dispatcher()
        .submit(RoundTransitionCommand::ForceClearPool)
        .await
        .into()
}

/// Stop accepting new players.
pub async fn close_joining(state: &SharedState) -> TransactionOutcomeResponse {
    state
        .dispatcher()
        .submit(RoundTransitionCommand::CloseJoining)
        .await
        .into()
}

/// Open the first round: advance with no winners and no losers and restart the round timer.
///
/// The timer restarts whatever the outcome so a failing ledger is not retried on every tick.
pub async fn start_round(state: &SharedState) -> TransactionOutcomeResponse {
    let outcome = state
        .dispatcher()
        .submit(RoundTransitionCommand::AdvanceRound {
            losers: Vec::new(),
            winners: Vec::new(),
        })
        .await;
    let now = state.clock().now();
    state.reset_round_timer(now).await;
    info!(success = outcome.is_success(), "round started by admin");
    outcome.into()
}
