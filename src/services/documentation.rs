use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the elimination orchestrator.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::scores::send_score,
        crate::routes::public::view_state,
        crate::routes::admin::init_game,
        crate::routes::admin::clear_pool,
        crate::routes::admin::close_joining,
        crate::routes::admin::start_round,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::score::SubmitScoreRequest,
            crate::dto::score::SubmitScoreResponse,
            crate::dto::state::GameStateResponse,
            crate::dto::state::PlayerStateResponse,
            crate::dto::state::VisibleRoundPhase,
            crate::dto::admin::InitGameRequest,
            crate::dto::admin::InitGameResponse,
            crate::dto::admin::TransactionOutcomeResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "players", description = "Score reports and game state for players"),
        (name = "admin", description = "Ledger commands reserved to the game operator"),
    )
)]
pub struct ApiDoc;
