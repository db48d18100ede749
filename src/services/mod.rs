/// Ledger commands issued on behalf of the game operator.
pub mod admin_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Public service for read-only game information.
pub mod public_service;
/// Score reports for the running round.
pub mod score_service;
