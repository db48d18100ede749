//! Library crate for the elimination orchestrator, exposing modules for binaries and tests.

pub mod config;
mod dto;
mod error;
pub mod ledger;
pub mod orchestrator;
pub mod routes;
pub mod services;
pub mod state;
