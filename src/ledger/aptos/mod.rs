mod client;
mod config;
mod models;

pub use client::AptosLedgerClient;
pub use config::AptosConfig;
