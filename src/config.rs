//! Application-level configuration loading: loop timing, HTTP port and game defaults.

use std::{env, fs, io::ErrorKind, path::PathBuf, str::FromStr, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::game::GameConfig;

/// Default location on disk where the server looks for the JSON game defaults.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "ORCHESTRATOR_CONFIG_PATH";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_LEDGER_TIMEOUT: Duration = Duration::from_secs(10);

/// Game parameters used by `init_game` when the admin does not supply any.
const DEFAULT_GAME: GameConfig = GameConfig {
    seconds_between_rounds: 30,
    buy_amount: 100,
    max_players: 10,
    num_max_winners: 1,
};

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// HTTP listening port.
    pub port: u16,
    /// Interval after which the cached snapshot is refreshed.
    pub poll_interval: Duration,
    /// Interval between two scheduler iterations.
    pub tick_interval: Duration,
    /// Upper bound on any single ledger call.
    pub ledger_timeout: Duration,
    /// Token expected in the `X-Admin-Token` header; admin routes are open when unset.
    pub admin_token: Option<String>,
    /// Parameters used when initialising a game.
    pub game_defaults: GameConfig,
}

impl AppConfig {
    /// Load the configuration from the process environment and the optional JSON file.
    pub fn load() -> Self {
        let file_defaults = load_game_defaults();
        Self::from_source(|key| env::var(key).ok(), file_defaults)
    }

    /// Assemble the configuration from `lookup`, starting from `game_defaults`.
    ///
    /// Unparseable values are logged and replaced by their default.
    pub fn from_source<F>(lookup: F, game_defaults: GameConfig) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .or_else(|| lookup("SERVER_PORT"))
            .and_then(|value| parse_or_warn("PORT", &value))
            .unwrap_or(DEFAULT_PORT);

        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|value| parse_or_warn::<u64>(key, &value))
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(default)
        };
        let number = |key: &str, default: u64| {
            lookup(key)
                .and_then(|value| parse_or_warn::<u64>(key, &value))
                .unwrap_or(default)
        };

        let game_defaults = GameConfig {
            seconds_between_rounds: number(
                "SECOND_BTW_ROUNDS",
                game_defaults.seconds_between_rounds,
            ),
            buy_amount: number("BUY_AMOUNT", game_defaults.buy_amount),
            max_players: number("MAX_PLAYER", game_defaults.max_players),
            num_max_winners: number("MAX_WINNER", game_defaults.num_max_winners),
        };

        Self {
            port,
            poll_interval: millis("POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL),
            tick_interval: millis("TICK_INTERVAL_MS", DEFAULT_TICK_INTERVAL),
            ledger_timeout: millis("LEDGER_TIMEOUT_MS", DEFAULT_LEDGER_TIMEOUT),
            admin_token: lookup("ADMIN_API_TOKEN").filter(|token| !token.is_empty()),
            game_defaults,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_source(|_| None, DEFAULT_GAME)
    }
}

fn parse_or_warn<T: FromStr>(key: &str, value: &str) -> Option<T> {
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value, "ignoring unparseable configuration value");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    game: RawGameDefaults,
}

#[derive(Debug, Deserialize)]
struct RawGameDefaults {
    seconds_between_rounds: u64,
    buy_amount: u64,
    max_players: u64,
    num_max_winners: u64,
}

impl From<RawGameDefaults> for GameConfig {
    fn from(value: RawGameDefaults) -> Self {
        Self {
            seconds_between_rounds: value.seconds_between_rounds,
            buy_amount: value.buy_amount,
            max_players: value.max_players,
            num_max_winners: value.num_max_winners,
        }
    }
}

/// Read game defaults from disk, falling back to the built-in values.
fn load_game_defaults() -> GameConfig {
    let path = resolve_config_path();
    match fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
            Ok(raw) => {
                info!(path = %path.display(), "loaded game defaults from config");
                raw.game.into()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config; falling back to defaults"
                );
                DEFAULT_GAME
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                path = %path.display(),
                "config file not found; using built-in defaults"
            );
            DEFAULT_GAME
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read config; falling back to defaults"
            );
            DEFAULT_GAME
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_source(|key| vars.get(key).cloned(), DEFAULT_GAME)
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.ledger_timeout, Duration::from_secs(10));
        assert!(config.admin_token.is_none());
        assert_eq!(config.game_defaults, DEFAULT_GAME);
    }

    #[test]
    fn environment_overrides_game_defaults() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("POLL_INTERVAL_MS", "250"),
            ("SECOND_BTW_ROUNDS", "45"),
            ("BUY_AMOUNT", "5000"),
            ("MAX_PLAYER", "16"),
            ("MAX_WINNER", "2"),
            ("ADMIN_API_TOKEN", "s3cret"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(
            config.game_defaults,
            GameConfig {
                seconds_between_rounds: 45,
                buy_amount: 5000,
                max_players: 16,
                num_max_winners: 2,
            }
        );
        assert_eq!(config.admin_token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "eighty"),
            ("POLL_INTERVAL_MS", "0"),
            ("MAX_WINNER", "-1"),
            ("ADMIN_API_TOKEN", ""),
        ]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.game_defaults.num_max_winners, 1);
        assert!(config.admin_token.is_none());
    }

    #[test]
    fn config_file_shape() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"game":{"seconds_between_rounds":60,"buy_amount":1,"max_players":4,"num_max_winners":1}}"#,
        )
        .unwrap();
        let game: GameConfig = raw.game.into();
        assert_eq!(game.seconds_between_rounds, 60);
        assert_eq!(game.max_players, 4);
    }
}
