//! Client configuration structures and loaders.
use std::env;

use runtime::RuntimeConfig;

/// Which built-in action provider answers each turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Strategy {
    /// Shoot at a random angle every turn.
    #[default]
    Random,
    /// Send an empty action every turn.
    Idle,
}

/// Configuration required to bootstrap the client.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub strategy: Strategy,
    /// Seed for the random strategy; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
    pub runtime: RuntimeConfig,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TANK_STRATEGY` - `random` or `idle` (default: random)
    /// - `TANK_RNG_SEED` - Seed for the random strategy (default: entropy)
    /// - `TANK_TURN_LIMIT` - Stop after this many turns (default: unlimited)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("TANK_STRATEGY") {
            match raw.trim().parse::<Strategy>() {
                Ok(strategy) => config.strategy = strategy,
                Err(_) => tracing::warn!(value = %raw, "unknown TANK_STRATEGY, using default"),
            }
        }

        config.rng_seed = parse(&lookup, "TANK_RNG_SEED");
        config.runtime.turn_limit = parse(&lookup, "TANK_TURN_LIMIT");

        config
    }
}

fn parse<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
