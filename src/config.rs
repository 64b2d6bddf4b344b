//! Balancer and server configuration (defaults, request overrides, environment).

use crate::logic::BalanceStrategy;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_TEAM_SIZE: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(n) => n,
    None => panic!("team size must be non-zero"),
};

pub const DEFAULT_GROUP_COUNT: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(n) => n,
    None => panic!("group count must be non-zero"),
};

fn default_team_size() -> NonZeroUsize {
    DEFAULT_TEAM_SIZE
}

fn default_group_count() -> NonZeroUsize {
    DEFAULT_GROUP_COUNT
}

/// Options of one balancing run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BalancerConfig {
    #[serde(default = "default_team_size")]
    pub team_size: NonZeroUsize,
    #[serde(default = "default_group_count")]
    pub group_count: NonZeroUsize,
    #[serde(default)]
    pub strategy: BalanceStrategy,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            group_count: DEFAULT_GROUP_COUNT,
            strategy: BalanceStrategy::default(),
        }
    }
}

/// Per-request overrides; unset fields keep the server defaults.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct BalanceOverrides {
    pub team_size: Option<NonZeroUsize>,
    pub group_count: Option<NonZeroUsize>,
    pub strategy: Option<BalanceStrategy>,
}

impl BalancerConfig {
    pub fn with_overrides(self, overrides: &BalanceOverrides) -> Self {
        Self {
            team_size: overrides.team_size.unwrap_or(self.team_size),
            group_count: overrides.group_count.unwrap_or(self.group_count),
            strategy: overrides.strategy.unwrap_or(self.strategy),
        }
    }
}

/// Web binary settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub balancer: BalancerConfig,
    /// Roster CSV imported at startup, if set.
    pub roster_csv: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            balancer: BalancerConfig::default(),
            roster_csv: None,
        }
    }
}

impl ServerConfig {
    /// Read HOST, PORT, TEAM_SIZE, GROUP_COUNT and ROSTER_CSV from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    /// Unparseable values are logged and replaced by their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", &lookup, defaults.port),
            balancer: BalancerConfig {
                team_size: parse_or("TEAM_SIZE", &lookup, defaults.balancer.team_size),
                group_count: parse_or("GROUP_COUNT", &lookup, defaults.balancer.group_count),
                strategy: defaults.balancer.strategy,
            },
            roster_csv: lookup("ROSTER_CSV")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
    }
}
