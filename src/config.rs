//! Runtime configuration for the discovery system.
//!
//! Defaults can be overridden from the environment:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `FOODY_MAILBOX_CAPACITY` | mailbox size of every actor | `32` |
//! | `FOODY_FETCH_TIMEOUT_MS` | places request timeout | `10000` |
//! | `FOODY_FAVORITES_PATH` | JSON file favorites are saved to | in-memory only |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const MAILBOX_CAPACITY_VAR: &str = "FOODY_MAILBOX_CAPACITY";
pub const FETCH_TIMEOUT_VAR: &str = "FOODY_FETCH_TIMEOUT_MS";
pub const FAVORITES_PATH_VAR: &str = "FOODY_FAVORITES_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub mailbox_capacity: usize,
    pub fetch_timeout: Duration,
    /// Where favorites persist. `None` keeps them in memory.
    pub favorites_path: Option<PathBuf>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            fetch_timeout: Duration::from_secs(10),
            favorites_path: None,
        }
    }
}

impl DiscoveryConfig {
    /// Defaults overridden by the `FOODY_*` environment variables.
    /// Values that do not parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(capacity) = parse::<usize>(&lookup, MAILBOX_CAPACITY_VAR).filter(|c| *c > 0) {
            config.mailbox_capacity = capacity;
        }
        if let Some(millis) = parse::<u64>(&lookup, FETCH_TIMEOUT_VAR) {
            config.fetch_timeout = Duration::from_millis(millis);
        }
        config.favorites_path = lookup(FAVORITES_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        config
    }

    pub fn with_favorites_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.favorites_path = Some(path.into());
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring invalid configuration value");
            None
        }
    }
}
