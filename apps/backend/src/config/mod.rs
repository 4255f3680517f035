//! Process configuration read from the environment.

pub mod game;
pub mod server;
pub mod store;

pub use game::GameConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};

use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Read an optional variable, treating blank values as unset.
pub(crate) fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional variable, falling back to `default` when unset.
pub(crate) fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match optional_var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        None => Ok(default),
    }
}

/// Split a comma-separated variable into trimmed, non-empty items.
pub(crate) fn list_var(name: &str) -> Option<Vec<String>> {
    optional_var(name).map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
}
