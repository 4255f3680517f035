use std::time::Duration;

use super::{optional_var, parsed_var};
use crate::error::AppError;
use crate::store::sheets::SpreadsheetTarget;
use crate::store::RetryPolicy;

pub const DEFAULT_SPREADSHEET_NAME: &str = "tabetabe-panel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sheets,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sheets" => Ok(Self::Sheets),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

#[derive(Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Service-account JSON blob; required for the sheets backend.
    pub credentials: Option<String>,
    pub target: SpreadsheetTarget,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("backend", &self.backend)
            .field("credentials", &self.credentials.as_ref().map(|_| "<redacted>"))
            .field("target", &self.target)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let backend = match optional_var("STORE_BACKEND") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::config(format!("STORE_BACKEND: {e}")))?,
            None => StoreBackend::Sheets,
        };

        let target = match optional_var("SPREADSHEET_ID") {
            Some(id) => SpreadsheetTarget::Id(id),
            None => SpreadsheetTarget::Name(
                optional_var("SPREADSHEET_NAME")
                    .unwrap_or_else(|| DEFAULT_SPREADSHEET_NAME.to_string()),
            ),
        };

        let defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            max_attempts: parsed_var("STORE_RETRY_MAX_ATTEMPTS", defaults.max_attempts)?.max(1),
            initial_delay: Duration::from_millis(parsed_var(
                "STORE_RETRY_INITIAL_MS",
                defaults.initial_delay.as_millis() as u64,
            )?),
            max_delay: Duration::from_millis(parsed_var(
                "STORE_RETRY_MAX_MS",
                defaults.max_delay.as_millis() as u64,
            )?),
            jitter: defaults.jitter,
        };

        Ok(Self {
            backend,
            credentials: optional_var("GOOGLE_CREDENTIALS"),
            target,
            timeout: Duration::from_secs(parsed_var("STORE_TIMEOUT_SECS", 15u64)?),
            retry,
        })
    }
}
