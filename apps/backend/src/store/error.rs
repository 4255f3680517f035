use thiserror::Error;

/// Failures surfaced by a [`SheetStore`](super::SheetStore) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("worksheet not found: {0}")]
    WorksheetNotFound(String),
    #[error("spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),
    #[error("store authentication failed: {0}")]
    Auth(String),
    #[error("store connection failed: {0}")]
    Connect(String),
    #[error("store request timed out: {0}")]
    Timeout(String),
    #[error("store throttled the request: {0}")]
    Throttled(String),
    #[error("store upstream error (HTTP {status}): {detail}")]
    Upstream { status: u16, detail: String },
    #[error("store rejected the request: {0}")]
    Rejected(String),
    #[error("malformed store response: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Whether repeating the same call could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Connect(_) | Self::Timeout(_) | Self::Throttled(_) | Self::Upstream { .. }
        )
    }

    /// Whether the failed call is known not to have been applied, so even a
    /// non-idempotent write (an append) can be repeated.
    pub fn is_safe_to_repeat_write(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Throttled(_))
    }

    pub fn is_worksheet_not_found(&self) -> bool {
        matches!(self, Self::WorksheetNotFound(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_decode() {
            Self::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Upstream {
                status: status.as_u16(),
                detail: e.to_string(),
            }
        } else if e.is_builder() {
            Self::Rejected(e.to_string())
        } else {
            Self::Connect(e.to_string())
        }
    }
}
