//! Error codes for the panel game API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in the `code` field of error envelopes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Malformed body or query string
    BadRequest,
    /// Row/col outside the current board
    InvalidCell,
    /// Operation needs an active round
    RoundNotActive,

    // Resource Not Found
    /// Player worksheet missing
    WorksheetNotFound,
    /// Target spreadsheet missing
    SpreadsheetNotFound,

    // Store Errors
    /// Server started without a store connection
    NotConnected,
    /// Store rejected our credentials
    StoreAuth,
    /// Store unreachable, timed out or throttled
    StoreUnavailable,
    /// Store rejected the request
    StoreRejected,
    /// Store answered with something we could not read
    StoreMalformed,

    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidCell => "INVALID_CELL",
            Self::RoundNotActive => "ROUND_NOT_ACTIVE",

            Self::WorksheetNotFound => "WORKSHEET_NOT_FOUND",
            Self::SpreadsheetNotFound => "SPREADSHEET_NOT_FOUND",

            Self::NotConnected => "NOT_CONNECTED",
            Self::StoreAuth => "STORE_AUTH",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreRejected => "STORE_REJECTED",
            Self::StoreMalformed => "STORE_MALFORMED",

            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Failures caused by what the caller asked for rather than by the server
    /// or the store.
    pub const fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            Self::BadRequest | Self::InvalidCell | Self::RoundNotActive | Self::WorksheetNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
