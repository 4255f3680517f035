//! Error handling for the panel game backend.

pub mod error_code;

pub use error_code::ErrorCode;
