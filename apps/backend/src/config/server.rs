use super::{optional_var, parsed_var};
use crate::error::AppError;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `HOST` (default `0.0.0.0`) and `PORT` (default 8080).
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            host: optional_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed_var("PORT", DEFAULT_PORT)?,
        })
    }
}
