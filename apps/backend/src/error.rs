use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::errors::ErrorCode;
use crate::store::StoreError;
use crate::trace_ctx;

/// Body of every failed response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub message: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Spreadsheet not connected")]
    NotConnected,
    #[error("Store error: {detail}")]
    Store { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotConnected => ErrorCode::NotConnected,
            AppError::Store { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Message exposed to the client. Raw fault text is passed through; the
    /// game only runs inside a trusted room.
    pub fn detail(&self) -> String {
        match self {
            AppError::NotConnected => "Spreadsheet not connected".to_string(),
            AppError::Store { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Every failure is reported as a 500; clients branch on `status` and `code`.
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn not_connected() -> Self {
        Self::NotConnected
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        let detail = e.to_string();
        match e {
            StoreError::WorksheetNotFound(_) => {
                AppError::not_found(ErrorCode::WorksheetNotFound, detail)
            }
            StoreError::SpreadsheetNotFound(_) => {
                AppError::not_found(ErrorCode::SpreadsheetNotFound, detail)
            }
            StoreError::Auth(_) => AppError::Store {
                code: ErrorCode::StoreAuth,
                detail,
            },
            StoreError::Connect(_)
            | StoreError::Timeout(_)
            | StoreError::Throttled(_)
            | StoreError::Upstream { .. } => AppError::Store {
                code: ErrorCode::StoreUnavailable,
                detail,
            },
            StoreError::Rejected(_) => AppError::Store {
                code: ErrorCode::StoreRejected,
                detail,
            },
            StoreError::Malformed(_) => AppError::Store {
                code: ErrorCode::StoreMalformed,
                detail,
            },
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let trace_id = trace_ctx::trace_id();

        if code.is_caller_fault() {
            warn!(code = %code, error = %self, trace_id = %trace_id, "request rejected");
        } else {
            error!(code = %code, error = ?self, trace_id = %trace_id, "request failed");
        }

        let envelope = ErrorEnvelope {
            status: "error",
            message: self.detail(),
            code: code.as_str().to_string(),
            trace_id: trace_id.clone(),
        };

        let mut resp = HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(envelope);
        // Every failure shares one status; the logger reads the code from here.
        resp.extensions_mut().insert(code);
        resp
    }
}
