use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error kinds of the picking core.
///
/// Extraction itself never fails: malformed rows and unparsable cells
/// default silently, since the input spreadsheets are hand-edited. What
/// does fail, and fails the whole invocation, is resolving or reading a
/// source; a silently missing BOM would under-report shortages.
// Field is `source_id`, not `source`: thiserror treats a field named
// `source` as the error's cause, which a String cannot be.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PickError {
    #[error("Source not found: {source_id}")]
    SourceNotFound { source_id: String },

    #[error("Unreadable source {source_id}: {message}")]
    UnreadableSource { source_id: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PickError {
    pub fn source_not_found(source_id: impl Into<String>) -> Self {
        Self::SourceNotFound {
            source_id: source_id.into(),
        }
    }

    pub fn unreadable_source(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnreadableSource {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            Self::UnreadableSource { .. } => "UNREADABLE_SOURCE",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Export { .. } => "EXPORT_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::SourceNotFound { .. } => 404,
            Self::UnreadableSource { .. } => 422,
            Self::Validation { .. } => 400,
            Self::Configuration { .. } => 500,
            Self::Export { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

pub type PickResult<T> = Result<T, PickError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<PickError> for ErrorResponse {
    fn from(error: PickError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
        }
    }
}
