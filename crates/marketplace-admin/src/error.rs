use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::vendors::{RepositoryError, VendorServiceError, VerificationError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    /// Vendor export or request body that is not valid JSON for a vendor record.
    Input(serde_json::Error),
    /// Request body the JSON extractor refused.
    Body(JsonRejection),
    Directory(VendorServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::Body(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::Body(_) => StatusCode::BAD_REQUEST,
            AppError::Directory(err) => directory_status(err),
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn directory_status(err: &VendorServiceError) -> StatusCode {
    match err {
        VendorServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        VendorServiceError::Repository(RepositoryError::Conflict)
        | VendorServiceError::Verification(VerificationError::InvalidTransition { .. })
        | VendorServiceError::NotSuspended(_)
        | VendorServiceError::Suspended(_)
        | VendorServiceError::Deleted(_) => StatusCode::CONFLICT,
        VendorServiceError::MissingId
        | VendorServiceError::MissingReason
        | VendorServiceError::Verification(VerificationError::MissingReason) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        VendorServiceError::Repository(RepositoryError::Unavailable(_))
        | VendorServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Input(err) => write!(f, "invalid vendor payload: {err}"),
            AppError::Body(err) => write!(f, "invalid request body: {}", err.body_text()),
            AppError::Directory(VendorServiceError::Repository(RepositoryError::NotFound)) => {
                f.write_str("vendor not found")
            }
            AppError::Directory(VendorServiceError::Repository(RepositoryError::Conflict)) => {
                f.write_str("vendor already exists")
            }
            AppError::Directory(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Body(err) => Some(err),
            AppError::Directory(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Input(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Body(value)
    }
}

impl From<VendorServiceError> for AppError {
    fn from(value: VendorServiceError) -> Self {
        Self::Directory(value)
    }
}
