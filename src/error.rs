use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt::Write;
use thiserror::Error;
use validator::ValidationErrors;

/// Failures of the card lifecycle operations
#[derive(Debug, Error)]
pub enum CardError {
    #[error("Card already registered with given mobileNumber {0}")]
    AlreadyExists(String),

    #[error("{resource} not found with the given input data {field} : '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// Anything the repository could not do, passed through untouched
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl CardError {
    pub fn card_not_found(field: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "Card",
            field,
            value: value.into(),
        }
    }
}

/// Reported by repositories when a UNIQUE constraint rejects a write
#[derive(Debug, Error)]
#[error("duplicate value for unique column {column}")]
pub struct UniqueViolation {
    pub column: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub api_path: String,
    pub error_code: u16,
    pub error_message: String,
    pub error_time: String,
}

/// Error returned by the HTTP handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub api_path: String,
    pub message: String,
}

impl ApiError {
    pub fn from_card_error(api_path: &str, err: CardError) -> Self {
        let status = match &err {
            CardError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            CardError::NotFound { .. } => StatusCode::NOT_FOUND,
            CardError::Repository(e) => {
                tracing::error!("Repository failure on {}: {:?}", api_path, e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            api_path: api_path.to_string(),
            message: err.to_string(),
        }
    }

    pub fn validation(api_path: &str, errors: &ValidationErrors) -> Self {
        Self::bad_request(api_path, format_validation_errors(errors))
    }

    pub fn bad_request(api_path: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            api_path: api_path.to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            api_path: self.api_path,
            error_code: self.status.as_u16(),
            error_message: self.message,
            error_time: chrono::Utc::now().to_rfc3339(),
        });

        (self.status, body).into_response()
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut result = String::new();

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, field_errors) in fields {
        for err in field_errors {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| match err.code.as_ref() {
                    "length" => "invalid length".to_string(),
                    "range" => "value out of range".to_string(),
                    "required" => "required".to_string(),
                    _ => "invalid value".to_string(),
                });

            let _ = writeln!(&mut result, "{field}: {message}");
        }
    }

    if result.is_empty() {
        "Validation failed".to_string()
    } else {
        result.trim().to_string()
    }
}
