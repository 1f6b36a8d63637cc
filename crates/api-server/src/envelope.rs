//! Response envelope and error mapping
//!
//! Every JSON outcome is wrapped in the same `{statusCode, message, data}`
//! shape; errors carry `data: null`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

/// Uniform response wrapper
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Build a success response with the given status and payload
    pub fn ok(
        status: StatusCode,
        message: impl Into<String>,
        data: T,
    ) -> (StatusCode, Json<Envelope<T>>) {
        (
            status,
            Json(Envelope {
                status_code: status.as_u16(),
                message: message.into(),
                data: Some(data),
            }),
        )
    }
}

/// A failure that renders as the envelope with `data: null`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<tr_core::Error> for ApiError {
    fn from(err: tr_core::Error) -> Self {
        use tr_core::Error;

        match err {
            Error::Validation(message) => Self {
                status: StatusCode::BAD_REQUEST,
                message,
            },
            Error::DuplicateName(_) => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            Error::TaskNotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: "Task not found".to_string(),
            },
            // Store failures surface as 500 with the underlying message
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("{}", self.message);
        } else {
            warn!("{}", self.message);
        }

        let body = Envelope::<()> {
            status_code: self.status.as_u16(),
            message: self.message,
            data: None,
        };
        (self.status, Json(body)).into_response()
    }
}
