use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use stockview_core::FetchError;
use thiserror::Error;

/// Server start-up failures mapped to exit codes.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl ServerError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Bind { .. } => 2,
            Self::Serve(_) => 10,
        }
    }
}

/// Caller-facing rendering of a failed `/fetch-data/` call.
#[derive(Debug)]
pub enum ApiError {
    /// The body could not be read as JSON at all.
    Body(JsonRejection),
    Fetch(FetchError),
}

impl From<FetchError> for ApiError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Body(value)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    retryable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldDetail>,
}

#[derive(Debug, Serialize)]
struct FieldDetail {
    field: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Body(rejection) => rejection.status(),
            Self::Fetch(FetchError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Fetch(FetchError::NoDataFound) => StatusCode::NOT_FOUND,
            Self::Fetch(FetchError::UpstreamUnavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Fetch(FetchError::UpstreamError { .. } | FetchError::MalformedRow { .. }) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            Self::Body(rejection) => ErrorDetail {
                code: "request.malformed_body",
                message: rejection.body_text(),
                retryable: false,
                fields: Vec::new(),
            },
            Self::Fetch(error) => {
                let fields = match error {
                    FetchError::Validation(errors) => errors
                        .iter()
                        .map(|error| FieldDetail {
                            field: error.field,
                            message: error.error.to_string(),
                        })
                        .collect(),
                    _ => Vec::new(),
                };

                ErrorDetail {
                    code: error.code(),
                    message: error.public_message(),
                    retryable: error.retryable(),
                    fields,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.detail(),
        };

        (self.status(), Json(body)).into_response()
    }
}
