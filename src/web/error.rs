//! Error responses for the board pages.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Page error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Request body over the upload limit (413).
    PayloadTooLarge,
    /// Unsupported request body type (415).
    UnsupportedMediaType,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Pick the code matching a rejection status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::PAYLOAD_TOO_LARGE => ErrorCode::PayloadTooLarge,
            StatusCode::UNSUPPORTED_MEDIA_TYPE => ErrorCode::UnsupportedMediaType,
            StatusCode::NOT_FOUND => ErrorCode::NotFound,
            s if s.is_server_error() => ErrorCode::InternalError,
            _ => ErrorCode::BadRequest,
        }
    }
}

/// Error returned by page handlers, rendered as plain text.
#[derive(Debug)]
pub struct PageError {
    code: ErrorCode,
    message: String,
}

impl PageError {
    /// Create a new page error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create an error from an extractor rejection.
    pub fn from_rejection(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::from_status(status), message)
    }

    /// Error code of this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl From<MultipartError> for PageError {
    fn from(err: MultipartError) -> Self {
        tracing::debug!("Multipart read failed: {}", err);
        Self::from_rejection(err.status(), err.body_text())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.code.status_code(), self.message).into_response()
    }
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for PageError {}

impl From<crate::BbsError> for PageError {
    fn from(err: crate::BbsError) -> Self {
        match &err {
            crate::BbsError::NotFound(msg) => PageError::new(ErrorCode::NotFound, msg.clone()),
            crate::BbsError::Validation(msg) => PageError::bad_request(msg.clone()),
            _ => {
                tracing::error!("Internal error: {}", err);
                PageError::internal("Internal Server Error")
            }
        }
    }
}
