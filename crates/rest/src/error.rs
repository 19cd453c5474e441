//! Error-to-status mapping for the REST surface
//!
//! The body of an error response is the error's plain-text message, not a
//! JSON envelope: clients of the original API parse the raw text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keyport_keys::KeyError;

/// Wrapper carrying a core error across the HTTP boundary
#[derive(Debug)]
pub struct RestError(pub KeyError);

impl RestError {
    fn status(&self) -> StatusCode {
        match self.0 {
            KeyError::KeyNotFound(_) => StatusCode::NOT_FOUND,
            KeyError::WrongPassword => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        (self.status(), self.0.to_string()).into_response()
    }
}

impl From<KeyError> for RestError {
    fn from(err: KeyError) -> Self {
        Self(err)
    }
}
