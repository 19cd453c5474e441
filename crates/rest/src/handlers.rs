//! Key-by-name REST handlers
//!
//! `DELETE /keys/{name}` removes a key after password verification;
//! `PUT /keys/{name}` changes its password. Both take JSON bodies and
//! map errors to 400/401/404/500 with the error text as the body.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use keyport_keys::{ops, Keybase, PassphraseSource, PromptIo};

use crate::error::RestError;

/// Shared REST state: one keybase behind a lock, one writer at a time
pub struct AppState {
    pub keybase: parking_lot::Mutex<Box<dyn Keybase>>,
}

impl AppState {
    pub fn new(keybase: Box<dyn Keybase>) -> Self {
        Self {
            keybase: parking_lot::Mutex::new(keybase),
        }
    }
}

/// Body of a delete request
#[derive(Debug, Deserialize)]
pub struct DeleteKeyBody {
    pub password: String,
}

/// Body of an update request
#[derive(Debug, Deserialize)]
pub struct UpdateKeyBody {
    pub new_password: String,
    pub old_password: String,
}

/// DELETE /keys/{name}
pub async fn delete_key(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Result<Json<DeleteKeyBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
        }
    };

    let result = state.keybase.lock().delete(&name, &body.password, false);
    match result {
        Ok(()) => {
            debug!(name, "deleted key via REST");
            StatusCode::OK.into_response()
        }
        Err(err) => RestError(err).into_response(),
    }
}

/// PUT /keys/{name}
pub async fn update_key(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Result<Json<UpdateKeyBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
        }
    };

    // Same operation the CLI runs, with both passphrases supplied directly
    // instead of prompted; nothing is read or written interactively.
    let mut input = std::io::Cursor::new(Vec::new());
    let mut out = std::io::sink();
    let mut prompt = std::io::sink();
    let mut io = PromptIo::new(&mut input, &mut out, &mut prompt);

    let mut kb = state.keybase.lock();
    let result = ops::update(
        kb.as_mut(),
        &mut io,
        &name,
        PassphraseSource::Provided(body.old_password),
        PassphraseSource::Provided(body.new_password),
    );
    drop(kb);
    match result {
        Ok(()) => {
            debug!(name, "updated key password via REST");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                (),
            )
                .into_response()
        }
        Err(err) => RestError(err).into_response(),
    }
}
