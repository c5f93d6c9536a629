// axum `IntoResponse` glue: errors render as the error envelope, envelopes as 200 JSON.
use crate::core::envelope::Envelope;
use crate::core::error::{Error, default_status};
use crate::core::respond::{BufferedResponse, error_json, write_json};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = default_status(self.kind());
        let mut out = BufferedResponse::new();
        match error_json(&mut out, &self, Some(status)) {
            Ok(()) => out.into_response(),
            Err(_) => status.into_response(),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let mut out = BufferedResponse::new();
        match write_json(&mut out, StatusCode::OK, &self, None) {
            Ok(()) => out.into_response(),
            Err(err) => err.into_response(),
        }
    }
}
