//! Purpose: Write JSON payloads and error envelopes as complete HTTP responses.
//! Exports: `ResponseWriter`, `BufferedResponse`, `write_json`, `error_json`.
//! Role: Response half of the toolkit; pairs with `decode` in request handlers.
//! Invariants: Payloads are serialized before anything touches the writer.
//! Invariants: Headers are set, then the status is committed, then the body is written.
//! Invariants: Extra headers replace existing values of the same name; no value merging.

use crate::core::envelope::Envelope;
use crate::core::error::{Error, ErrorKind};
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;
use std::fmt;
use std::io;

/// The response collaborator: a header map, a one-shot status, and a body sink.
pub trait ResponseWriter {
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commit the status. Only the first commit takes effect.
    fn write_status(&mut self, status: StatusCode);

    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

/// In-memory response that can be inspected or turned into an axum `Response`.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> Response {
        let status = self.status();
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseWriter for BufferedResponse {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.write_status(StatusCode::OK);
        self.body.extend_from_slice(body);
        Ok(())
    }
}

pub fn write_json<W, T>(
    writer: &mut W,
    status: StatusCode,
    payload: &T,
    headers: Option<&HeaderMap>,
) -> Result<(), Error>
where
    W: ResponseWriter + ?Sized,
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(payload).map_err(|err| {
        Error::new(ErrorKind::Encode)
            .with_message(format!("failed to encode response: {err}"))
            .with_source(err)
    })?;

    if let Some(extra) = headers {
        let target = writer.headers_mut();
        for name in extra.keys() {
            target.remove(name);
            for value in extra.get_all(name) {
                target.append(name.clone(), value.clone());
            }
        }
    }
    writer
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    writer.write_status(status);
    writer.write_body(&body).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message(format!("failed to write response: {err}"))
            .with_source(err)
    })
}

/// Write `{"error": true, "message": <err>}`; the status defaults to 400.
pub fn error_json<W, E>(writer: &mut W, err: &E, status: Option<StatusCode>) -> Result<(), Error>
where
    W: ResponseWriter + ?Sized,
    E: fmt::Display + ?Sized,
{
    let status = status.unwrap_or(StatusCode::BAD_REQUEST);
    let payload = Envelope::<()>::error(err.to_string());
    write_json(writer, status, &payload, None)
}
