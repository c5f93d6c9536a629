//! Purpose: Single error model for decode and respond paths.
//! Exports: `Error`, `ErrorKind`, `default_status`.
//! Role: Classified failures that callers hand straight to the error responder.
//! Invariants: `Display` is the user-presentable message; kinds are stable.
//! Invariants: One kind per failure; detail fields are optional context only.

use axum::http::StatusCode;
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    EmptyBody,
    MalformedSyntax,
    TypeMismatch,
    UnknownField,
    SizeExceeded,
    MultipleValues,
    /// Reserved for a decode target that cannot be decoded at all. Generic
    /// `DeserializeOwned` bounds rule that out, so `decode` never returns it;
    /// errors raised by a target's own `Deserialize` impl are `Other`.
    TargetMisuse,
    Other,
    Encode,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    field: Option<String>,
    offset: Option<u64>,
    limit: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            field: None,
            offset: None,
            limit: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub(crate) fn empty_body() -> Self {
        Self::new(ErrorKind::EmptyBody)
    }

    pub(crate) fn size_exceeded(limit: usize) -> Self {
        Self::new(ErrorKind::SizeExceeded).with_limit(limit as u64)
    }

    pub(crate) fn multiple_values() -> Self {
        Self::new(ErrorKind::MultipleValues)
    }

    pub(crate) fn unknown_field(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownField).with_field(name)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::EmptyBody => f.write_str("body must not be empty"),
            ErrorKind::MalformedSyntax => match self.offset {
                Some(offset) => write!(f, "body contains badly-formed JSON (at character {offset})"),
                None => f.write_str("body contains badly-formed JSON"),
            },
            ErrorKind::TypeMismatch => match (&self.field, self.offset) {
                (Some(field), _) => write!(f, "body contains incorrect JSON type for field {field:?}"),
                (None, Some(offset)) => {
                    write!(f, "body contains incorrect JSON type (at character {offset})")
                }
                (None, None) => f.write_str("body contains incorrect JSON type"),
            },
            ErrorKind::UnknownField => match &self.field {
                Some(field) => write!(f, "body contains unknown key {field:?}"),
                None => f.write_str("body contains unknown key"),
            },
            ErrorKind::SizeExceeded => write!(
                f,
                "body must not be larger than {} bytes",
                self.limit.unwrap_or_default()
            ),
            ErrorKind::MultipleValues => f.write_str("body must only contain a single JSON value"),
            ErrorKind::TargetMisuse => write!(
                f,
                "error unmarshalling json: {}",
                self.message().unwrap_or("invalid target")
            ),
            ErrorKind::Other | ErrorKind::Encode | ErrorKind::Io => {
                match (&self.message, &self.source) {
                    (Some(message), _) => f.write_str(message),
                    (None, Some(source)) => write!(f, "{source}"),
                    (None, None) => write!(f, "{:?}", self.kind),
                }
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// Status an error renders with when the caller has no opinion.
pub fn default_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::SizeExceeded => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::Encode | ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::EmptyBody
        | ErrorKind::MalformedSyntax
        | ErrorKind::TypeMismatch
        | ErrorKind::UnknownField
        | ErrorKind::MultipleValues
        | ErrorKind::TargetMisuse
        | ErrorKind::Other => StatusCode::BAD_REQUEST,
    }
}
