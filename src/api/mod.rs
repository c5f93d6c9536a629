//! Purpose: Define the public Rust API boundary for the toolkit.
//! Exports: Config, decode/respond operations, envelope, errors, and axum adapters.
//! Role: Additive-only surface; callers should not need `core` paths directly.
//! Invariants: Everything a handler needs is reachable from this module.

mod extract;
mod response;

pub use crate::core::config::{Config, DEFAULT_MAX_JSON_SIZE};
pub use crate::core::decode::{decode, read_json};
pub use crate::core::envelope::Envelope;
pub use crate::core::error::{Error, ErrorKind, default_status};
pub use crate::core::limit::{LimitedReader, SizeLimitExceeded};
pub use crate::core::respond::{BufferedResponse, ResponseWriter, error_json, write_json};
pub use extract::StrictJson;
