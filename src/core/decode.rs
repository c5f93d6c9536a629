//! Purpose: Decode exactly one JSON value from a size-bounded request body.
//! Exports: `decode`, `read_json`.
//! Role: Core decoder; callers pass the resulting error straight to the error responder.
//! Invariants: The body reader is never consumed past the configured ceiling.
//! Invariants: Unknown keys fail the decode unless the config allows them.
//! Invariants: Keys swallowed by a `#[serde(flatten)]` field are not seen as unknown.
//! Invariants: Trailing non-whitespace after the first value is always rejected.
//! Notes: Never logs; every failure is returned to the caller.

use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind};
use crate::core::limit::{LimitedReader, SizeLimitExceeded};
use crate::json::parse;
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::io::Read;

/// Read and decode one JSON value of type `T` from `reader`.
///
/// Unknown-key rejection covers keys the target skips. Keys that reach a
/// `#[serde(flatten)]` field are buffered and dropped by serde itself, so they
/// pass even when unknown keys are disallowed.
pub fn decode<T, R>(config: &Config, reader: R) -> Result<T, Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let body = read_bounded(reader, config.json_limit())?;
    decode_body(&body, config.allow_unknown_fields)
}

/// Decode into `target`, overwriting it only when the whole body is valid.
pub fn read_json<T, R>(config: &Config, reader: R, target: &mut T) -> Result<(), Error>
where
    T: DeserializeOwned,
    R: Read,
{
    *target = decode(config, reader)?;
    Ok(())
}

fn read_bounded<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>, Error> {
    let mut limited = LimitedReader::new(reader, limit);
    let mut body = Vec::new();
    match limited.read_to_end(&mut body) {
        Ok(_) => Ok(body),
        Err(err) if SizeLimitExceeded::from_io(&err).is_some() => Err(Error::size_exceeded(limit)),
        Err(err) => Err(Error::new(ErrorKind::Other).with_source(err)),
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8], allow_unknown_fields: bool) -> Result<T, Error> {
    // Syntax of the whole first value is checked before any type binding.
    let mut scan = serde_json::Deserializer::from_slice(body);
    if let Err(err) = IgnoredAny::deserialize(&mut scan) {
        return Err(parse::classify(err, None, body, None));
    }

    let mut first_unknown: Option<String> = None;
    let mut de = serde_json::Deserializer::from_slice(body);

    let result = {
        let mut on_ignored = |path: serde_ignored::Path<'_>| {
            if first_unknown.is_none() {
                first_unknown = Some(ignored_path(&path));
            }
        };
        let tracked = serde_ignored::Deserializer::new(&mut de, &mut on_ignored);
        serde_path_to_error::deserialize::<_, T>(tracked)
    };

    let unknown = if allow_unknown_fields {
        None
    } else {
        first_unknown
    };

    let value = match result {
        Ok(value) => value,
        Err(err) => {
            let field = field_path(err.path());
            return Err(parse::classify(err.into_inner(), field, body, unknown));
        }
    };
    if let Some(name) = unknown {
        return Err(Error::unknown_field(name));
    }
    de.end().map_err(|_| Error::multiple_values())?;
    Ok(value)
}

fn field_path(path: &serde_path_to_error::Path) -> Option<String> {
    path.iter().next()?;
    Some(path.to_string())
}

enum Step {
    Key(String),
    Index(usize),
}

// Render like serde_path_to_error (`items[1].extra`) so unknown-key and
// type-error messages name fields the same way.
fn ignored_path(path: &serde_ignored::Path<'_>) -> String {
    let mut steps = Vec::new();
    let mut cursor = path;
    loop {
        match cursor {
            serde_ignored::Path::Root => break,
            serde_ignored::Path::Seq { parent, index } => {
                steps.push(Step::Index(*index));
                cursor = *parent;
            }
            serde_ignored::Path::Map { parent, key } => {
                steps.push(Step::Key(key.clone()));
                cursor = *parent;
            }
            serde_ignored::Path::Some { parent }
            | serde_ignored::Path::NewtypeStruct { parent }
            | serde_ignored::Path::NewtypeVariant { parent } => cursor = *parent,
        }
    }

    let mut out = String::new();
    for step in steps.into_iter().rev() {
        match step {
            Step::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(&key);
            }
            Step::Index(index) => out.push_str(&format!("[{index}]")),
        }
    }
    out
}
