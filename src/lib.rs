//! Purpose: Strict JSON request decoding and uniform JSON envelope responses.
//! Exports: `api` (public surface), `core` (decoder, responder, errors, config).
//! Role: Helper layer for HTTP handlers; transport, routing, and lifecycle live elsewhere.
//! Invariants: Decode and respond paths share only read-only configuration.
//! Invariants: Core modules never log; adapters in `api` may.
pub mod api;
pub mod core;
mod json;
