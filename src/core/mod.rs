// Core modules: bounded decoding, error classification, envelopes, and response writing.
pub mod config;
pub mod decode;
pub mod envelope;
pub mod error;
pub mod limit;
pub mod respond;
