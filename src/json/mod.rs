//! Purpose: Internal JSON parsing boundary shared by the decoder.
//! Exports: `parse` module with failure categorization helpers.
//! Role: Single seam for serde_json error shapes so callsites avoid ad hoc string matching.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
