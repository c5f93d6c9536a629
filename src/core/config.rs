//! Purpose: Hold the read-only knobs shared by decode and upload collaborators.
//! Exports: `Config`, `DEFAULT_MAX_JSON_SIZE`.
//! Role: Supplied once per service; borrowed immutably by every operation.
//! Invariants: A zero `max_json_size` means "use the 1 MiB default".
//! Notes: File size and type fields are carried for upload handlers; decode ignores them.

use serde::Deserialize;

pub const DEFAULT_MAX_JSON_SIZE: usize = 1024 * 1024;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    pub max_json_size: usize,
    pub max_file_size: usize,
    pub allowed_file_types: Vec<String>,
    pub allow_unknown_fields: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_json_size(mut self, bytes: usize) -> Self {
        self.max_json_size = bytes;
        self
    }

    pub fn with_max_file_size(mut self, bytes: usize) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_allowed_file_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_file_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    /// Effective decode ceiling in bytes.
    pub fn json_limit(&self) -> usize {
        if self.max_json_size == 0 {
            DEFAULT_MAX_JSON_SIZE
        } else {
            self.max_json_size
        }
    }
}
