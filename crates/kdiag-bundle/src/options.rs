//! Tunables for bundle output.

use serde::Deserialize;

/// Output settings for a [`BundleWriter`](crate::BundleWriter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Mode for directories the writer creates (owner-only by default).
    pub dir_mode: u32,
    /// Read-chunk size when copying a log into its gzip sink.
    pub gzip_buffer_size: usize,
    /// Gzip compression level, 0-9. Higher values are treated as 9.
    pub gzip_level: u32,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            dir_mode: 0o700,
            gzip_buffer_size: 2048,
            gzip_level: 6,
        }
    }
}

/// Partial overrides for `PrintOptions`, e.g. from a YAML/JSON config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrintOptionsOverrides {
    pub dir_mode: Option<u32>,
    pub gzip_buffer_size: Option<usize>,
    pub gzip_level: Option<u32>,
}

impl PrintOptions {
    /// Apply overrides onto these settings. Only `Some` values override.
    pub fn apply(self, overrides: PrintOptionsOverrides) -> Self {
        Self {
            dir_mode: overrides.dir_mode.unwrap_or(self.dir_mode),
            gzip_buffer_size: overrides
                .gzip_buffer_size
                .unwrap_or(self.gzip_buffer_size)
                .max(1),
            gzip_level: overrides.gzip_level.unwrap_or(self.gzip_level).min(9),
        }
    }
}
