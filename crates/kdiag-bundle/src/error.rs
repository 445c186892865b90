//! Error types for bundle printing.
//!
//! None of these ever reach the caller of [`BundleWriter`](crate::BundleWriter):
//! the writer renders them to text and appends them to its accumulator.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for printing operations.
pub type PrintResult<T> = Result<T, PrintError>;

/// Coarse classification of a print failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The object's kind (or identity) could not be determined.
    KindResolution,
    /// The value could not be rendered to YAML.
    Marshal,
    /// Directory/file creation, read or write failure.
    Io,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Errors returned by a [`KindResolver`](crate::scheme::KindResolver).
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The type key is unknown to the registry.
    #[error("type {type_key} is not registered in scheme")]
    NotRegistered { type_key: String },

    /// The object carries neither a kind nor a type key to resolve one from.
    #[error("object carries no type information")]
    Untyped,

    /// The registry knows the key but maps it to an empty kind.
    #[error("type {type_key} resolved to an empty kind")]
    EmptyKind { type_key: String },

    /// Failure inside a foreign registry.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// A single failed print operation.
///
/// The `Display` form is the line that ends up in the accumulator, always
/// shaped as `failed to <action> <path>: <cause>`.
#[derive(Debug, Error)]
pub enum PrintError {
    /// The object's kind could not be determined.
    #[error("failed to resolve kind of {object}: {source}")]
    KindResolution {
        object: String,
        #[source]
        source: ResolveError,
    },

    /// A nested object has no `metadata.name` to place it by.
    #[error("failed to determine name of {kind} object: missing metadata.name")]
    MissingIdentity { kind: String },

    /// The value could not be rendered to YAML.
    #[error("failed to marshal object to {}: {source}", .path.display())]
    Marshal {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A directory in the placement chain could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or truncated.
    #[error("failed to create file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the input or writing the output file failed part way.
    #[error("failed to write to file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PrintError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::KindResolution { .. } | Self::MissingIdentity { .. } => {
                ErrorClass::KindResolution
            }
            Self::Marshal { .. } => ErrorClass::Marshal,
            Self::CreateDir { .. } | Self::CreateFile { .. } | Self::Write { .. } => {
                ErrorClass::Io
            }
        }
    }

    /// Returns true for filesystem failures.
    pub fn is_io(&self) -> bool {
        self.class() == ErrorClass::Io
    }

    /// The path this failure is attributed to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Marshal { path, .. }
            | Self::CreateDir { path, .. }
            | Self::CreateFile { path, .. }
            | Self::Write { path, .. } => Some(path),
            Self::KindResolution { .. } | Self::MissingIdentity { .. } => None,
        }
    }
}
