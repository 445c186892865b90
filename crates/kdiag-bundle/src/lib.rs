pub mod error;
pub mod fs;
pub mod object;
pub mod options;
pub mod placement;
pub mod printer;
pub mod scheme;

/// Root of a diagnostics bundle.
pub const DIAG_DIR: &str = "diag";
/// Where the operator's own resources are collected.
pub const KUDO_DIR: &str = "diag/kudo";

// Convenience re-exports
pub use error::{ErrorClass, PrintError, PrintResult, ResolveError};
pub use fs::{Fs, MemFs, OsFs};
pub use object::{Object, ObjectMeta, TypeMeta};
pub use options::{PrintOptions, PrintOptionsOverrides};
pub use placement::Placement;
pub use printer::{BundleWriter, Item, LogSource, ReaderSource};
pub use scheme::{KindResolver, Scheme};
