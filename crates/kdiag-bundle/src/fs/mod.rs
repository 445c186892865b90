//! Filesystem abstraction for bundle output.
//!
//! The writer only ever needs two primitives: create a directory chain and
//! create (truncate) a file. Everything else is plain `Write`.
//!
//! - [`OsFs`]: the real filesystem
//! - [`MemFs`]: in-memory tree, for tests and dry runs

pub mod memory;
pub mod os;

use std::io::{self, Write};
use std::path::Path;

pub use memory::MemFs;
pub use os::OsFs;

/// Minimal filesystem surface used by the bundle writer.
pub trait Fs {
    /// Create `path` and all missing parents. Already-existing directories
    /// are not an error. `mode` applies to newly created directories where
    /// the backend supports permissions.
    fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Create or truncate the file at `path`. The parent must exist.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;
}

impl<F: Fs + ?Sized> Fs for &F {
    fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        (**self).mkdir_all(path, mode)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        (**self).create(path)
    }
}

impl<F: Fs + ?Sized> Fs for Box<F> {
    fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        (**self).mkdir_all(path, mode)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        (**self).create(path)
    }
}
