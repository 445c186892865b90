//! In-memory filesystem backend.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::Fs;

#[derive(Debug, Default)]
struct MemState {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

/// In-memory [`Fs`].
///
/// Clones share the same tree, so a test can hand one clone to the writer
/// and inspect the result through another. Directory modes are ignored.
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    state: Arc<Mutex<MemState>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Place a regular file directly, creating its parents.
    pub fn add_file(&self, path: impl AsRef<Path>, data: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            for dir in parent.ancestors().filter(|p| !p.as_os_str().is_empty()) {
                state.dirs.insert(dir.to_path_buf());
            }
        }
        state.files.insert(path.to_path_buf(), data.into());
    }

    /// Contents of the file at `path`.
    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        self.lock().files.contains_key(path.as_ref())
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.lock().dirs.contains(path.as_ref())
    }

    /// All file paths, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }
}

fn not_a_directory(path: &Path) -> io::Error {
    io::Error::other(format!("{}: not a directory", path.display()))
}

impl Fs for MemFs {
    fn mkdir_all(&self, path: &Path, _mode: u32) -> io::Result<()> {
        let mut state = self.lock();
        let chain: Vec<&Path> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();

        if let Some(file) = chain.iter().find(|p| state.files.contains_key(**p)) {
            return Err(not_a_directory(file));
        }
        for dir in chain {
            state.dirs.insert(dir.to_path_buf());
        }
        Ok(())
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        let mut state = self.lock();
        if state.dirs.contains(path) {
            return Err(io::Error::other(format!(
                "{}: is a directory",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if state.files.contains_key(parent) {
                return Err(not_a_directory(parent));
            }
            if !state.dirs.contains(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{}: no such file or directory", parent.display()),
                ));
            }
        }
        state.files.insert(path.to_path_buf(), Vec::new());

        Ok(Box::new(MemFile {
            path: path.to_path_buf(),
            state: Arc::clone(&self.state),
        }))
    }
}

/// Write handle into a [`MemFs`]; bytes land in the tree immediately.
struct MemFile {
    path: PathBuf,
    state: Arc<Mutex<MemState>>,
}

impl Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
