//! Byte-level write primitive and the YAML value serializer built on it.

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PrintError, PrintResult};
use crate::fs::Fs;
use crate::placement::Placement;

pub(crate) fn ensure_dir(fs: &dyn Fs, dir: &Path, mode: u32) -> PrintResult<()> {
    fs.mkdir_all(dir, mode).map_err(|source| PrintError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

pub(crate) fn create_file(fs: &dyn Fs, path: &Path) -> PrintResult<Box<dyn Write>> {
    fs.create(path).map_err(|source| PrintError::CreateFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Create `placement.dir` and write `data` to the placed file.
pub(crate) fn write_bytes(
    fs: &dyn Fs,
    dir_mode: u32,
    placement: &Placement,
    data: &[u8],
) -> PrintResult<PathBuf> {
    ensure_dir(fs, &placement.dir, dir_mode)?;
    let path = placement.path();
    let mut file = create_file(fs, &path)?;
    file.write_all(data)
        .and_then(|()| file.flush())
        .map_err(|source| PrintError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Render `value` as YAML; `path` only labels the error.
pub(crate) fn marshal_yaml<T: Serialize + ?Sized>(value: &T, path: &Path) -> PrintResult<Vec<u8>> {
    serde_yaml::to_string(value)
        .map(String::into_bytes)
        .map_err(|source| PrintError::Marshal {
            path: path.to_path_buf(),
            source,
        })
}

/// Marshal first, then write. Nothing touches the filesystem if the value
/// cannot be rendered.
pub(crate) fn write_yaml<T: Serialize + ?Sized>(
    fs: &dyn Fs,
    dir_mode: u32,
    placement: &Placement,
    value: &T,
) -> PrintResult<PathBuf> {
    let data = marshal_yaml(value, &placement.path())?;
    write_bytes(fs, dir_mode, placement, &data)
}
