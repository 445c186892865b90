//! Compressed log capture.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{PrintError, PrintResult};
use crate::fs::Fs;
use crate::options::PrintOptions;
use crate::placement::Placement;

use super::bytes;

const MAX_EINTR_RETRIES: usize = 16;

/// A readable log stream that must be released when done.
///
/// The writer calls `close` exactly once per stream, whether or not the copy
/// succeeded.
pub trait LogSource: Read {
    fn close(&mut self) -> io::Result<()>;
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Adapts any `Read` whose release is just a drop.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: Option<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner: Some(inner) }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl<R: Read> Read for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.as_mut() {
            Some(inner) => inner.read(buf),
            None => Ok(0),
        }
    }
}

impl<R: Read> LogSource for ReaderSource<R> {
    fn close(&mut self) -> io::Result<()> {
        self.inner = None;
        Ok(())
    }
}

/// `{parent}/pod_{name}/{name}.log.gz`
///
/// Closes `log` on every path out of this function.
pub(crate) fn print_log(
    fs: &dyn Fs,
    options: &PrintOptions,
    log: &mut dyn LogSource,
    parent: &Path,
    name: &str,
) -> PrintResult<PathBuf> {
    let result = write_log(fs, options, log, parent, name);
    if let Err(err) = log.close() {
        tracing::debug!(error = %err, pod = name, "failed to close log stream");
    }
    result
}

fn write_log(
    fs: &dyn Fs,
    options: &PrintOptions,
    log: &mut dyn LogSource,
    parent: &Path,
    name: &str,
) -> PrintResult<PathBuf> {
    let placement = Placement::log(parent, name);
    bytes::ensure_dir(fs, &placement.dir, options.dir_mode)?;
    let path = placement.path();
    let file = bytes::create_file(fs, &path)?;

    let to_write_error = |source| PrintError::Write {
        path: path.clone(),
        source,
    };

    let mut gz = GzEncoder::new(file, Compression::new(options.gzip_level.min(9)));
    copy_chunked(log, &mut gz, options.gzip_buffer_size).map_err(to_write_error)?;
    let mut file = gz.finish().map_err(to_write_error)?;
    file.flush().map_err(to_write_error)?;

    Ok(path)
}

/// Copy `src` into `dst` in chunks of at most `chunk` bytes, retrying
/// interrupted reads a bounded number of times.
pub(crate) fn copy_chunked<W: Write + ?Sized>(
    src: &mut dyn Read,
    dst: &mut W,
    chunk: usize,
) -> io::Result<u64> {
    let mut buf = vec![0u8; chunk.max(1)];
    let mut total = 0u64;
    let mut retries = 0;
    loop {
        match src.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => {
                dst.write_all(&buf[..n])?;
                total += n as u64;
                retries = 0;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                retries += 1;
                if retries >= MAX_EINTR_RETRIES {
                    return Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        format!(
                            "persistent EINTR: interrupted {} consecutive times",
                            MAX_EINTR_RETRIES
                        ),
                    ));
                }
            }
            Err(e) => return Err(e),
        }
    }
}
