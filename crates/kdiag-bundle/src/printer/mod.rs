//! Error-accumulating bundle writer.
//!
//! Every `print_*` call is total: failures are rendered to a line of text and
//! appended to the writer's accumulator instead of being returned. Callers
//! read [`BundleWriter::errors`] once the run is over to decide the exit
//! status.
//!
//! # Example
//!
//! ```no_run
//! use kdiag_bundle::{BundleWriter, Object, OsFs, Scheme, KUDO_DIR};
//!
//! let scheme = Scheme::new().with("core/v1.Pod", "v1", "Pod");
//! let mut writer = BundleWriter::new(OsFs, scheme);
//!
//! writer.print_object(&Object::untyped("core/v1.Pod", "web-1"), KUDO_DIR);
//! writer.print_error("could not fetch logs", KUDO_DIR, "web-1");
//!
//! for line in writer.errors() {
//!     eprintln!("{}", line);
//! }
//! ```

mod bytes;
mod dispatch;
pub mod log;

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PrintResult;
use crate::fs::Fs;
use crate::object::Object;
use crate::options::PrintOptions;
use crate::placement::Placement;
use crate::scheme::KindResolver;

pub use log::{LogSource, ReaderSource};

/// One unit of diagnostic output.
pub enum Item {
    /// Object in its own `{kind}_{name}` directory.
    Object(Object),
    /// Each element in its own `{kind}_{name}` directory.
    ObjectList(Vec<Object>),
    /// Object without usable identity, stored as `{kind}.yaml`.
    Opaque(Object),
    /// Log stream, gzipped under `pod_{name}`.
    Log {
        name: String,
        source: Box<dyn LogSource>,
    },
    /// Arbitrary YAML document stored as `{name}.yaml`.
    Value {
        name: String,
        value: serde_yaml::Value,
    },
    /// Already-known failure stored as `{name}.err`.
    Error { name: String, message: String },
}

impl Item {
    pub fn log(name: impl Into<String>, source: impl LogSource + 'static) -> Self {
        Self::Log {
            name: name.into(),
            source: Box::new(source),
        }
    }

    pub fn error(name: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::Error {
            name: name.into(),
            message: err.to_string(),
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(obj) => f.debug_tuple("Object").field(obj).finish(),
            Self::ObjectList(objs) => f.debug_tuple("ObjectList").field(objs).finish(),
            Self::Opaque(obj) => f.debug_tuple("Opaque").field(obj).finish(),
            Self::Log { name, .. } => f
                .debug_struct("Log")
                .field("name", name)
                .finish_non_exhaustive(),
            Self::Value { name, value } => f
                .debug_struct("Value")
                .field("name", name)
                .field("value", value)
                .finish(),
            Self::Error { name, message } => f
                .debug_struct("Error")
                .field("name", name)
                .field("message", message)
                .finish(),
        }
    }
}

/// Writes diagnostic items into a directory tree, collecting failures.
///
/// One writer per bundle run. Not internally synchronized.
pub struct BundleWriter<F: Fs, R: KindResolver> {
    fs: F,
    resolver: R,
    options: PrintOptions,
    errors: Vec<String>,
}

impl<F: Fs, R: KindResolver> BundleWriter<F, R> {
    pub fn new(fs: F, resolver: R) -> Self {
        Self {
            fs,
            resolver,
            options: PrintOptions::default(),
            errors: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: PrintOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Dispatch an item to the matching `print_*` operation.
    pub fn print(&mut self, item: Item, parent: impl AsRef<Path>) {
        let parent = parent.as_ref();
        match item {
            Item::Object(obj) => self.print_object(&obj, parent),
            Item::ObjectList(objs) => self.print_object_list(&objs, parent),
            Item::Opaque(obj) => self.print_runtime_object(&obj, parent),
            Item::Log { name, source } => self.print_log(source, parent, &name),
            Item::Value { name, value } => self.print_value(&value, parent, &name),
            Item::Error { name, message } => self.print_error(message, parent, &name),
        }
    }

    /// `{parent}/{kind}_{name}/{name}.yaml`
    pub fn print_object(&mut self, obj: &Object, parent: impl AsRef<Path>) {
        let result = dispatch::print_nested(
            &self.fs,
            &self.resolver,
            self.options.dir_mode,
            obj,
            parent.as_ref(),
        );
        self.record(result);
    }

    /// Nested placement for every element. A failing element is recorded and
    /// the remaining ones are still written.
    pub fn print_object_list(&mut self, objs: &[Object], parent: impl AsRef<Path>) {
        let parent = parent.as_ref();
        for obj in objs {
            self.print_object(obj, parent);
        }
    }

    /// `{parent}/{kind}.yaml`, for objects without identity metadata.
    pub fn print_runtime_object(&mut self, obj: &Object, parent: impl AsRef<Path>) {
        let result = dispatch::print_flat(
            &self.fs,
            &self.resolver,
            self.options.dir_mode,
            obj,
            parent.as_ref(),
        );
        self.record(result);
    }

    /// `{parent}/{name}.err`, containing exactly `err.to_string()`.
    pub fn print_error(&mut self, err: impl fmt::Display, parent: impl AsRef<Path>, name: &str) {
        let placement = Placement::error(parent.as_ref(), name);
        let result = bytes::write_bytes(
            &self.fs,
            self.options.dir_mode,
            &placement,
            err.to_string().as_bytes(),
        );
        self.record(result);
    }

    /// `{parent}/pod_{name}/{name}.log.gz`. The source is always closed.
    pub fn print_log(&mut self, mut stream: impl LogSource, parent: impl AsRef<Path>, name: &str) {
        let result = log::print_log(&self.fs, &self.options, &mut stream, parent.as_ref(), name);
        self.record(result);
    }

    /// `{parent}/{name}.yaml`
    pub fn print_value<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
        parent: impl AsRef<Path>,
        name: &str,
    ) {
        let placement = Placement::value(parent.as_ref(), name);
        let result = bytes::write_yaml(&self.fs, self.options.dir_mode, &placement, value);
        self.record(result);
    }

    /// Failures recorded so far, in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    fn record(&mut self, result: PrintResult<PathBuf>) {
        match result {
            Ok(path) => tracing::debug!(path = %path.display(), "wrote bundle file"),
            Err(err) => {
                tracing::warn!(error = %err, class = %err.class(), "bundle item failed");
                self.errors.push(err.to_string());
            }
        }
    }
}
