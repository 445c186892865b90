//! Naming rules for files inside a bundle.
//!
//! # Layout
//!
//! ```text
//! {parent}/{kind}_{name}/{name}.yaml   # identified object
//! {parent}/{kind}.yaml                 # flat object
//! {parent}/pod_{name}/{name}.log.gz    # compressed log
//! {dir}/{name}.err                     # error record
//! {dir}/{name}.yaml                    # arbitrary value
//! ```
//!
//! `{kind}` is always lower-cased.

use std::path::{Path, PathBuf};

/// Where a single artifact lands: a directory and a file name inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub dir: PathBuf,
    pub file: String,
}

impl Placement {
    /// Object in its own directory, keyed by kind and name.
    pub fn nested(parent: &Path, kind: &str, name: &str) -> Self {
        Self {
            dir: parent.join(format!("{}_{}", kind.to_lowercase(), name)),
            file: format!("{}.yaml", name),
        }
    }

    /// Object directly under `parent`, keyed by kind only.
    pub fn flat(parent: &Path, kind: &str) -> Self {
        Self {
            dir: parent.to_path_buf(),
            file: format!("{}.yaml", kind.to_lowercase()),
        }
    }

    pub fn log(parent: &Path, pod_name: &str) -> Self {
        Self {
            dir: parent.join(format!("pod_{}", pod_name)),
            file: format!("{}.log.gz", pod_name),
        }
    }

    pub fn value(dir: &Path, name: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            file: format!("{}.yaml", name),
        }
    }

    pub fn error(dir: &Path, name: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            file: format!("{}.err", name),
        }
    }

    /// Full path of the file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_lowercases_kind() {
        let p = Placement::nested(Path::new("root"), "Pod", "web-1");
        assert_eq!(p.path(), PathBuf::from("root/pod_web-1/web-1.yaml"));
    }

    #[test]
    fn test_nested_keeps_name_case() {
        let p = Placement::nested(Path::new("root"), "StatefulSet", "Zk");
        assert_eq!(p.dir, PathBuf::from("root/statefulset_Zk"));
        assert_eq!(p.file, "Zk.yaml");
    }

    #[test]
    fn test_flat() {
        let p = Placement::flat(Path::new("diag"), "VersionInfo");
        assert_eq!(p.path(), PathBuf::from("diag/versioninfo.yaml"));
    }

    #[test]
    fn test_log() {
        let p = Placement::log(Path::new("diag/ns"), "web-1");
        assert_eq!(p.path(), PathBuf::from("diag/ns/pod_web-1/web-1.log.gz"));
    }

    #[test]
    fn test_value_and_error() {
        let dir = Path::new("diag/kudo");
        assert_eq!(
            Placement::value(dir, "settings").path(),
            PathBuf::from("diag/kudo/settings.yaml")
        );
        assert_eq!(
            Placement::error(dir, "web-1").path(),
            PathBuf::from("diag/kudo/web-1.err")
        );
    }
}
