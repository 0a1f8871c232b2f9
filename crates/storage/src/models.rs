//! Entities discovered under a mirror root.
//!
//! Both types are plain snapshots of what was on disk at scan time. Nothing
//! here touches the filesystem again after construction.

use crate::consts::INDEX_FILE;
use std::path::{Path, PathBuf};

/// A wheel sitting directly inside a package directory.
///
/// Ordering is by file name first (then path), which is the order wheels are
/// listed in a package index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WheelFile {
    /// File name, used verbatim as both link text and href.
    pub name: String,
    /// Location of the wheel's bytes.
    pub path: PathBuf,
}
impl WheelFile {
    /// Builds a wheel from its path, taking the name from the final component.
    ///
    /// Returns `None` when the path has no file name or the name isn't valid
    /// UTF-8, since such a name can't be written into an index.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self { name, path })
    }

    /// The package directory this wheel belongs to.
    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }
}

/// A directory containing at least one wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Directory name in its original case.
    pub name: String,
    /// Location of the package directory.
    pub path: PathBuf,
    wheels: Vec<WheelFile>,
}
impl Package {
    /// Wheels are sorted on construction so every consumer sees the same order
    /// regardless of how the directory listing came back.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, mut wheels: Vec<WheelFile>) -> Self {
        wheels.sort();
        Self { name: name.into(), path: path.into(), wheels }
    }

    pub fn wheels(&self) -> &[WheelFile] {
        &self.wheels
    }

    /// Where this package's `index.html` is written.
    pub fn index_path(&self) -> PathBuf {
        self.path.join(INDEX_FILE)
    }
}
