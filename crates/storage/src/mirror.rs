//! Mirror root discovery and index writes.
//!
//! Directory discovery walks the whole tree below the root, but wheel
//! discovery inside each directory is a single level. A wheel nested two
//! directories deep therefore belongs to the inner directory only, never to
//! the outer one.

use crate::consts::{INDEX_FILE, WHEEL_EXTENSION};
use crate::error::{ErrorKind, Result};
use crate::models::{Package, WheelFile};
use std::fs::{self, DirEntry};
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// The directory a mirror is generated into.
///
/// Holding a `MirrorRoot` means the path existed and was a directory when it
/// was opened; nothing is cached beyond that.
#[derive(Debug, Clone)]
pub struct MirrorRoot {
    root: PathBuf,
}
impl MirrorRoot {
    /// Opens an existing mirror directory.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::NotFound`] if the path doesn't exist, and
    /// [`ErrorKind::NotADirectory`] if it exists but isn't a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let metadata = fs::metadata(&root).map_err(|e| ErrorKind::from_io(e, &root))?;
        if !metadata.is_dir() {
            exn::bail!(ErrorKind::NotADirectory(root));
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Where the root `index.html` is written.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    /// Every directory below the root, at any depth, sorted by path.
    ///
    /// The root itself is not included. Symlinked directories are not followed
    /// so a link cycle can't turn the walk infinite.
    pub fn directories(&self) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut stack = vec![self.root.clone()];
        while let Some(current) = stack.pop() {
            for entry in fs::read_dir(&current).map_err(|e| ErrorKind::from_io(e, &current))? {
                let entry = entry.map_err(|e| ErrorKind::from_io(e, &current))?;
                let file_type = entry.file_type().map_err(|e| ErrorKind::from_io(e, &entry.path()))?;
                if file_type.is_dir() {
                    stack.push(entry.path());
                    found.push(entry.path());
                }
            }
        }
        found.sort();
        Ok(found)
    }

    /// The wheels directly inside `dir`. Subdirectories are not searched.
    ///
    /// A wheel is a regular file (or a symlink to one) whose name ends in
    /// `.whl`. The match is case-sensitive.
    pub fn wheels_in(&self, dir: impl AsRef<Path>) -> Result<Vec<WheelFile>> {
        let dir = dir.as_ref();
        let mut wheels = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| ErrorKind::from_io(e, dir))? {
            let entry = entry.map_err(|e| ErrorKind::from_io(e, dir))?;
            if let Some(wheel) = Self::wheel_entry(entry)? {
                wheels.push(wheel);
            }
        }
        wheels.sort();
        Ok(wheels)
    }

    /// Scans the whole mirror for directories holding at least one wheel.
    ///
    /// Directories without wheels are dropped here and never show up again.
    /// Packages come back in path order.
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn packages(&self) -> Result<Vec<Package>> {
        let root_wheels = self.wheels_in(&self.root)?;
        if !root_wheels.is_empty() {
            tracing::warn!(count = root_wheels.len(), "Ignoring wheels placed directly in the mirror root");
        }
        let mut packages = Vec::new();
        for dir in self.directories()? {
            let wheels = self.wheels_in(&dir)?;
            if wheels.is_empty() {
                tracing::debug!(path = %dir.display(), "No wheels found; skipping directory");
                continue;
            }
            let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!(path = %dir.display(), "Package directory name is not valid UTF-8; skipping");
                continue;
            };
            if dir.parent() != Some(self.root.as_path()) {
                tracing::debug!(path = %dir.display(), "Nested package directory");
            }
            tracing::debug!(package = name, wheels = wheels.len(), "Package discovered");
            packages.push(Package::new(name, &dir, wheels));
        }
        Ok(packages)
    }

    /// Writes `index.html` into `dir`, replacing whatever was there.
    ///
    /// Returns the path written.
    pub fn write_index(&self, dir: impl AsRef<Path>, html: &str) -> Result<PathBuf> {
        let path = dir.as_ref().join(INDEX_FILE);
        fs::write(&path, html).map_err(|e| ErrorKind::from_io(e, &path))?;
        Ok(path)
    }

    /// Writes the root `index.html`.
    pub fn write_root_index(&self, html: &str) -> Result<PathBuf> {
        self.write_index(&self.root, html)
    }

    fn wheel_entry(entry: DirEntry) -> Result<Option<WheelFile>> {
        let path = entry.path();
        let Some(wheel) = WheelFile::from_path(&path) else {
            if entry.file_name().to_string_lossy().ends_with(WHEEL_EXTENSION) {
                tracing::warn!(path = %path.display(), "Wheel name is not valid UTF-8; skipping");
            }
            return Ok(None);
        };
        if !is_wheel_name(&wheel.name) {
            return Ok(None);
        }
        // Follows symlinks, unlike the directory walk.
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => Ok(Some(wheel)),
            Ok(_) => Ok(None),
            // Note: silently drop what is most likely a broken symlink.
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(ErrorKind::from_io(e, &path).into()),
        }
    }
}

/// `*.whl`: anything (including nothing) followed by the extension.
fn is_wheel_name(name: &str) -> bool {
    name.strip_suffix(WHEEL_EXTENSION).is_some_and(|stem| stem.ends_with('.'))
}
