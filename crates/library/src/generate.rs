//! Whole-mirror index generation.
//!
//! A run is a full rebuild: every wheel is re-hashed and every `index.html`
//! rewritten. Packages are processed one at a time in path order. A failure
//! stops the run where it happens; package indexes already written stay
//! written, later ones keep whatever they had before, and the root index is
//! not touched.
//!
//! Two runs against the same root at once will race on the index files. That
//! isn't guarded against.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tracing::instrument;
use wheelhouse_render::{IndexRenderer, WheelLink};
use wheelhouse_storage::{MirrorRoot, Package, sha256_file};

/// What a successful run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Original-case names of the packages that got an index, in the order
    /// they were processed.
    pub packages: Vec<String>,
    /// Number of wheels hashed across all packages.
    pub wheels: usize,
}

/// Regenerates every index file under `root`.
///
/// # Errors
///
/// - [`ErrorKind::Filesystem`] if `root` is missing or not a directory. Nothing
///   has been written at that point.
/// - [`ErrorKind::Io`] if the tree can't be listed, a wheel can't be read or an
///   index can't be written.
/// - [`ErrorKind::Render`] if a page fails to render.
#[instrument(skip_all, fields(root = %root.as_ref().display()))]
pub fn generate(root: impl AsRef<Path>) -> Result<Report> {
    let mirror = MirrorRoot::open(root.as_ref()).or_raise(|| ErrorKind::Filesystem)?;
    let renderer = IndexRenderer::new().or_raise(|| ErrorKind::Render)?;
    let packages = mirror.packages().or_raise(|| ErrorKind::Io)?;
    tracing::debug!(count = packages.len(), "Mirror scanned");

    let mut report = Report::default();
    for package in &packages {
        index_package(&mirror, &renderer, package)?;
        report.wheels += package.wheels().len();
        report.packages.push(package.name.clone());
    }

    let html = renderer.root_index(&report.packages).or_raise(|| ErrorKind::Render)?;
    let path = mirror.write_root_index(&html).or_raise(|| ErrorKind::Io)?;
    tracing::info!(
        path = %path.display(),
        packages = report.packages.len(),
        wheels = report.wheels,
        "Root index written"
    );
    Ok(report)
}

/// Hashes, renders and writes the index for a single package.
///
/// The page is built completely in memory before the file is opened, so a
/// wheel that can't be read leaves any existing `index.html` untouched.
/// Returns the path written.
#[instrument(skip_all, fields(package = %package.name))]
pub fn index_package(mirror: &MirrorRoot, renderer: &IndexRenderer, package: &Package) -> Result<PathBuf> {
    let mut links = Vec::with_capacity(package.wheels().len());
    for wheel in package.wheels() {
        let sha256 = sha256_file(&wheel.path).or_raise(|| ErrorKind::Io)?;
        tracing::debug!(wheel = %wheel.name, sha256 = %sha256, "Wheel hashed");
        links.push(WheelLink::new(&wheel.name, sha256));
    }
    let html = renderer.package_index(&links).or_raise(|| ErrorKind::Render)?;
    let path = mirror.write_index(&package.path, &html).or_raise(|| ErrorKind::Io)?;
    tracing::info!(path = %path.display(), wheels = links.len(), "Package index written");
    Ok(path)
}
