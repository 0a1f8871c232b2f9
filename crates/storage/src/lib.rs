//! Filesystem side of a wheel mirror.
//!
//! A [`MirrorRoot`] is a directory holding one subdirectory per package, each
//! containing the package's `.whl` files. This crate discovers those
//! [`Package`]s, hashes their [`WheelFile`]s with SHA-256 and writes the
//! generated `index.html` files back into the tree. It knows nothing about
//! HTML; that lives in `wheelhouse-render`.

pub mod consts;
mod digest;
pub mod error;
mod mirror;
mod models;

pub use crate::digest::{sha256_file, sha256_reader};
pub use crate::mirror::MirrorRoot;
pub use crate::models::{Package, WheelFile};
