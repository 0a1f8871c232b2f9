//! Simple-index HTML generation.
//!
//! Two fixed pages make up a mirror: one per package listing its wheels with a
//! `#sha256=` integrity fragment, and one at the root listing every package.
//! Both are rendered by [`IndexRenderer`] from structured input and never
//! touch the filesystem.

pub mod error;
mod template;

pub use crate::template::{IndexRenderer, WheelLink};
