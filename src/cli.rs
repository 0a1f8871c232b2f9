//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Generate a static PyPI simple index for a directory of wheels.
///
/// Expects one subdirectory per package, each holding that package's `.whl`
/// files. Writes `index.html` into every package directory that has wheels and
/// one more at the top level linking to them all. Existing index files are
/// overwritten.
#[derive(Debug, Parser)]
#[command(name = "wheelhouse", version)]
pub struct Args {
    /// The directory path for the wheels mirror.
    #[arg(short = 'd', value_name = "DIRECTORY")]
    pub directory: PathBuf,
}
