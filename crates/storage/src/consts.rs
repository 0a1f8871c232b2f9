/// File extension (without the dot) that marks a file as a wheel.
pub const WHEEL_EXTENSION: &str = "whl";
/// Name of every generated index file, both per-package and at the root.
pub const INDEX_FILE: &str = "index.html";
/// Read size used when hashing wheels.
pub const CHUNK_SIZE: usize = 4096;
