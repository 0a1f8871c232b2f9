pub mod error;
mod generate;

pub use crate::generate::{Report, generate, index_package};
