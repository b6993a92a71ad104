#![warn(missing_docs)]

//! Shared output and utility code for the osgirun crates

/// Output messages and the trait that displays them
pub mod output;
/// Common utilities
pub mod util;
