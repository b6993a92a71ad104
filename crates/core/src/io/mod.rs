/// Utilities for dealing with the filesystem
pub mod files;
/// Interaction with some of Java's formats
pub mod java;
/// Conversion between bundle URLs and local paths
pub mod url;
