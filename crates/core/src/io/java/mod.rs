/// Creation and parsing of Java arguments
pub mod args;
/// Use of Java's classpath format
pub mod classpath;
/// Java runtime installations
pub mod install;
