#![warn(missing_docs)]

//! osgirun assembles and launches JVM parameters for OSGi framework installations.
//! This crate ties together the core builder, the run configuration format, and
//! the environment that a launch happens in

pub use osgirun_config as config;
pub use osgirun_core as core;
pub use osgirun_shared as shared;

/// Configuration derived from the user's environment
pub mod env;
/// Building, launching and cleaning up runs
pub mod session;

pub use env::environment_configuration;
pub use session::RunSession;

/// The version of the osgirun library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
