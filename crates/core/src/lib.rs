#![warn(missing_docs)]

//! This library assembles the parameters for launching an OSGi framework on a JVM: the runtime,
//! working directory, classpath, VM and program arguments, and main class. Support for the
//! Equinox, Felix and Knopflerfish families is built in, and more can be registered through the
//! [`FrameworkIntegrator`](framework::FrameworkIntegrator) trait.

/// Configuration for library functionality
pub mod config;
/// Errors for launch parameter building
pub mod error;
/// OSGi framework families and their bundles
pub mod framework;
/// Input / output with data formats and the system
pub mod io;
/// Assembling launch parameters and launching the framework
pub mod launch;

pub use config::{ConfigBuilder, Configuration, ProxySettings};
pub use error::LaunchError;
pub use framework::{FrameworkInstance, FrameworkKind, FrameworkRegistry, SelectedBundle};
pub use io::files::paths::Paths;
pub use io::java::install::JavaInstallation;
pub use launch::{
	launch_process, FrameworkHandle, LaunchParameterBuilder, LaunchRequest, LaunchResult,
	ProcessConfiguration, WorkingDirPolicy, WrapperCommand,
};
