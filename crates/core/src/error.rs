use std::path::PathBuf;

use crate::framework::FrameworkKind;

/// An error that stops launch parameters from being created. None of these
/// are retried, and no partial parameters are ever produced
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
	/// Neither the alternative runtime nor the default runtime could be used
	#[error("No Java runtime configured. Set an alternative runtime or configure a default one")]
	NoRuntimeConfigured,
	/// The working directory did not exist and could not be created
	#[error("Cannot create work directory '{}'", path.display())]
	CannotCreateWorkingDirectory {
		/// The directory that was attempted
		path: PathBuf,
		/// The underlying filesystem error
		#[source]
		source: std::io::Error,
	},
	/// The libraries that bootstrap the framework were not found
	#[error("Libraries required to start the framework not found - please check the installation")]
	MissingSystemLibraries,
	/// A console was requested but the installation has no shell bundles
	#[error("Console requested but no shell bundles can be found - please check the installation")]
	MissingConsoleLibraries,
	/// There is no integration registered for the framework family
	#[error("No integration is registered for the {0} framework")]
	NoFrameworkIntegration(FrameworkKind),
	/// The framework installation could not be searched for bundles
	#[error("Failed to look up framework bundles")]
	BundleLookup(#[source] anyhow::Error),
	/// The framework-specific setup hook failed
	#[error("Failed to set up framework-specific launch parameters")]
	FrameworkSetup(#[source] anyhow::Error),
}
