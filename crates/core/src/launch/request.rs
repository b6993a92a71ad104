use std::path::PathBuf;

use crate::framework::{FrameworkInstance, SelectedBundle};

/// Everything needed to assemble the launch parameters for one run of a framework.
/// A request is created per run and consumed once
#[derive(Debug, Clone)]
pub struct LaunchRequest {
	/// The framework instance to run
	pub framework: FrameworkInstance,
	/// A runtime to use instead of the configured default. When this is set it must
	/// point at a valid installation, there is no fallback
	pub alternative_runtime: Option<String>,
	/// Where the framework runs
	pub working_dir: WorkingDirPolicy,
	/// Bundles selected to run on top of the framework's own system bundles
	pub bundles: Vec<SelectedBundle>,
	/// Whether every selected bundle is also put on the classpath
	pub include_all_bundles_in_classpath: bool,
	/// Whether to start an interactive console in the framework
	pub start_console: bool,
	/// Whether the framework start level is derived from the bundles' start levels
	pub auto_start_level: bool,
	/// Whether the framework should discard its persisted state on start
	pub clean_start: bool,
	/// Whether the framework should run with extra debug output
	pub debug_mode: bool,
	/// Raw VM parameter string
	pub vm_parameters: String,
	/// Raw program parameter string
	pub program_parameters: String,
	/// Packages delegated to the boot class loader
	pub boot_delegation: String,
	/// Extra packages exported by the system bundle
	pub system_packages: String,
	/// Start level for bundles that don't have their own
	pub default_start_level: u32,
	/// Framework start level used when it is not derived automatically
	pub framework_start_level: u32,
}

impl LaunchRequest {
	/// Create a request for a framework with default settings
	pub fn new(framework: FrameworkInstance) -> Self {
		Self {
			framework,
			alternative_runtime: None,
			working_dir: WorkingDirPolicy::Generate,
			bundles: Vec::new(),
			include_all_bundles_in_classpath: true,
			start_console: false,
			auto_start_level: true,
			clean_start: false,
			debug_mode: false,
			vm_parameters: String::new(),
			program_parameters: String::new(),
			boot_delegation: String::new(),
			system_packages: String::new(),
			default_start_level: 1,
			framework_start_level: 1,
		}
	}

	/// Get the start level of a bundle, falling back to the default start level
	pub fn bundle_start_level(&self, bundle: &SelectedBundle) -> u32 {
		bundle.start_level.unwrap_or(self.default_start_level)
	}

	/// Get the framework start level for the bundles selected in this request
	pub fn framework_start_level(&self) -> u32 {
		framework_start_level(self, &self.bundles)
	}
}

/// Get the framework start level for a set of bundles. With automatic start levels
/// this is the highest start level of any of the bundles, so that every bundle
/// gets started. Otherwise it is the level set on the request
pub fn framework_start_level(request: &LaunchRequest, bundles: &[SelectedBundle]) -> u32 {
	if request.auto_start_level {
		bundles
			.iter()
			.map(|x| request.bundle_start_level(x))
			.max()
			.unwrap_or(0)
	} else {
		request.framework_start_level
	}
}

/// How the working directory for a run is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingDirPolicy {
	/// Create a fresh, uniquely named directory that is removed on dispose
	Generate,
	/// Use this directory, creating it if needed. It is never removed
	Explicit(PathBuf),
}
