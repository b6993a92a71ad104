/// Configuration for how the framework process is started
mod configuration;
/// Actual launching of the framework process
mod process;
/// Launch requests and start levels
mod request;
/// Assembled launch parameters
mod result;
/// Working directories for runs
mod working_dir;

use std::path::{Path, PathBuf};

use osgirun_shared::output::{MessageContents, MessageLevel, OsgiRunOutput};
use osgirun_shared::util::is_blank;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::Configuration;
use crate::error::LaunchError;
use crate::framework::{
	FrameworkBundleKind, FrameworkBundleProvider, FrameworkLaunchExtension, FrameworkRegistry,
};
use crate::io::files::remove_dir_async;
use crate::io::java::install::JavaInstallation;

pub use self::configuration::{ProcessConfigBuilder, ProcessConfiguration, WrapperCommand};
pub use self::process::{launch_process, FrameworkHandle};
pub use self::request::{framework_start_level, LaunchRequest, WorkingDirPolicy};
pub use self::result::LaunchResult;
pub use self::working_dir::generate_run_dir_name;

/// System property for packages that are loaded from the boot class loader
pub const BOOT_DELEGATION_PROPERTY: &str = "org.osgi.framework.bootdelegation";
/// System property for extra packages exported by the system bundle
pub const SYSTEM_PACKAGES_PROPERTY: &str = "org.osgi.framework.system.packages.extra";

/// Turns launch requests into launch parameters. The only state it keeps between
/// builds is the list of working directories it generated, so that they can be
/// cleaned up with [`dispose`](Self::dispose) once the framework has exited
pub struct LaunchParameterBuilder {
	config: Configuration,
	registry: FrameworkRegistry,
	generated_dirs: Vec<PathBuf>,
}

impl LaunchParameterBuilder {
	/// Create a new builder
	pub fn new(config: Configuration, registry: FrameworkRegistry) -> Self {
		Self {
			config,
			registry,
			generated_dirs: Vec::new(),
		}
	}

	/// Get the configuration that the builder uses
	pub fn get_config(&self) -> &Configuration {
		&self.config
	}

	/// Get the framework registry that the builder uses
	pub fn get_registry(&self) -> &FrameworkRegistry {
		&self.registry
	}

	/// Get the working directories this builder has generated and not yet disposed of
	pub fn get_generated_dirs(&self) -> &[PathBuf] {
		&self.generated_dirs
	}

	/// Validate a request and assemble the parameters for launching it
	pub fn build(
		&mut self,
		request: &LaunchRequest,
		o: &mut impl OsgiRunOutput,
	) -> Result<LaunchResult, LaunchError> {
		let integrator = self
			.registry
			.get(request.framework.kind)
			.ok_or(LaunchError::NoFrameworkIntegration(request.framework.kind))?;

		// Runtime
		let java = self.resolve_runtime(request)?;
		o.display(
			MessageContents::Property(
				"Runtime".into(),
				Box::new(MessageContents::Path(
					java.get_path().to_string_lossy().into(),
				)),
			),
			MessageLevel::Debug,
		);

		// Working directory
		let working_dir = match &request.working_dir {
			WorkingDirPolicy::Generate => self.config.run_dir.join(generate_run_dir_name()),
			WorkingDirPolicy::Explicit(path) => path.clone(),
		};
		let working_dir = working_dir::prepare_working_dir(&working_dir)?;
		if let WorkingDirPolicy::Generate = request.working_dir {
			self.generated_dirs.push(working_dir.clone());
		}
		o.display(
			MessageContents::Property(
				"Working directory".into(),
				Box::new(MessageContents::Path(
					working_dir.to_string_lossy().into(),
				)),
			),
			MessageLevel::Debug,
		);

		let mut result = LaunchResult::new(java, working_dir);

		// Classpath
		let system_bundles = integrator
			.get_framework_bundles(&request.framework, FrameworkBundleKind::System)
			.map_err(LaunchError::BundleLookup)?;
		if system_bundles.is_empty() {
			return Err(LaunchError::MissingSystemLibraries);
		}
		for bundle in &system_bundles {
			let path = bundle
				.get_path()
				.ok_or(LaunchError::MissingSystemLibraries)?;
			result.classpath.add_path(path);
		}

		let mut bundles = request.bundles.clone();
		if request.start_console {
			let shell_bundles = integrator
				.get_framework_bundles(&request.framework, FrameworkBundleKind::Shell)
				.map_err(LaunchError::BundleLookup)?;
			if shell_bundles.is_empty() {
				return Err(LaunchError::MissingConsoleLibraries);
			}
			let mut with_shell = shell_bundles;
			with_shell.extend(bundles);
			bundles = with_shell;
		}

		if request.include_all_bundles_in_classpath {
			for bundle in &bundles {
				if let Some(path) = bundle.get_path() {
					result.classpath.add_path(path);
				} else {
					o.display(
						MessageContents::Associated(
							Box::new(MessageContents::Simple(bundle.name.clone())),
							Box::new(MessageContents::Simple(
								"Bundle has no location and was left off the classpath".into(),
							)),
						),
						MessageLevel::Debug,
					);
				}
			}
		}

		// Runner options
		result.use_dynamic_vm_options = !bundles.is_empty();
		result.bundles = bundles;

		result.vm_args.extend(self.config.proxy.jvm_args());
		result.add_vm_parameters_string(&request.vm_parameters);

		if !is_blank(&request.program_parameters) {
			result.add_program_parameters_string(&request.program_parameters);
		}

		if !is_blank(&request.boot_delegation) {
			result.add_property(BOOT_DELEGATION_PROPERTY, &request.boot_delegation);
		}

		if !is_blank(&request.system_packages) {
			result.add_property(SYSTEM_PACKAGES_PROPERTY, &request.system_packages);
		}

		// Framework-specific options
		integrator
			.extend(&mut result, request)
			.map_err(LaunchError::FrameworkSetup)?;

		Ok(result)
	}

	/// Find the runtime to launch with
	fn resolve_runtime(&self, request: &LaunchRequest) -> Result<JavaInstallation, LaunchError> {
		match &request.alternative_runtime {
			Some(path) => {
				if is_blank(path) {
					return Err(LaunchError::NoRuntimeConfigured);
				}
				JavaInstallation::from_path(Path::new(path.trim()))
					.ok_or(LaunchError::NoRuntimeConfigured)
			}
			None => self
				.config
				.default_runtime
				.clone()
				.ok_or(LaunchError::NoRuntimeConfigured),
		}
	}

	/// Remove the working directories generated by this builder. Removal happens in
	/// the background and failures are ignored. When called inside a Tokio runtime,
	/// the removal task is spawned on it and its handle is returned. The handle can be
	/// awaited to wait for removal, but doesn't have to be. Outside of a runtime, a
	/// detached thread does the removal and nothing is returned
	pub fn dispose(&mut self) -> Option<JoinHandle<()>> {
		if self.generated_dirs.is_empty() {
			return None;
		}

		let dirs = std::mem::take(&mut self.generated_dirs);
		match Handle::try_current() {
			Ok(handle) => Some(handle.spawn(async move {
				for dir in dirs {
					let _ = remove_dir_async(&dir).await;
				}
			})),
			Err(..) => {
				std::thread::spawn(move || {
					for dir in dirs {
						let _ = std::fs::remove_dir_all(dir);
					}
				});
				None
			}
		}
	}
}
