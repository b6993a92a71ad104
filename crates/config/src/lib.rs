#![warn(missing_docs)]

//! This crate contains serde structs for osgirun run configurations, along with
//! reading them from files and turning them into launch requests

/// Bundle configuration
pub mod bundle;
/// Process launch configuration
pub mod launch;

use std::path::{Path, PathBuf};

use anyhow::Context;
use bundle::BundleConfig;
use launch::{Args, LaunchConfig};
use osgirun_core::framework::{FrameworkInstance, FrameworkKind};
use osgirun_core::launch::{LaunchRequest, WorkingDirPolicy};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration for running a framework
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RunConfig {
	/// The framework installation to run
	pub framework: FrameworkConfig,
	/// Path to a runtime to use instead of the default one
	#[serde(default)]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub runtime: Option<String>,
	/// The directory to run in. A fresh directory is generated if this is not set
	#[serde(default)]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub working_dir: Option<String>,
	/// Bundles to run on top of the framework
	#[serde(default)]
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub bundles: Vec<BundleConfig>,
	/// Whether to put every bundle on the classpath as well
	#[serde(default = "default_true")]
	pub include_all_bundles_in_classpath: bool,
	/// Whether to start an interactive console
	#[serde(default)]
	pub start_console: bool,
	/// Whether to derive the framework start level from the bundles
	#[serde(default = "default_true")]
	pub auto_start_level: bool,
	/// Whether to discard persisted framework state on start
	#[serde(default)]
	pub clean_start: bool,
	/// Whether to run the framework with extra debug output
	#[serde(default)]
	pub debug_mode: bool,
	/// Arguments for the JVM
	#[serde(default)]
	#[serde(skip_serializing_if = "Args::is_empty")]
	pub vm_args: Args,
	/// Arguments for the framework
	#[serde(default)]
	#[serde(skip_serializing_if = "Args::is_empty")]
	pub program_args: Args,
	/// Packages delegated to the boot class loader
	#[serde(default)]
	#[serde(skip_serializing_if = "String::is_empty")]
	pub boot_delegation: String,
	/// Extra packages exported by the system bundle
	#[serde(default)]
	#[serde(skip_serializing_if = "String::is_empty")]
	pub system_packages: String,
	/// Start level for bundles without their own
	#[serde(default = "default_start_level")]
	pub default_start_level: u32,
	/// Start level of the framework when it is not derived
	#[serde(default = "default_start_level")]
	pub framework_start_level: u32,
	/// Options for the framework process
	#[serde(default)]
	pub launch: LaunchConfig,
	/// The directory that relative paths are resolved against
	#[serde(skip)]
	pub base_dir: Option<PathBuf>,
}

/// Configuration for the framework installation
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FrameworkConfig {
	/// The framework family
	#[serde(rename = "type")]
	pub kind: FrameworkKind,
	/// The folder the framework is installed in
	pub path: String,
	/// A display name for the installation
	#[serde(default)]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

fn default_true() -> bool {
	true
}

fn default_start_level() -> u32 {
	1
}

impl RunConfig {
	/// Read a run configuration from a JSON file. Relative paths in the
	/// configuration are resolved against the file's directory
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let contents = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read run configuration '{}'", path.display()))?;
		let mut config = Self::parse(&contents)
			.with_context(|| format!("Failed to parse run configuration '{}'", path.display()))?;
		config.base_dir = path.parent().map(Path::to_path_buf);

		Ok(config)
	}

	/// Parse a run configuration from JSON
	pub fn parse(contents: &str) -> anyhow::Result<Self> {
		serde_json::from_str(contents).context("Invalid run configuration")
	}

	/// Create the launch request for this configuration
	pub fn to_request(&self) -> LaunchRequest {
		let base_dir = self.base_dir.clone().unwrap_or_default();
		let resolve = |path: &str| base_dir.join(path);

		let base_folder = resolve(&self.framework.path);
		let name = self.framework.name.clone().unwrap_or_else(|| {
			base_folder
				.file_name()
				.map(|x| x.to_string_lossy().into_owned())
				.unwrap_or_else(|| self.framework.kind.to_string())
		});

		let mut request = LaunchRequest::new(FrameworkInstance::new(
			name,
			self.framework.kind,
			base_folder,
		));
		request.alternative_runtime = self
			.runtime
			.as_deref()
			.map(|x| resolve(x).to_string_lossy().into_owned());
		request.working_dir = match &self.working_dir {
			Some(dir) => WorkingDirPolicy::Explicit(resolve(dir)),
			None => WorkingDirPolicy::Generate,
		};
		request.bundles = self
			.bundles
			.iter()
			.map(|x| x.to_selected(&base_dir))
			.collect();
		request.include_all_bundles_in_classpath = self.include_all_bundles_in_classpath;
		request.start_console = self.start_console;
		request.auto_start_level = self.auto_start_level;
		request.clean_start = self.clean_start;
		request.debug_mode = self.debug_mode;
		request.vm_parameters = self.vm_args.to_parameter_string();
		request.program_parameters = self.program_args.to_parameter_string();
		request.boot_delegation = self.boot_delegation.clone();
		request.system_packages = self.system_packages.clone();
		request.default_start_level = self.default_start_level;
		request.framework_start_level = self.framework_start_level;

		request
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = RunConfig::parse(r#"{ "framework": { "type": "felix", "path": "/opt/felix" } }"#)
			.expect("Failed to parse");
		let request = config.to_request();
		assert_eq!(request.framework.kind, FrameworkKind::Felix);
		assert_eq!(request.framework.name, "felix");
		assert_eq!(request.framework.base_folder, PathBuf::from("/opt/felix"));
		assert_eq!(request.working_dir, WorkingDirPolicy::Generate);
		assert!(request.alternative_runtime.is_none());
		assert!(request.include_all_bundles_in_classpath);
		assert!(!request.start_console);
		assert!(request.auto_start_level);
		assert!(!request.clean_start);
		assert_eq!(request.default_start_level, 1);
		assert_eq!(request.framework_start_level, 1);
		assert!(request.vm_parameters.is_empty());
		assert!(request.bundles.is_empty());
	}

	#[test]
	fn test_missing_framework() {
		assert!(RunConfig::parse(r#"{ "bundles": [] }"#).is_err());
		assert!(RunConfig::parse(r#"{ "framework": { "type": "jboss", "path": "/x" } }"#).is_err());
	}

	#[test]
	fn test_load_resolves_relative_paths() {
		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		let path = tmp.path().join("run.json");
		std::fs::write(
			&path,
			r#"{
				"framework": { "type": "equinox", "path": "equinox", "name": "Equinox 3.18" },
				"runtime": "jdk",
				"working_dir": "work",
				"bundles": ["bundles/a.jar", { "url": "http://repo/b.jar", "start_level": 4 }],
				"start_console": true,
				"auto_start_level": false,
				"framework_start_level": 6,
				"vm_args": ["-Xmx512m", "-Dtitle=My App"],
				"program_args": "-dev bin",
				"boot_delegation": "sun.*"
			}"#,
		)
		.expect("Failed to write config");

		let config = RunConfig::load(&path).expect("Failed to load");
		let request = config.to_request();
		assert_eq!(request.framework.name, "Equinox 3.18");
		assert_eq!(request.framework.base_folder, tmp.path().join("equinox"));
		assert_eq!(
			request.alternative_runtime,
			Some(tmp.path().join("jdk").to_string_lossy().into_owned())
		);
		assert_eq!(
			request.working_dir,
			WorkingDirPolicy::Explicit(tmp.path().join("work"))
		);
		assert_eq!(request.bundles.len(), 2);
		assert_eq!(
			request.bundles[0].get_path(),
			Some(tmp.path().join("bundles/a.jar"))
		);
		assert_eq!(request.bundles[1].start_level, Some(4));
		assert!(request.start_console);
		assert_eq!(request.framework_start_level(), 6);
		assert_eq!(request.vm_parameters, "-Xmx512m \"-Dtitle=My App\"");
		assert_eq!(request.program_parameters, "-dev bin");
		assert_eq!(request.boot_delegation, "sun.*");
	}

	#[test]
	fn test_load_missing_file() {
		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		let err = RunConfig::load(&tmp.path().join("missing.json")).expect_err("Load should fail");
		assert!(err.to_string().contains("missing.json"));
	}
}
