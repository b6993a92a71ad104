use std::path::PathBuf;

use serde::Serialize;

use crate::framework::SelectedBundle;
use crate::io::java::args::{parse_parameters, property_arg};
use crate::io::java::classpath::Classpath;
use crate::io::java::install::JavaInstallation;

/// Fully resolved parameters for launching a framework process. These are
/// handed to a process launcher and then discarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchResult {
	/// The runtime to launch with
	pub java: JavaInstallation,
	/// The directory the process runs in. It exists once the result is created
	pub working_dir: PathBuf,
	/// The classpath, with the framework's system libraries first
	pub classpath: Classpath,
	/// Bundles the framework should install, console bundles first
	pub bundles: Vec<SelectedBundle>,
	/// Whether the launcher should pass VM options through a file because the list
	/// may be too long for a command line
	pub use_dynamic_vm_options: bool,
	/// Arguments for the JVM
	pub vm_args: Vec<String>,
	/// Arguments for the framework's main class
	pub program_args: Vec<String>,
	/// The main class to run
	pub main_class: Option<String>,
}

impl LaunchResult {
	/// Create empty parameters for a runtime and working directory
	pub fn new(java: JavaInstallation, working_dir: PathBuf) -> Self {
		Self {
			java,
			working_dir,
			classpath: Classpath::new(),
			bundles: Vec::new(),
			use_dynamic_vm_options: false,
			vm_args: Vec::new(),
			program_args: Vec::new(),
			main_class: None,
		}
	}

	/// Add a JVM system property
	pub fn add_property(&mut self, name: &str, value: impl AsRef<str>) {
		self.vm_args.push(property_arg(name, value.as_ref()));
	}

	/// Parse a parameter string and add the arguments to the JVM arguments
	pub fn add_vm_parameters_string(&mut self, string: &str) {
		self.vm_args.extend(parse_parameters(string));
	}

	/// Parse a parameter string and add the arguments to the program arguments
	pub fn add_program_parameters_string(&mut self, string: &str) {
		self.program_args.extend(parse_parameters(string));
	}
}
