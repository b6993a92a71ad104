use std::collections::HashMap;

use osgirun_core::launch::{ProcessConfiguration, WrapperCommand};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Different representations for VM / program arguments
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(untagged)]
pub enum Args {
	/// A list of separate arguments
	List(Vec<String>),
	/// A single string of arguments, split like a shell would
	String(String),
}

impl Args {
	/// Get the arguments as a single parameter string. List items that contain
	/// whitespace or quotes are quoted so that they stay single arguments
	pub fn to_parameter_string(&self) -> String {
		match self {
			Self::String(string) => string.clone(),
			Self::List(list) => list
				.iter()
				.map(|arg| {
					if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"') {
						format!("\"{}\"", arg.replace('"', "\\\""))
					} else {
						arg.clone()
					}
				})
				.collect::<Vec<_>>()
				.join(" "),
		}
	}

	/// Whether there are no arguments
	pub fn is_empty(&self) -> bool {
		match self {
			Self::List(list) => list.is_empty(),
			Self::String(string) => string.trim().is_empty(),
		}
	}
}

impl Default for Args {
	fn default() -> Self {
		Self::List(Vec::new())
	}
}

/// Configuration for starting the framework process
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct LaunchConfig {
	/// Environment variables
	#[serde(skip_serializing_if = "HashMap::is_empty")]
	pub env: HashMap<String, String>,
	/// Wrapper commands, innermost first
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub wrappers: Vec<WrapperConfig>,
}

impl LaunchConfig {
	/// Convert to the configuration for the process launcher
	pub fn to_process_config(&self) -> ProcessConfiguration {
		let mut builder = ProcessConfiguration::builder().env(self.env.clone());
		for wrapper in &self.wrappers {
			builder = builder.wrapper(WrapperCommand {
				cmd: wrapper.cmd.clone(),
				args: wrapper.args.clone(),
			});
		}
		builder.build()
	}
}

/// A wrapper command
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WrapperConfig {
	/// The command to run
	pub cmd: String,
	/// The command's arguments
	#[serde(default)]
	pub args: Vec<String>,
}
