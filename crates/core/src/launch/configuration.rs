use std::collections::HashMap;

/// Options for starting the framework process that are not part of the launch
/// parameters themselves
#[derive(Debug, Clone, Default)]
pub struct ProcessConfiguration {
	/// Environment variables
	pub env: HashMap<String, String>,
	/// Wrapper commands
	pub wrappers: Vec<WrapperCommand>,
	/// Whether to censor proxy credentials when echoing the command
	pub censor_secrets: bool,
	/// Secret values to censor when echoing the command
	pub secrets: Vec<String>,
}

impl ProcessConfiguration {
	/// Create a new ProcessConfiguration with default settings
	pub fn new() -> Self {
		Self {
			censor_secrets: true,
			..Default::default()
		}
	}

	/// Get a builder for the configuration
	pub fn builder() -> ProcessConfigBuilder {
		ProcessConfigBuilder::new()
	}
}

/// Builder for the process configuration
pub struct ProcessConfigBuilder {
	config: ProcessConfiguration,
}

impl ProcessConfigBuilder {
	/// Start a new builder with default configuration
	pub fn new() -> Self {
		Self {
			config: ProcessConfiguration::new(),
		}
	}

	/// Finish building and get the configuration
	pub fn build(self) -> ProcessConfiguration {
		self.config
	}

	/// Set environment variables for the command
	pub fn env(mut self, env: HashMap<String, String>) -> Self {
		self.config.env = env;
		self
	}

	/// Add a wrapper command that encloses the normal command
	pub fn wrapper(mut self, wrapper: WrapperCommand) -> Self {
		self.config.wrappers.push(wrapper);
		self
	}

	/// Set whether to censor secrets when echoing the command
	pub fn censor_secrets(mut self, censor_secrets: bool) -> Self {
		self.config.censor_secrets = censor_secrets;
		self
	}

	/// Add a secret value that is censored when echoing the command
	pub fn secret(mut self, secret: impl Into<String>) -> Self {
		self.config.secrets.push(secret.into());
		self
	}
}

impl Default for ProcessConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// A wrapper command that can be used to
/// enclose the normal launch command in another
/// program, such as a profiler or `nice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperCommand {
	/// The command to run
	pub cmd: String,
	/// The command's arguments. These will be put before the
	/// normal launch command.
	pub args: Vec<String>,
}
