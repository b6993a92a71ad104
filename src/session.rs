use anyhow::Context;
use osgirun_config::RunConfig;
use osgirun_core::framework::FrameworkRegistry;
use osgirun_core::launch::{launch_process, FrameworkHandle, LaunchParameterBuilder, LaunchResult};
use osgirun_core::Configuration;
use osgirun_shared::output::{MessageContents, MessageLevel, OsgiRunOutput, OutputProcess};
use tokio::task::JoinHandle;

/// A series of runs that share one parameter builder. Working directories
/// generated for the runs stay around until the session is finished
pub struct RunSession {
	builder: LaunchParameterBuilder,
}

impl RunSession {
	/// Create a session with the built-in framework integrations
	pub fn new(config: Configuration) -> Self {
		Self::with_registry(config, FrameworkRegistry::with_builtin())
	}

	/// Create a session with a custom set of framework integrations
	pub fn with_registry(config: Configuration, registry: FrameworkRegistry) -> Self {
		Self {
			builder: LaunchParameterBuilder::new(config, registry),
		}
	}

	/// Get the parameter builder of this session
	pub fn get_builder(&mut self) -> &mut LaunchParameterBuilder {
		&mut self.builder
	}

	/// Create the launch parameters for a run configuration
	pub fn build(
		&mut self,
		run: &RunConfig,
		o: &mut impl OsgiRunOutput,
	) -> anyhow::Result<LaunchResult> {
		let request = run.to_request();
		self.builder.build(&request, o).with_context(|| {
			format!(
				"Failed to create launch parameters for '{}'",
				request.framework.name
			)
		})
	}

	/// Create the launch parameters for a run configuration and start the framework
	pub fn launch(
		&mut self,
		run: &RunConfig,
		o: &mut impl OsgiRunOutput,
	) -> anyhow::Result<(LaunchResult, FrameworkHandle)> {
		let result = {
			let mut process = OutputProcess::new(o);
			process.0.display(
				MessageContents::StartProcess("Preparing launch".into()),
				MessageLevel::Important,
			);
			self.build(run, &mut *process.0)?
		};

		let config = self.builder.get_config();
		let mut process_config = run.launch.to_process_config();
		process_config.censor_secrets = config.censor_secrets();
		process_config.secrets = config
			.get_proxy()
			.secrets()
			.into_iter()
			.map(String::from)
			.collect();

		o.display(
			MessageContents::StartProcess("Launching framework".into()),
			MessageLevel::Important,
		);
		let handle =
			launch_process(&result, &process_config, o).context("Failed to launch framework")?;
		o.display(
			MessageContents::Success(format!("Framework started with PID {}", handle.get_pid())),
			MessageLevel::Extra,
		);

		Ok((result, handle))
	}

	/// Start removing the working directories generated during this session.
	/// A handle is only returned when called inside a Tokio runtime
	pub fn dispose(&mut self) -> Option<JoinHandle<()>> {
		self.builder.dispose()
	}

	/// Finish the session, waiting for its generated working directories to be removed
	pub async fn finish(mut self) {
		if let Some(handle) = self.dispose() {
			let _ = handle.await;
		}
	}
}

#[cfg(all(test, unix))]
mod tests {
	use std::os::unix::fs::PermissionsExt;
	use std::path::Path;

	use osgirun_core::JavaInstallation;
	use osgirun_shared::output::NoOp;

	use super::*;

	fn create_runtime(dir: &Path) {
		std::fs::create_dir_all(dir.join("bin")).expect("Failed to create runtime dir");
		let java = dir.join("bin/java");
		std::fs::write(&java, "#!/bin/sh\nexit 0\n").expect("Failed to write fake java");
		std::fs::set_permissions(&java, std::fs::Permissions::from_mode(0o755))
			.expect("Failed to set permissions");
	}

	#[tokio::test]
	async fn test_felix_session() {
		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		let root = tmp.path();
		create_runtime(&root.join("jdk"));
		std::fs::create_dir_all(root.join("felix/bin")).expect("Failed to create framework");
		std::fs::create_dir_all(root.join("felix/bundle")).expect("Failed to create framework");
		std::fs::write(root.join("felix/bin/felix.jar"), "").expect("Failed to write jar");
		std::fs::write(
			root.join("felix/bundle/org.apache.felix.gogo.shell-1.1.4.jar"),
			"",
		)
		.expect("Failed to write jar");

		let config = Configuration::builder()
			.run_dir(root.join("run"))
			.default_runtime(Some(JavaInstallation::new(root.join("jdk"))))
			.build();
		let mut run = RunConfig::parse(
			r#"{
				"framework": { "type": "felix", "path": "felix" },
				"bundles": ["app.jar"],
				"start_console": true
			}"#,
		)
		.expect("Failed to parse");
		run.base_dir = Some(root.to_path_buf());

		let mut session = RunSession::new(config);
		let result = session.build(&run, &mut NoOp).expect("Build failed");
		assert_eq!(
			result.main_class.as_deref(),
			Some(osgirun_core::framework::felix::MAIN_CLASS)
		);
		assert_eq!(result.classpath.entries()[0], root.join("felix/bin/felix.jar"));
		assert_eq!(result.bundles.len(), 2);
		assert_eq!(result.bundles[0].name, "org.apache.felix.gogo.shell-1.1.4");
		assert!(result.working_dir.starts_with(root.join("run")));
		assert!(result.working_dir.is_dir());

		session.finish().await;
		assert!(!result.working_dir.exists());
	}
}
