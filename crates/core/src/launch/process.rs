use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::Command;

use anyhow::Context;
use osgirun_shared::output::{MessageContents, MessageLevel, OsgiRunOutput};

use super::{LaunchResult, ProcessConfiguration, WrapperCommand};

/// Name of the file in the working directory that JVM options are written to
/// when they are passed dynamically
pub const VM_ARGS_FILE: &str = "vm.args";

/// Launch the framework process
pub fn launch_process(
	result: &LaunchResult,
	config: &ProcessConfiguration,
	o: &mut impl OsgiRunOutput,
) -> anyhow::Result<FrameworkHandle> {
	let main_class = result
		.main_class
		.as_deref()
		.context("Launch parameters do not have a main class")?;

	let jvm = result.java.get_jvm_path();
	let mut cmd = create_wrapped_command(jvm.as_os_str(), &config.wrappers);

	cmd.current_dir(&result.working_dir);
	cmd.envs(config.env.clone());

	let vm_args = generate_vm_args(result);
	if result.use_dynamic_vm_options {
		// Secrets are never written to disk
		let (file_args, secret_args) = split_secret_args(vm_args, &config.secrets);
		let path = result.working_dir.join(VM_ARGS_FILE);
		write_arg_file(&path, &file_args).context("Failed to write JVM argument file")?;
		cmd.arg(format!("@{}", path.to_string_lossy()));
		cmd.args(secret_args);
	} else {
		cmd.args(vm_args);
	}
	cmd.arg(main_class);
	cmd.args(&result.program_args);

	let secrets: &[String] = if config.censor_secrets {
		&config.secrets
	} else {
		&[]
	};
	output_launch_command(&cmd, secrets, o);

	let child = cmd.spawn().context("Failed to spawn framework process")?;

	Ok(FrameworkHandle::new(child))
}

/// JVM arguments followed by the classpath
fn generate_vm_args(result: &LaunchResult) -> Vec<String> {
	let mut out = result.vm_args.clone();
	if !result.classpath.is_empty() {
		out.push("-cp".into());
		out.push(result.classpath.get_str());
	}

	out
}

/// Separate the arguments that contain a secret from the rest, keeping their order
fn split_secret_args(args: Vec<String>, secrets: &[String]) -> (Vec<String>, Vec<String>) {
	args.into_iter().partition(|arg| {
		!secrets
			.iter()
			.any(|secret| !secret.is_empty() && arg.contains(secret.as_str()))
	})
}

/// Write arguments to a JVM `@argfile`, one per line
fn write_arg_file(path: &Path, args: &[String]) -> anyhow::Result<()> {
	let mut file = BufWriter::new(File::create(path)?);
	for arg in args {
		writeln!(file, "{}", quote_arg_file_entry(arg))?;
	}
	file.flush()?;

	Ok(())
}

/// Quote an argument for a JVM argument file if it needs it
fn quote_arg_file_entry(arg: &str) -> String {
	let needs_quotes = arg.is_empty()
		|| arg
			.chars()
			.any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | '#'));
	if !needs_quotes {
		return arg.to_string();
	}

	let mut out = String::with_capacity(arg.len() + 2);
	out.push('"');
	for c in arg.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c => out.push(c),
		}
	}
	out.push('"');

	out
}

/// Display the launch command in our own way,
/// censoring any credentials if needed
fn output_launch_command(command: &Command, secrets: &[String], o: &mut impl OsgiRunOutput) {
	o.end_process();
	o.display(
		MessageContents::Property(
			"Launch command".into(),
			Box::new(MessageContents::Simple(
				command.get_program().to_string_lossy().into(),
			)),
		),
		MessageLevel::Debug,
	);

	o.display(
		MessageContents::Header("Launch command arguments".into()),
		MessageLevel::Debug,
	);

	for arg in command.get_args() {
		let arg = censor(&arg.to_string_lossy(), secrets);
		o.display(
			MessageContents::ListItem(Box::new(MessageContents::Simple(arg))),
			MessageLevel::Debug,
		);
	}

	o.display(
		MessageContents::Header("Launch command environment".into()),
		MessageLevel::Debug,
	);

	for (env, val) in command.get_envs() {
		let Some(val) = val else { continue };
		let env = env.to_string_lossy().to_string();
		let val = censor(&val.to_string_lossy(), secrets);

		o.display(
			MessageContents::ListItem(Box::new(MessageContents::Property(
				env,
				Box::new(MessageContents::Simple(val)),
			))),
			MessageLevel::Debug,
		);
	}

	if let Some(dir) = command.get_current_dir() {
		o.display(
			MessageContents::Property(
				"Launch command directory".into(),
				Box::new(MessageContents::Path(dir.to_string_lossy().into())),
			),
			MessageLevel::Debug,
		);
	}
}

/// Replace every secret in a string
fn censor(string: &str, secrets: &[String]) -> String {
	const CENSOR_STR: &str = "***";
	let mut out = string.to_string();
	for secret in secrets.iter().filter(|x| !x.is_empty()) {
		out = out.replace(secret.as_str(), CENSOR_STR);
	}
	out
}

/// Creates a command wrapped in multiple other wrappers
fn create_wrapped_command(command: &OsStr, wrappers: &[WrapperCommand]) -> Command {
	let mut cmd = Command::new(command);
	for wrapper in wrappers {
		cmd = wrap_single(cmd, wrapper);
	}
	cmd
}

/// Wraps a single command in a wrapper
fn wrap_single(command: Command, wrapper: &WrapperCommand) -> Command {
	let mut new_cmd = Command::new(&wrapper.cmd);
	new_cmd.args(&wrapper.args);
	new_cmd.arg(command.get_program());
	new_cmd.args(command.get_args());
	new_cmd
}

/// Handle for a framework process after launching it. You must make sure to use
/// .wait() so that the child process is awaited.
#[derive(Debug)]
pub struct FrameworkHandle {
	/// The child process for the framework
	process: std::process::Child,
}

impl FrameworkHandle {
	fn new(process: std::process::Child) -> Self {
		Self { process }
	}

	/// Waits for the process to complete
	pub fn wait(&mut self) -> std::io::Result<std::process::ExitStatus> {
		self.process.wait()
	}

	/// Kills the process early
	pub fn kill(&mut self) -> std::io::Result<()> {
		self.process.kill()
	}

	/// Gets the internal child process, consuming the handle
	pub fn get_process(self) -> std::process::Child {
		self.process
	}

	/// Gets the PID of the framework process
	pub fn get_pid(&self) -> u32 {
		self.process.id()
	}
}

#[cfg(test)]
mod tests {
	use osgirun_shared::output::{Collect, NoOp};

	use super::*;
	use crate::io::java::install::JavaInstallation;

	#[test]
	fn test_wrappers() {
		let wrappers = vec![
			WrapperCommand {
				cmd: "hello".into(),
				args: Vec::new(),
			},
			WrapperCommand {
				cmd: "world".into(),
				args: vec!["foo".into(), "bar".into()],
			},
		];
		let cmd = create_wrapped_command(OsStr::new("run"), &wrappers);
		assert_eq!(cmd.get_program(), OsStr::new("world"));
		let mut args = cmd.get_args();
		assert_eq!(args.next(), Some(OsStr::new("foo")));
		assert_eq!(args.next(), Some(OsStr::new("bar")));
		assert_eq!(args.next(), Some(OsStr::new("hello")));
		assert_eq!(args.next(), Some(OsStr::new("run")));
	}

	#[test]
	fn test_arg_file_quoting() {
		assert_eq!(quote_arg_file_entry("-Xmx1g"), "-Xmx1g");
		assert_eq!(
			quote_arg_file_entry("-Dtitle=My App"),
			"\"-Dtitle=My App\""
		);
		assert_eq!(
			quote_arg_file_entry(r"C:\felix\bin"),
			r#""C:\\felix\\bin""#
		);
		assert_eq!(quote_arg_file_entry("say \"hi\""), r#""say \"hi\"""#);
		assert_eq!(quote_arg_file_entry(""), "\"\"");
	}

	#[test]
	fn test_vm_args_include_classpath() {
		let mut result = LaunchResult::new(JavaInstallation::new("/jdk"), "/work".into());
		result.vm_args = vec!["-ea".into()];
		assert_eq!(generate_vm_args(&result), vec!["-ea"]);

		result.classpath.add_path("a.jar");
		let args = generate_vm_args(&result);
		assert_eq!(args, vec!["-ea".to_string(), "-cp".into(), "a.jar".into()]);
	}

	#[test]
	fn test_missing_main_class() {
		let result = LaunchResult::new(JavaInstallation::new("/jdk"), "/work".into());
		assert!(launch_process(&result, &ProcessConfiguration::new(), &mut NoOp).is_err());
	}

	#[test]
	fn test_secrets_are_censored() {
		let mut cmd = Command::new("java");
		cmd.arg("-Dhttp.proxyPassword=hunter2");
		let mut o = Collect::default();
		output_launch_command(&cmd, &["hunter2".into()], &mut o);
		let texts = o.texts_at(MessageLevel::Debug);
		assert!(texts.iter().any(|x| x.contains("-Dhttp.proxyPassword=***")));
		assert!(!texts.iter().any(|x| x.contains("hunter2")));
	}

	#[cfg(unix)]
	#[test]
	fn test_launch_with_arg_file() {
		use std::os::unix::fs::PermissionsExt;

		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		let jdk = tmp.path().join("jdk");
		std::fs::create_dir_all(jdk.join("bin")).expect("Failed to create jdk dir");
		let java = jdk.join("bin/java");
		std::fs::write(&java, "#!/bin/sh\necho \"$@\" > out.txt\n")
			.expect("Failed to write fake java");
		std::fs::set_permissions(&java, std::fs::Permissions::from_mode(0o755))
			.expect("Failed to set permissions");

		let work = tmp.path().join("work");
		std::fs::create_dir_all(&work).expect("Failed to create work dir");
		let mut result = LaunchResult::new(JavaInstallation::new(&jdk), work.clone());
		result.vm_args = vec!["-Dname=two words".into()];
		result.classpath.add_path("core.jar");
		result.program_args = vec!["-console".into()];
		result.main_class = Some("test.Main".into());
		result.use_dynamic_vm_options = true;

		let mut handle = launch_process(&result, &ProcessConfiguration::new(), &mut NoOp)
			.expect("Failed to launch");
		assert!(handle.wait().expect("Failed to wait").success());

		let arg_file = std::fs::read_to_string(work.join(VM_ARGS_FILE))
			.expect("Failed to read argument file");
		assert_eq!(arg_file, "\"-Dname=two words\"\n-cp\ncore.jar\n");
		let out = std::fs::read_to_string(work.join("out.txt")).expect("Failed to read output");
		let expected = format!("@{} test.Main -console\n", work.join(VM_ARGS_FILE).display());
		assert_eq!(out, expected);
	}

	#[test]
	fn test_split_secret_args() {
		let args = vec![
			"-Dhttp.proxyUser=bob".to_string(),
			"-Dhttp.proxyPassword=hunter2".into(),
			"-cp".into(),
			"core.jar".into(),
		];
		let (file, secret) = split_secret_args(args.clone(), &["hunter2".into()]);
		assert_eq!(file, vec!["-Dhttp.proxyUser=bob", "-cp", "core.jar"]);
		assert_eq!(secret, vec!["-Dhttp.proxyPassword=hunter2"]);

		let (file, secret) = split_secret_args(args.clone(), &["".into()]);
		assert_eq!(file, args);
		assert!(secret.is_empty());
	}

	#[cfg(unix)]
	#[test]
	fn test_arg_file_has_no_secrets() {
		use std::os::unix::fs::PermissionsExt;

		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		let jdk = tmp.path().join("jdk");
		std::fs::create_dir_all(jdk.join("bin")).expect("Failed to create jdk dir");
		let java = jdk.join("bin/java");
		std::fs::write(&java, "#!/bin/sh\necho \"$@\" > out.txt\n")
			.expect("Failed to write fake java");
		std::fs::set_permissions(&java, std::fs::Permissions::from_mode(0o755))
			.expect("Failed to set permissions");

		let work = tmp.path().join("work");
		std::fs::create_dir_all(&work).expect("Failed to create work dir");
		let mut result = LaunchResult::new(JavaInstallation::new(&jdk), work.clone());
		result.vm_args = vec![
			"-Dhttp.proxyUser=bob".into(),
			"-Dhttp.proxyPassword=hunter2".into(),
		];
		result.main_class = Some("test.Main".into());
		result.use_dynamic_vm_options = true;
		let config = ProcessConfiguration::builder()
			.secret("hunter2")
			.build();

		let mut handle =
			launch_process(&result, &config, &mut NoOp).expect("Failed to launch");
		assert!(handle.wait().expect("Failed to wait").success());

		let arg_file = std::fs::read_to_string(work.join(VM_ARGS_FILE))
			.expect("Failed to read argument file");
		assert_eq!(arg_file, "-Dhttp.proxyUser=bob\n");
		let out = std::fs::read_to_string(work.join("out.txt")).expect("Failed to read output");
		let expected = format!(
			"@{} -Dhttp.proxyPassword=hunter2 test.Main\n",
			work.join(VM_ARGS_FILE).display()
		);
		assert_eq!(out, expected);
	}
}
