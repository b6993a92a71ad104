use std::path::Path;

use anyhow::Context;
use color_print::cprintln;
use osgirun::config::RunConfig;
use osgirun::core::LaunchResult;
use osgirun::shared::output::{MessageContents, MessageLevel, OsgiRunOutput};
use osgirun::RunSession;

use super::CmdData;
use crate::output::HYPHEN_POINT;

pub async fn params(config: &Path, json: bool, data: &mut CmdData) -> anyhow::Result<()> {
	let run = RunConfig::load(config)?;
	let mut session = RunSession::new(data.get_config());

	let result = session.build(&run, &mut data.output);
	// The generated directory is only needed while the parameters are in use
	session.finish().await;
	let result = result?;

	if json {
		let out = serde_json::to_string_pretty(&result)
			.context("Failed to serialize launch parameters")?;
		println!("{out}");
	} else {
		print_result(&result);
	}

	Ok(())
}

pub async fn launch(config: &Path, data: &mut CmdData) -> anyhow::Result<()> {
	let run = RunConfig::load(config)?;
	let mut session = RunSession::new(data.get_config());

	let launched = session.launch(&run, &mut data.output);
	let status = match launched {
		Ok((_, mut handle)) => handle.wait().context("Failed to wait for framework process"),
		Err(e) => Err(e),
	};
	session.finish().await;
	let status = status?;

	if status.success() {
		data.output.display(
			MessageContents::Success("Framework exited".into()),
			MessageLevel::Important,
		);
		Ok(())
	} else {
		data.output.display(
			MessageContents::Warning(format!("Framework exited with {status}")),
			MessageLevel::Important,
		);
		std::process::exit(status.code().unwrap_or(1));
	}
}

fn print_result(result: &LaunchResult) {
	cprintln!("<s>Runtime:</> {}", result.java.get_jvm_path().display());
	cprintln!("<s>Working directory:</> {}", result.working_dir.display());
	if let Some(main_class) = &result.main_class {
		cprintln!("<s>Main class:</> <g>{}</g>", main_class);
	}

	cprintln!("<s>Classpath:");
	for entry in result.classpath.entries() {
		cprintln!("{}<b>{}</>", HYPHEN_POINT, entry.display());
	}

	cprintln!("<s>VM arguments:");
	for arg in &result.vm_args {
		cprintln!("{}{}", HYPHEN_POINT, arg);
	}

	cprintln!("<s>Program arguments:");
	for arg in &result.program_args {
		cprintln!("{}{}", HYPHEN_POINT, arg);
	}

	if result.use_dynamic_vm_options {
		cprintln!("<k!>VM arguments are passed in an argument file");
	}
}
