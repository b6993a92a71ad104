mod framework;
mod run;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use color_print::{cformat, cprintln};

use osgirun::core::{Configuration, Paths};
use osgirun::shared::output::{MessageContents, MessageLevel, OsgiRunOutput};

use super::output::TerminalOutput;

#[derive(Debug, Subcommand)]
pub enum Command {
	#[command(about = "Print the launch parameters for a run configuration")]
	Params {
		/// Print the parameters as JSON
		#[arg(short, long)]
		json: bool,
		/// Path to the run configuration file
		config: PathBuf,
	},
	#[command(about = "Launch a framework from a run configuration")]
	Launch {
		/// Path to the run configuration file
		config: PathBuf,
	},
	#[command(about = "List the bundles that a framework installation provides")]
	Bundles {
		/// List the console bundles instead of the system libraries
		#[arg(short, long)]
		shell: bool,
		/// The framework family (equinox, felix or knopflerfish)
		kind: String,
		/// The folder the framework is installed in
		path: PathBuf,
	},
	#[command(about = "List the supported frameworks")]
	#[clap(alias = "ls")]
	Frameworks,
	#[command(about = "Print the osgirun version")]
	Version,
}

#[derive(Debug, Parser)]
pub struct Cli {
	#[command(subcommand)]
	command: Command,
	#[arg(short, long)]
	debug: bool,
	#[arg(short = 'D', long)]
	trace: bool,
}

/// Run the command line interface
pub async fn run_cli() -> anyhow::Result<()> {
	// Parse the CLI
	let cli = Cli::try_parse();
	if let Err(e) = &cli {
		if let clap::error::ErrorKind::DisplayHelp
		| clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
		| clap::error::ErrorKind::DisplayVersion = e.kind()
		{
			println!("{e}");
			return Ok(());
		} else {
			eprintln!("{}", cformat!("<r>{e}"));
			bail!("");
		}
	}
	let cli = cli?;

	// Prepare the command data
	let mut data = CmdData::new()?;
	let log_level = get_log_level(&cli);
	data.output.set_log_level(log_level);

	let res = match cli.command {
		Command::Params { json, config } => run::params(&config, json, &mut data).await,
		Command::Launch { config } => run::launch(&config, &mut data).await,
		Command::Bundles { shell, kind, path } => framework::bundles(&kind, path, shell),
		Command::Frameworks => {
			framework::list();
			Ok(())
		}
		Command::Version => {
			print_version();
			Ok(())
		}
	};

	if let Err(e) = &res {
		data.output.display(
			MessageContents::Error(format!("{e:?}")),
			MessageLevel::Important,
		);
	}

	res
}

/// Get the log level based on the debug options
fn get_log_level(cli: &Cli) -> MessageLevel {
	if cli.trace {
		MessageLevel::Trace
	} else if cli.debug {
		MessageLevel::Debug
	} else {
		MessageLevel::Important
	}
}

/// Data passed to commands
pub struct CmdData {
	pub paths: Paths,
	pub output: TerminalOutput,
}

impl CmdData {
	pub fn new() -> anyhow::Result<Self> {
		let paths = Paths::new().context("Failed to set up system paths")?;
		let output = TerminalOutput::new(&paths).context("Failed to set up output")?;
		Ok(Self { paths, output })
	}

	/// Get the core configuration for the current environment
	pub fn get_config(&self) -> Configuration {
		osgirun::environment_configuration(&self.paths)
	}
}

/// Print the osgirun version
fn print_version() {
	let version = env!("CARGO_PKG_VERSION");
	cprintln!("CLI version: <g>{}</g>", version);
	cprintln!("osgirun version: <g>{}</g>", osgirun::VERSION);
}
