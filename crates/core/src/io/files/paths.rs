use anyhow::anyhow;
use directories::ProjectDirs;

use std::path::PathBuf;

/// Store for all of the paths that are used throughout the application
#[derive(Debug, Clone)]
pub struct Paths {
	/// Project-specific directories
	pub project: ProjectDirs,
	/// Holds data
	pub data: PathBuf,
	/// Holds log files
	pub logs: PathBuf,
	/// Holds generated working directories for framework runs
	pub run: PathBuf,
}

impl Paths {
	/// Create a new Paths object. This will create all of the directories
	/// referenced in the paths if they do not already exist.
	pub fn new() -> anyhow::Result<Paths> {
		let project = ProjectDirs::from("", "osgirun", "osgirun")
			.ok_or(anyhow!("Failed to create project directories"))?;

		let data = project.data_dir().to_owned();
		let logs = data.join("logs");
		let run = project.cache_dir().join("run");

		std::fs::create_dir_all(&data)?;
		std::fs::create_dir_all(project.config_dir())?;
		std::fs::create_dir_all(&logs)?;
		std::fs::create_dir_all(&run)?;

		Ok(Paths {
			project,
			data,
			logs,
			run,
		})
	}
}
