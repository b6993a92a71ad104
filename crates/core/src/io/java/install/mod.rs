/// Detection of Java installations already on the system
pub mod system;

#[cfg(target_family = "unix")]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

/// A Java installation used to launch the framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaInstallation {
	/// The path to the directory where the installation is. The JVM lives at
	/// `{path}/bin/java`
	path: PathBuf,
}

impl JavaInstallation {
	/// Use a directory as a Java installation without checking it
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Use a directory as a Java installation if it holds a valid runtime.
	/// A leading `~` in the path is expanded
	pub fn from_path(path: &Path) -> Option<Self> {
		let path = shellexpand::path::tilde(path).into_owned();
		let installation = Self::new(path);
		match installation.verify() {
			Ok(true) => Some(installation),
			_ => None,
		}
	}

	/// Get the path to the Java installation
	pub fn get_path(&self) -> &Path {
		&self.path
	}

	/// Get the path to the JVM.
	pub fn get_jvm_path(&self) -> PathBuf {
		#[cfg(target_family = "windows")]
		let path = "bin/java.exe";
		#[cfg(not(target_family = "windows"))]
		let path = "bin/java";
		self.path.join(path)
	}

	/// Verifies that this installation is set up correctly
	pub fn verify(&self) -> anyhow::Result<bool> {
		let jvm_path = self.get_jvm_path();
		if !jvm_path.exists() || !jvm_path.is_file() {
			return Ok(false);
		}
		#[cfg(target_family = "unix")]
		{
			// Check if JVM is executable
			let mode = jvm_path
				.metadata()
				.context("Failed to get JVM metadata")?
				.permissions()
				.mode();
			if mode & 0o111 == 0 {
				return Ok(false);
			}
		}

		Ok(true)
	}
}

/// Creates a fake runtime directory with an executable JVM for tests
#[cfg(test)]
pub(crate) fn create_test_runtime(dir: &Path) -> PathBuf {
	let bin = dir.join("bin");
	std::fs::create_dir_all(&bin).expect("Failed to create bin dir");
	#[cfg(target_family = "windows")]
	let jvm = bin.join("java.exe");
	#[cfg(not(target_family = "windows"))]
	let jvm = bin.join("java");
	std::fs::write(&jvm, "#!/bin/sh\n").expect("Failed to write JVM");
	#[cfg(target_family = "unix")]
	std::fs::set_permissions(&jvm, std::fs::Permissions::from_mode(0o755))
		.expect("Failed to set JVM permissions");
	dir.to_path_buf()
}
