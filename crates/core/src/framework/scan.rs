use std::path::PathBuf;

use anyhow::Context;
use glob::Pattern;

use super::{FrameworkBundleKind, FrameworkBundleProvider, FrameworkInstance, SelectedBundle};

/// Finds framework bundles by matching file name patterns anywhere under the
/// installation's base folder
#[derive(Debug, Clone, Copy)]
pub struct GlobBundleProvider {
	/// File name patterns of the libraries that start the framework
	pub system: &'static [&'static str],
	/// File name patterns of the console bundles
	pub shell: &'static [&'static str],
}

impl FrameworkBundleProvider for GlobBundleProvider {
	fn get_framework_bundles(
		&self,
		instance: &FrameworkInstance,
		kind: FrameworkBundleKind,
	) -> anyhow::Result<Vec<SelectedBundle>> {
		let patterns = match kind {
			FrameworkBundleKind::System => self.system,
			FrameworkBundleKind::Shell => self.shell,
		};

		let base = &instance.base_folder;
		if !base.is_dir() {
			return Ok(Vec::new());
		}
		let base = Pattern::escape(&base.to_string_lossy());

		let mut found: Vec<PathBuf> = Vec::new();
		for pattern in patterns {
			let full = format!("{base}/**/{pattern}");
			let paths = glob::glob(&full)
				.with_context(|| format!("Invalid bundle pattern '{pattern}'"))?;
			for path in paths {
				let path = path.context("Failed to read framework installation")?;
				if path.is_file() {
					found.push(path);
				}
			}
		}
		found.sort();
		found.dedup();

		Ok(found.iter().map(|x| SelectedBundle::from_path(x)).collect())
	}
}
