use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use osgirun_shared::util::{is_blank, utc_timestamp_millis};

use crate::error::LaunchError;
use crate::io::files::ensure_dir;

/// Counter that keeps generated names unique within this process
static RUN_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Creates a unique directory name for a run, like `run.1700000000000-4242-0`.
/// The timestamp only keeps names readable and sortable. The process ID and the
/// counter make them unique
pub fn generate_run_dir_name() -> String {
	let timestamp = utc_timestamp_millis().unwrap_or_default();
	let pid = std::process::id();
	let count = RUN_COUNTER.fetch_add(1, Ordering::Relaxed);
	format!("run.{timestamp}-{pid}-{count}")
}

/// Creates a working directory if it is not a directory already
pub(crate) fn prepare_working_dir(path: &Path) -> Result<PathBuf, LaunchError> {
	if is_blank(&path.to_string_lossy()) {
		return Err(LaunchError::CannotCreateWorkingDirectory {
			path: path.to_path_buf(),
			source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path is blank"),
		});
	}
	let path = shellexpand::path::tilde(path).into_owned();
	ensure_dir(&path).map_err(|source| LaunchError::CannotCreateWorkingDirectory {
		path: path.clone(),
		source,
	})?;

	Ok(path)
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn test_generated_names_are_unique() {
		let names: HashSet<_> = (0..1000).map(|_| generate_run_dir_name()).collect();
		assert_eq!(names.len(), 1000);
		assert!(names.iter().all(|x| x.starts_with("run.")));
	}

	#[test]
	fn test_prepare_blank_path() {
		for path in ["", "   ", "\t"] {
			let err = prepare_working_dir(Path::new(path)).expect_err("Blank path should fail");
			assert!(matches!(
				err,
				LaunchError::CannotCreateWorkingDirectory { .. }
			));
		}
	}
}
