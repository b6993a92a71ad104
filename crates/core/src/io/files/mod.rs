/// Use of osgirun's configured system directories
pub mod paths;

use std::fs;
use std::path::Path;

/// Create a directory and all of its parents if it is not already a directory
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
	if path.is_dir() {
		Ok(())
	} else {
		fs::create_dir_all(path)
	}
}

/// Recursively remove a directory, treating an already missing directory as success
pub async fn remove_dir_async(path: &Path) -> std::io::Result<()> {
	match tokio::fs::remove_dir_all(path).await {
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
		other => other,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ensure_dir_is_idempotent() {
		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		let dir = tmp.path().join("a/b/c");
		ensure_dir(&dir).expect("First creation failed");
		ensure_dir(&dir).expect("Second creation failed");
		assert!(dir.is_dir());
	}

	#[test]
	fn test_ensure_dir_fails_on_file() {
		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		let file = tmp.path().join("file");
		fs::write(&file, "").expect("Failed to write file");
		assert!(ensure_dir(&file).is_err());
	}

	#[tokio::test]
	async fn test_remove_missing_dir() {
		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		remove_dir_async(&tmp.path().join("missing"))
			.await
			.expect("Removing a missing dir should succeed");
	}
}
