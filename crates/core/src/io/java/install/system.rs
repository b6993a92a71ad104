use std::path::{Path, PathBuf};

use super::JavaInstallation;

macro_rules! scan {
	($path:expr) => {
		if let Some(installation) = scan_dir($path) {
			return Some(installation);
		}
	};
}

/// Finds the best Java installation already present on the system. `JAVA_HOME`
/// wins, then the `java` on the PATH, then well-known install locations
pub fn find_system_java() -> Option<JavaInstallation> {
	if let Ok(home) = std::env::var("JAVA_HOME") {
		if let Some(installation) = JavaInstallation::from_path(Path::new(&home)) {
			return Some(installation);
		}
	}

	if let Some(installation) = find_on_path() {
		return Some(installation);
	}

	#[cfg(target_os = "windows")]
	{
		if let Some(installation) = scan_windows() {
			return Some(installation);
		}
	}
	#[cfg(target_os = "linux")]
	{
		if let Some(installation) = scan_linux() {
			return Some(installation);
		}
	}
	#[cfg(target_os = "macos")]
	{
		scan!(Path::new("/Library/Java/JavaVirtualMachines"));
	}

	None
}

/// Finds Java from the `java` executable on the PATH, following links back to
/// the installation directory
fn find_on_path() -> Option<JavaInstallation> {
	let jvm = which::which("java").ok()?;
	let jvm = jvm.canonicalize().unwrap_or(jvm);
	// {installation}/bin/java
	let installation = jvm.parent()?.parent()?;
	JavaInstallation::from_path(installation)
}

/// Scan for Java on Windows
#[cfg(target_os = "windows")]
fn scan_windows() -> Option<JavaInstallation> {
	scan!(Path::new("C:/Program Files/Java"));
	scan!(Path::new("C:/Program Files/Eclipse Adoptium"));

	None
}

/// Scan for Java on Linux
#[cfg(target_os = "linux")]
fn scan_linux() -> Option<JavaInstallation> {
	// OpenJDK
	scan!(Path::new("/usr/lib/jvm"));
	scan!(Path::new("/usr/lib64/jvm"));
	// Oracle RPMs
	scan!(Path::new("/usr/java"));
	// Manually installed
	scan!(Path::new("/opt/jdk"));
	scan!(Path::new("/opt/jdks"));

	if let Ok(home) = std::env::var("HOME") {
		let home = PathBuf::from(home);
		// IntelliJ
		scan!(&home.join(".jdks"));
		// SDKMan
		scan!(&home.join(".sdkman/candidates/java"));
	}

	None
}

/// Scan a directory for Java installations. Newer-looking names are preferred
fn scan_dir(dir: &Path) -> Option<JavaInstallation> {
	let read = std::fs::read_dir(dir).ok()?;
	let mut candidates: Vec<PathBuf> = read
		.filter_map(|x| x.ok())
		.map(|x| x.path())
		.filter(|x| x.is_dir())
		.collect();
	candidates.sort();

	candidates.into_iter().rev().find_map(|path| {
		// macOS bundles keep the installation in Contents/Home
		JavaInstallation::from_path(&path)
			.or_else(|| JavaInstallation::from_path(&path.join("Contents/Home")))
	})
}

#[cfg(test)]
mod tests {
	use super::super::create_test_runtime;
	use super::*;

	#[test]
	fn test_scan_dir_prefers_last_valid() {
		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		create_test_runtime(&tmp.path().join("jdk-11"));
		create_test_runtime(&tmp.path().join("jdk-17"));
		std::fs::create_dir_all(tmp.path().join("jdk-21-broken"))
			.expect("Failed to create dir");

		let found = scan_dir(tmp.path()).expect("Should find a runtime");
		assert_eq!(found.get_path(), tmp.path().join("jdk-17"));
	}

	#[test]
	fn test_scan_missing_dir() {
		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		assert_eq!(scan_dir(&tmp.path().join("missing")), None);
	}
}
