use std::path::{Path, PathBuf};

use url::Url;

/// Converts a bundle URL to a local filesystem path.
///
/// Handles `file:` URLs in both the `file:/x` and `file:///x` forms, `jar:` URLs
/// (the entry after `!/` is dropped), `reference:` URLs and plain paths, which are
/// returned unchanged. Percent-escapes are decoded.
///
/// ```
/// use std::path::PathBuf;
/// use osgirun_core::io::url::url_to_path;
///
/// assert_eq!(url_to_path("file:///opt/felix/bin/felix.jar"), PathBuf::from("/opt/felix/bin/felix.jar"));
/// assert_eq!(url_to_path("jar:file:/opt/a%20b.jar!/"), PathBuf::from("/opt/a b.jar"));
/// ```
pub fn url_to_path(url: &str) -> PathBuf {
	let mut rest = url.trim();
	if let Some(stripped) = rest.strip_prefix("jar:") {
		rest = stripped;
		if let Some((file, _entry)) = rest.split_once("!/") {
			rest = file;
		}
	}
	if let Some(stripped) = rest.strip_prefix("reference:") {
		rest = stripped;
	}

	let Some(file) = rest.strip_prefix("file:") else {
		return PathBuf::from(rest);
	};

	Url::parse(rest)
		.ok()
		.and_then(|x| x.to_file_path().ok())
		.unwrap_or_else(|| PathBuf::from(file))
}

/// Converts a local path to a `file:` URL. Relative paths are made absolute
/// against the current directory first
///
/// ```
/// use std::path::Path;
/// use osgirun_core::io::url::path_to_url;
///
/// assert_eq!(path_to_url(Path::new("/opt/a b.jar")), "file:///opt/a%20b.jar");
/// ```
pub fn path_to_url(path: &Path) -> String {
	let absolute = if path.is_absolute() {
		path.to_path_buf()
	} else {
		match std::env::current_dir() {
			Ok(dir) => dir.join(path),
			Err(..) => path.to_path_buf(),
		}
	};

	match Url::from_file_path(&absolute) {
		Ok(url) => url.into(),
		// Still readable by url_to_path as a plain path
		Err(..) => path.to_string_lossy().into_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[cfg(not(target_os = "windows"))]
	#[test]
	fn test_url_forms() {
		assert_eq!(url_to_path("file:/a/b.jar"), PathBuf::from("/a/b.jar"));
		assert_eq!(url_to_path("file:///a/b.jar"), PathBuf::from("/a/b.jar"));
		assert_eq!(
			url_to_path("file://localhost/a/b.jar"),
			PathBuf::from("/a/b.jar")
		);
		assert_eq!(url_to_path("/plain/path.jar"), PathBuf::from("/plain/path.jar"));
		assert_eq!(
			url_to_path("reference:file:/a/b.jar"),
			PathBuf::from("/a/b.jar")
		);
	}

	#[cfg(not(target_os = "windows"))]
	#[test]
	fn test_jar_url() {
		assert_eq!(
			url_to_path("jar:file:/lib/x.jar!/META-INF/MANIFEST.MF"),
			PathBuf::from("/lib/x.jar")
		);
	}

	#[cfg(not(target_os = "windows"))]
	#[test]
	fn test_percent_decode() {
		assert_eq!(url_to_path("file:/a%20b/c%3Fd.jar"), PathBuf::from("/a b/c?d.jar"));
		assert_eq!(
			url_to_path("file:/b%C3%BCndel.jar"),
			PathBuf::from("/b\u{fc}ndel.jar")
		);
	}

	#[cfg(not(target_os = "windows"))]
	#[test]
	fn test_special_characters_are_encoded() {
		let path = Path::new("/opt/my bundles/#1?v=2/b\u{fc}ndel.jar");
		let url = path_to_url(path);
		assert!(url.starts_with("file:///opt/my%20bundles/"));
		assert!(!url.contains(' '));
		assert!(!url.contains('?'));
		assert!(!url.contains('#'));
		assert!(url.is_ascii());
		assert_eq!(url_to_path(&url), path);
	}

	#[test]
	fn test_relative_path_becomes_absolute() {
		let url = path_to_url(Path::new("bundles/a.jar"));
		assert!(url.starts_with("file:"));
		assert!(url_to_path(&url).is_absolute());
		assert!(url_to_path(&url).ends_with("bundles/a.jar"));
	}
}
