use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::Serialize;

/// The separator for entries in the classpath
#[cfg(not(target_os = "windows"))]
pub const CLASSPATH_SEP: char = ':';
/// The separator for entries in the classpath
#[cfg(target_os = "windows")]
pub const CLASSPATH_SEP: char = ';';

/// An ordered Java classpath
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Classpath {
	entries: Vec<PathBuf>,
}

impl Classpath {
	/// Create a new empty classpath
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	/// Appends an entry to the end of the classpath
	pub fn add_path(&mut self, path: impl Into<PathBuf>) {
		self.entries.push(path.into());
	}

	/// Extends the classpath with another classpath
	pub fn extend(&mut self, other: Classpath) {
		self.entries.extend(other.entries);
	}

	/// Get the entries of the classpath in order
	pub fn entries(&self) -> &[PathBuf] {
		&self.entries
	}

	/// Whether the classpath has no entries
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Get the number of entries in the classpath
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Obtain the classpath as a string, joined with the platform separator
	pub fn get_str(&self) -> String {
		self.entries
			.iter()
			.map(|x| x.to_string_lossy())
			.join(&CLASSPATH_SEP.to_string())
	}
}

impl<P: AsRef<Path>> FromIterator<P> for Classpath {
	fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
		Self {
			entries: iter.into_iter().map(|x| x.as_ref().to_path_buf()).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classpath() {
		let mut classpath = Classpath::new();
		assert_eq!(classpath.get_str(), String::new());
		classpath.add_path("foo");
		assert_eq!(classpath.get_str(), "foo".to_string());
		classpath.add_path("bar");
		assert_eq!(
			classpath.get_str(),
			"foo".to_string() + &CLASSPATH_SEP.to_string() + "bar"
		);
		assert_eq!(classpath.len(), 2);
	}

	#[test]
	fn test_classpath_extend_keeps_order() {
		let mut first: Classpath = ["core.jar"].into_iter().collect();
		let second: Classpath = ["a.jar", "b.jar"].into_iter().collect();
		first.extend(second);
		assert_eq!(
			first.entries(),
			&[
				PathBuf::from("core.jar"),
				PathBuf::from("a.jar"),
				PathBuf::from("b.jar")
			]
		);
	}
}
