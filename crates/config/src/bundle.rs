use std::path::Path;

use osgirun_core::framework::SelectedBundle;
use osgirun_core::io::url::path_to_url;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration for a bundle to run in the framework
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(untagged)]
pub enum BundleConfig {
	/// Just the path to a bundle file
	Simple(String),
	/// Full bundle configuration
	Full(FullBundleConfig),
}

/// Full configuration for a bundle
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FullBundleConfig {
	/// The name of the bundle. Defaults to the name of its file
	#[serde(default)]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// The URL of the bundle
	#[serde(default)]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// The path to the bundle file. Used when there is no URL
	#[serde(default)]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	/// The start level of the bundle
	#[serde(default)]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start_level: Option<u32>,
	/// Whether to start the bundle after installing it
	#[serde(default = "default_start")]
	pub start: bool,
}

fn default_start() -> bool {
	true
}

impl BundleConfig {
	/// Convert to a bundle selection, resolving relative paths against a directory
	pub fn to_selected(&self, base_dir: &Path) -> SelectedBundle {
		match self {
			Self::Simple(path) => SelectedBundle::from_path(&base_dir.join(path)),
			Self::Full(config) => {
				let url = match (&config.url, &config.path) {
					(Some(url), _) => Some(url.clone()),
					(None, Some(path)) => Some(path_to_url(&base_dir.join(path))),
					(None, None) => None,
				};
				let name = config
					.name
					.clone()
					.or_else(|| url.as_deref().and_then(name_from_url))
					.unwrap_or_default();

				SelectedBundle {
					name,
					url,
					start_level: config.start_level,
					start: config.start,
				}
			}
		}
	}
}

/// Guess a bundle name from the file at the end of a URL
fn name_from_url(url: &str) -> Option<String> {
	let file = url.trim_end_matches("!/").rsplit(['/', '\\', ':']).next()?;
	let name = file.strip_suffix(".jar").unwrap_or(file);
	if name.is_empty() {
		None
	} else {
		Some(name.to_string())
	}
}
