/// Eclipse Equinox integration
pub mod equinox;
/// Apache Felix integration
pub mod felix;
/// Knopflerfish integration
pub mod knopflerfish;
/// Finding framework bundles in an installation
pub mod scan;

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::bail;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::io::url::{path_to_url, url_to_path};
use crate::launch::{LaunchRequest, LaunchResult};

/// A family of OSGi framework implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum FrameworkKind {
	/// Eclipse Equinox
	Equinox,
	/// Apache Felix
	Felix,
	/// Knopflerfish
	Knopflerfish,
}

impl FrameworkKind {
	/// Every framework kind
	pub const ALL: [Self; 3] = [Self::Equinox, Self::Felix, Self::Knopflerfish];

	/// The identifier of this kind, as used in configuration
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Equinox => "equinox",
			Self::Felix => "felix",
			Self::Knopflerfish => "knopflerfish",
		}
	}
}

impl Display for FrameworkKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for FrameworkKind {
	type Err = anyhow::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"equinox" => Ok(Self::Equinox),
			"felix" => Ok(Self::Felix),
			"knopflerfish" => Ok(Self::Knopflerfish),
			_ => bail!("Unknown framework '{s}'"),
		}
	}
}

/// An installation of a framework on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkInstance {
	/// A display name for the installation
	pub name: String,
	/// The framework family of the installation
	pub kind: FrameworkKind,
	/// The folder the framework is installed in
	pub base_folder: PathBuf,
}

impl FrameworkInstance {
	/// Create a new FrameworkInstance
	pub fn new(name: impl Into<String>, kind: FrameworkKind, base_folder: impl Into<PathBuf>) -> Self {
		Self {
			name: name.into(),
			kind,
			base_folder: base_folder.into(),
		}
	}
}

/// A bundle chosen to run in the framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedBundle {
	/// The bundle's name
	pub name: String,
	/// Where the bundle can be found. Bundles that are not built yet have no URL
	pub url: Option<String>,
	/// The start level of the bundle, or None to use the default
	pub start_level: Option<u32>,
	/// Whether the bundle is started after it is installed
	pub start: bool,
}

impl SelectedBundle {
	/// Create a bundle at a URL that is started at the default start level
	pub fn from_url(name: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			url: Some(url.into()),
			start_level: None,
			start: true,
		}
	}

	/// Create a bundle from a local file that is started at the default start level.
	/// The bundle is named after the file
	pub fn from_path(path: &Path) -> Self {
		let name = path
			.file_stem()
			.map(|x| x.to_string_lossy().into_owned())
			.unwrap_or_default();
		Self::from_url(name, path_to_url(path))
	}

	/// Get the local path of the bundle, if it has a URL
	pub fn get_path(&self) -> Option<PathBuf> {
		self.url.as_deref().map(url_to_path)
	}
}

/// The categories of bundles that a framework installation provides itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkBundleKind {
	/// Libraries needed to start the framework
	System,
	/// Bundles that provide an interactive console
	Shell,
}

/// Finds the bundles that ship with a framework installation
pub trait FrameworkBundleProvider {
	/// Get the bundles of a category from an installation
	fn get_framework_bundles(
		&self,
		instance: &FrameworkInstance,
		kind: FrameworkBundleKind,
	) -> anyhow::Result<Vec<SelectedBundle>>;
}

/// Framework-specific setup of launch parameters
pub trait FrameworkLaunchExtension {
	/// Add the framework's own arguments to assembled launch parameters
	fn extend(&self, result: &mut LaunchResult, request: &LaunchRequest) -> anyhow::Result<()>;
}

/// Full support for one framework family
pub trait FrameworkIntegrator: FrameworkBundleProvider + FrameworkLaunchExtension {
	/// The framework family this integrator supports
	fn kind(&self) -> FrameworkKind;

	/// A human readable name for the framework
	fn display_name(&self) -> &'static str;
}

/// Lookup of framework integrators by framework family
#[derive(Default)]
pub struct FrameworkRegistry {
	integrators: HashMap<FrameworkKind, Box<dyn FrameworkIntegrator>>,
}

impl FrameworkRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry with all of the built-in integrators
	pub fn with_builtin() -> Self {
		let mut out = Self::new();
		out.register(Box::new(equinox::Equinox));
		out.register(Box::new(felix::Felix));
		out.register(Box::new(knopflerfish::Knopflerfish));
		out
	}

	/// Register an integrator, replacing any existing one for the same framework
	pub fn register(&mut self, integrator: Box<dyn FrameworkIntegrator>) {
		self.integrators.insert(integrator.kind(), integrator);
	}

	/// Get the integrator for a framework family
	pub fn get(&self, kind: FrameworkKind) -> Option<&dyn FrameworkIntegrator> {
		self.integrators.get(&kind).map(|x| x.as_ref())
	}

	/// Iterate over the registered integrators, ordered by framework kind
	pub fn iter(&self) -> impl Iterator<Item = &dyn FrameworkIntegrator> {
		let mut kinds: Vec<_> = self.integrators.keys().collect();
		kinds.sort();
		kinds
			.into_iter()
			.filter_map(move |x| self.integrators.get(x).map(|x| x.as_ref()))
	}
}

/// Group the bundles that have URLs by their start level, in ascending level order.
/// Bundles keep their relative order within a level
pub fn group_by_start_level<'a>(
	bundles: &'a [SelectedBundle],
	request: &LaunchRequest,
) -> BTreeMap<u32, Vec<(&'a SelectedBundle, &'a str)>> {
	let mut out: BTreeMap<u32, Vec<_>> = BTreeMap::new();
	for bundle in bundles {
		let Some(url) = bundle.url.as_deref() else {
			continue;
		};
		out.entry(request.bundle_start_level(bundle))
			.or_default()
			.push((bundle, url));
	}

	out
}
