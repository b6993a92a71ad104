use itertools::Itertools;

use super::scan::GlobBundleProvider;
use super::{
	group_by_start_level, FrameworkBundleKind, FrameworkBundleProvider, FrameworkInstance,
	FrameworkIntegrator, FrameworkKind, FrameworkLaunchExtension, SelectedBundle,
};
use crate::launch::{framework_start_level, LaunchRequest, LaunchResult};

/// Main class of the Equinox launcher
pub const MAIN_CLASS: &str = "org.eclipse.core.runtime.adaptor.EclipseStarter";

const BUNDLES: GlobBundleProvider = GlobBundleProvider {
	system: &["org.eclipse.osgi_*.jar", "org.eclipse.osgi.jar"],
	shell: &[
		"org.eclipse.equinox.console_*.jar",
		"org.apache.felix.gogo.runtime_*.jar",
		"org.apache.felix.gogo.shell_*.jar",
		"org.apache.felix.gogo.command_*.jar",
	],
};

/// Eclipse Equinox integration
pub struct Equinox;

impl FrameworkBundleProvider for Equinox {
	fn get_framework_bundles(
		&self,
		instance: &FrameworkInstance,
		kind: FrameworkBundleKind,
	) -> anyhow::Result<Vec<SelectedBundle>> {
		BUNDLES.get_framework_bundles(instance, kind)
	}
}

impl FrameworkLaunchExtension for Equinox {
	fn extend(&self, result: &mut LaunchResult, request: &LaunchRequest) -> anyhow::Result<()> {
		let working_dir = result.working_dir.to_string_lossy().into_owned();
		let configuration_dir = result.working_dir.join("configuration");

		result.add_property("osgi.install.area", &working_dir);
		result.add_property(
			"osgi.configuration.area",
			configuration_dir.to_string_lossy(),
		);

		// reference:file:/x.jar@4:start
		let bundles = group_by_start_level(&result.bundles, request)
			.into_iter()
			.flat_map(|(level, bundles)| {
				bundles.into_iter().map(move |(bundle, url)| {
					let url = if url.starts_with("file:") {
						format!("reference:{url}")
					} else {
						url.to_string()
					};
					let start = if bundle.start { ":start" } else { "" };
					format!("{url}@{level}{start}")
				})
			})
			.join(",");
		if !bundles.is_empty() {
			result.add_property("osgi.bundles", bundles);
		}

		result.add_property(
			"osgi.bundles.defaultStartLevel",
			request.default_start_level.to_string(),
		);
		let start_level = framework_start_level(request, &result.bundles);
		result.add_property("osgi.startLevel", start_level.to_string());
		result.add_property("osgi.noShutdown", "true");
		result.add_property("eclipse.ignoreApp", "true");
		if request.clean_start {
			result.add_property("osgi.clean", "true");
		}

		if request.start_console {
			result.program_args.push("-console".into());
		}
		result.program_args.push("-consoleLog".into());
		if request.debug_mode {
			result.program_args.push("-debug".into());
		}

		result.main_class = Some(MAIN_CLASS.into());

		Ok(())
	}
}

impl FrameworkIntegrator for Equinox {
	fn kind(&self) -> FrameworkKind {
		FrameworkKind::Equinox
	}

	fn display_name(&self) -> &'static str {
		"Eclipse Equinox"
	}
}
