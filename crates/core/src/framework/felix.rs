use itertools::Itertools;

use super::scan::GlobBundleProvider;
use super::{
	group_by_start_level, FrameworkBundleKind, FrameworkBundleProvider, FrameworkInstance,
	FrameworkIntegrator, FrameworkKind, FrameworkLaunchExtension, SelectedBundle,
};
use crate::launch::{framework_start_level, LaunchRequest, LaunchResult};

/// Main class of the Felix launcher
pub const MAIN_CLASS: &str = "org.apache.felix.main.Main";

const BUNDLES: GlobBundleProvider = GlobBundleProvider {
	system: &["felix.jar", "org.apache.felix.main-*.jar"],
	shell: &[
		"org.apache.felix.gogo.runtime-*.jar",
		"org.apache.felix.gogo.shell-*.jar",
		"org.apache.felix.gogo.command-*.jar",
	],
};

/// Apache Felix integration
pub struct Felix;

impl FrameworkBundleProvider for Felix {
	fn get_framework_bundles(
		&self,
		instance: &FrameworkInstance,
		kind: FrameworkBundleKind,
	) -> anyhow::Result<Vec<SelectedBundle>> {
		BUNDLES.get_framework_bundles(instance, kind)
	}
}

impl FrameworkLaunchExtension for Felix {
	fn extend(&self, result: &mut LaunchResult, request: &LaunchRequest) -> anyhow::Result<()> {
		let cache_dir = result
			.working_dir
			.join("felix-cache")
			.to_string_lossy()
			.into_owned();

		result.add_property("org.osgi.framework.storage", &cache_dir);
		if request.clean_start {
			result.add_property("org.osgi.framework.storage.clean", "onFirstInit");
		}

		let start_level = framework_start_level(request, &result.bundles);
		result.add_property(
			"org.osgi.framework.startlevel.beginning",
			start_level.to_string(),
		);
		result.add_property(
			"felix.startlevel.bundle",
			request.default_start_level.to_string(),
		);
		// Only the bundles given here are installed, not the distribution's bundle dir
		result.add_property("felix.auto.deploy.action", "");

		let mut level_props = Vec::new();
		for (level, bundles) in group_by_start_level(&result.bundles, request) {
			let (start, install): (Vec<_>, Vec<_>) =
				bundles.into_iter().partition(|(bundle, _)| bundle.start);
			if !install.is_empty() {
				let urls = install.iter().map(|(_, url)| url).join(" ");
				level_props.push((format!("felix.auto.install.{level}"), urls));
			}
			if !start.is_empty() {
				let urls = start.iter().map(|(_, url)| url).join(" ");
				level_props.push((format!("felix.auto.start.{level}"), urls));
			}
		}
		for (name, value) in level_props {
			result.add_property(&name, value);
		}

		if !request.start_console {
			result.add_property("gosh.args", "--nointeractive");
		}
		if request.debug_mode {
			result.add_property("felix.log.level", "4");
		}

		result.program_args.push(cache_dir);
		result.main_class = Some(MAIN_CLASS.into());

		Ok(())
	}
}

impl FrameworkIntegrator for Felix {
	fn kind(&self) -> FrameworkKind {
		FrameworkKind::Felix
	}

	fn display_name(&self) -> &'static str {
		"Apache Felix"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::io::java::install::JavaInstallation;

	#[test]
	fn test_felix_args() {
		let mut request = LaunchRequest::new(FrameworkInstance::new(
			"felix",
			FrameworkKind::Felix,
			"/opt/felix",
		));
		request.auto_start_level = false;
		request.framework_start_level = 9;
		request.default_start_level = 2;

		let mut result = LaunchResult::new(JavaInstallation::new("/jdk"), "/work".into());
		result.bundles = vec![
			SelectedBundle::from_url("a", "file:/a.jar"),
			SelectedBundle::from_url("b", "file:/b.jar"),
			SelectedBundle {
				start: false,
				start_level: Some(5),
				..SelectedBundle::from_url("c", "file:/c.jar")
			},
		];

		Felix.extend(&mut result, &request).expect("Extension failed");

		assert_eq!(result.main_class.as_deref(), Some(MAIN_CLASS));
		let has = |arg: &str| result.vm_args.contains(&arg.to_string());
		assert!(has("-Dorg.osgi.framework.startlevel.beginning=9"));
		assert!(has("-Dfelix.startlevel.bundle=2"));
		assert!(has("-Dfelix.auto.start.2=file:/a.jar file:/b.jar"));
		assert!(has("-Dfelix.auto.install.5=file:/c.jar"));
		assert!(has("-Dgosh.args=--nointeractive"));
		assert!(!result
			.vm_args
			.iter()
			.any(|x| x.starts_with("-Dorg.osgi.framework.storage.clean")));
		assert_eq!(result.program_args.len(), 1);
		assert!(result.program_args[0].ends_with("felix-cache"));
	}

	#[test]
	fn test_felix_console_keeps_shell_interactive() {
		let mut request = LaunchRequest::new(FrameworkInstance::new(
			"felix",
			FrameworkKind::Felix,
			"/opt/felix",
		));
		request.start_console = true;
		let mut result = LaunchResult::new(JavaInstallation::new("/jdk"), "/work".into());
		Felix.extend(&mut result, &request).expect("Extension failed");
		assert!(!result.vm_args.iter().any(|x| x.starts_with("-Dgosh.args")));
	}
}
