use super::scan::GlobBundleProvider;
use super::{
	group_by_start_level, FrameworkBundleKind, FrameworkBundleProvider, FrameworkInstance,
	FrameworkIntegrator, FrameworkKind, FrameworkLaunchExtension, SelectedBundle,
};
use crate::launch::{framework_start_level, LaunchRequest, LaunchResult};

/// Main class of the Knopflerfish launcher
pub const MAIN_CLASS: &str = "org.knopflerfish.framework.Main";

const BUNDLES: GlobBundleProvider = GlobBundleProvider {
	system: &["framework.jar", "framework-*.jar"],
	shell: &["console*.jar", "consoletty*.jar"],
};

/// Knopflerfish integration
pub struct Knopflerfish;

impl FrameworkBundleProvider for Knopflerfish {
	fn get_framework_bundles(
		&self,
		instance: &FrameworkInstance,
		kind: FrameworkBundleKind,
	) -> anyhow::Result<Vec<SelectedBundle>> {
		BUNDLES.get_framework_bundles(instance, kind)
	}
}

impl FrameworkLaunchExtension for Knopflerfish {
	fn extend(&self, result: &mut LaunchResult, request: &LaunchRequest) -> anyhow::Result<()> {
		let framework_dir = result.working_dir.join("fwdir");
		result.add_property("org.osgi.framework.dir", framework_dir.to_string_lossy());
		if request.debug_mode {
			result.add_property("org.knopflerfish.framework.debug.startlevel", "true");
		}

		let mut args = Vec::new();
		if request.clean_start {
			args.push("-init".to_string());
		}
		for (level, bundles) in group_by_start_level(&result.bundles, request) {
			args.push("-initlevel".into());
			args.push(level.to_string());
			for (bundle, url) in bundles {
				args.push(if bundle.start { "-istart" } else { "-install" }.into());
				args.push(url.into());
			}
		}
		args.push("-startlevel".into());
		args.push(framework_start_level(request, &result.bundles).to_string());
		args.push("-launch".into());

		result.program_args.extend(args);
		result.main_class = Some(MAIN_CLASS.into());

		Ok(())
	}
}

impl FrameworkIntegrator for Knopflerfish {
	fn kind(&self) -> FrameworkKind {
		FrameworkKind::Knopflerfish
	}

	fn display_name(&self) -> &'static str {
		"Knopflerfish"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::io::java::install::JavaInstallation;

	#[test]
	fn test_knopflerfish_shell_bundles() {
		let tmp = tempfile::tempdir().expect("Failed to create temp dir");
		let jars = tmp.path().join("osgi/jars");
		std::fs::create_dir_all(&jars).expect("Failed to create dir");
		for name in [
			"framework.jar",
			"console-4.0.1.jar",
			"consoletty-3.0.2.jar",
			"console_all-4.0.1.jar",
			"log-4.0.0.jar",
		] {
			std::fs::write(jars.join(name), "").expect("Failed to write jar");
		}
		let instance = FrameworkInstance::new("kf", FrameworkKind::Knopflerfish, tmp.path());

		let shell = Knopflerfish
			.get_framework_bundles(&instance, FrameworkBundleKind::Shell)
			.expect("Scan failed");
		let names: Vec<_> = shell.iter().map(|x| x.name.as_str()).collect();
		assert_eq!(
			names,
			vec!["console-4.0.1", "console_all-4.0.1", "consoletty-3.0.2"]
		);

		let system = Knopflerfish
			.get_framework_bundles(&instance, FrameworkBundleKind::System)
			.expect("Scan failed");
		assert_eq!(system.len(), 1);
		assert_eq!(system[0].name, "framework");
	}

	#[test]
	fn test_knopflerfish_args() {
		let mut request = LaunchRequest::new(FrameworkInstance::new(
			"kf",
			FrameworkKind::Knopflerfish,
			"/opt/kf",
		));
		request.clean_start = true;
		request.program_parameters = "-xargs extra.xargs".into();

		let mut result = LaunchResult::new(JavaInstallation::new("/jdk"), "/work".into());
		result.program_args = vec!["-xargs".into(), "extra.xargs".into()];
		result.bundles = vec![
			SelectedBundle {
				start_level: Some(3),
				..SelectedBundle::from_url("log", "file:/log.jar")
			},
			SelectedBundle {
				start: false,
				..SelectedBundle::from_url("lib", "file:/lib.jar")
			},
		];

		Knopflerfish
			.extend(&mut result, &request)
			.expect("Extension failed");

		assert_eq!(result.main_class.as_deref(), Some(MAIN_CLASS));
		assert_eq!(
			result.program_args,
			vec![
				"-xargs",
				"extra.xargs",
				"-init",
				"-initlevel",
				"1",
				"-install",
				"file:/lib.jar",
				"-initlevel",
				"3",
				"-istart",
				"file:/log.jar",
				"-startlevel",
				"3",
				"-launch",
			]
		);
	}
}
