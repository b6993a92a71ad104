use std::path::PathBuf;

use anyhow::Context;
use color_print::cprintln;
use osgirun::core::framework::{
	FrameworkBundleKind, FrameworkBundleProvider, FrameworkInstance, FrameworkKind,
};
use osgirun::core::FrameworkRegistry;
use osgirun::shared::skip_none;

use crate::output::HYPHEN_POINT;

pub fn bundles(kind: &str, path: PathBuf, shell: bool) -> anyhow::Result<()> {
	let kind: FrameworkKind = kind.parse()?;
	let registry = FrameworkRegistry::with_builtin();
	let integrator = registry
		.get(kind)
		.with_context(|| format!("No integration is registered for the {kind} framework"))?;

	let instance = FrameworkInstance::new(kind.as_str(), kind, path);
	let bundle_kind = if shell {
		FrameworkBundleKind::Shell
	} else {
		FrameworkBundleKind::System
	};
	let bundles = integrator
		.get_framework_bundles(&instance, bundle_kind)
		.context("Failed to look up framework bundles")?;

	if bundles.is_empty() {
		cprintln!("<y>No bundles found");
	}
	for bundle in bundles {
		let path = skip_none!(bundle.get_path());
		cprintln!("{}<s>{}</> <k!>{}</>", HYPHEN_POINT, bundle.name, path.display());
	}

	Ok(())
}

pub fn list() {
	let registry = FrameworkRegistry::with_builtin();
	for integrator in registry.iter() {
		cprintln!(
			"{}<s>{}</> <k!>({})</>",
			HYPHEN_POINT,
			integrator.display_name(),
			integrator.kind()
		);
	}
}
