use osgirun_core::io::java::install::system::find_system_java;
use osgirun_core::{Configuration, Paths, ProxySettings};

/// Create the core configuration from the environment. The default runtime is
/// found from `JAVA_HOME`, then from `java` on the PATH, then by looking through
/// the usual installation folders. Proxy settings come from the proxy environment
/// variables
pub fn environment_configuration(paths: &Paths) -> Configuration {
	Configuration::builder()
		.run_dir(paths.run.clone())
		.default_runtime(find_system_java())
		.proxy(ProxySettings::from_env())
		.build()
}
