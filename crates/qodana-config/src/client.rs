//! One configuration resolution pass, end to end

use std::path::Path;

use qodana_fs::{NormalizedPath, QodanaPath};

use crate::artifact::{ArtifactProvisioner, ArtifactSource};
use crate::discovery::{find_default_local_config, local_config_path_with_project};
use crate::invocation::{InvocationBuilder, QuoteStyle};
use crate::model::LayeredConfig;
use crate::reporter::{ConsoleReporter, Reporter};
use crate::resolver::ConfigResolver;
use crate::verify::verify;
use crate::Result;

/// Inputs of a single resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    pub project_dir: NormalizedPath,

    /// Local config relative to `project_dir` (or absolute). Discovered
    /// when `None`.
    pub local_config: Option<String>,

    pub global_configs_file: Option<NormalizedPath>,
    pub global_config_id: Option<String>,

    /// Launcher used to run the resolver artifact, e.g. `java`
    pub runtime: Option<NormalizedPath>,

    /// Process-owned directory for the artifact and resolver output
    pub scratch_root: NormalizedPath,

    /// Name of the output directory under `scratch_root`
    pub output_dir_name: String,
}

impl ResolveOptions {
    pub fn new(project_dir: impl AsRef<Path>, scratch_root: impl AsRef<Path>) -> Self {
        Self {
            project_dir: NormalizedPath::new(project_dir),
            local_config: None,
            global_configs_file: None,
            global_config_id: None,
            runtime: None,
            scratch_root: NormalizedPath::new(scratch_root),
            output_dir_name: QodanaPath::EffectiveConfigDir.as_str().to_string(),
        }
    }

    pub fn output_dir(&self) -> NormalizedPath {
        self.scratch_root.join(&self.output_dir_name)
    }
}

/// Drives a resolver through provisioning, invocation and verification.
pub struct ConfigResolverClient<R> {
    resolver: R,
    artifact: ArtifactSource,
    reporter: Box<dyn Reporter>,
}

impl<R: ConfigResolver> ConfigResolverClient<R> {
    pub fn new(resolver: R, artifact: ArtifactSource) -> Self {
        Self::with_reporter(resolver, artifact, Box::new(ConsoleReporter))
    }

    pub fn with_reporter(
        resolver: R,
        artifact: ArtifactSource,
        reporter: Box<dyn Reporter>,
    ) -> Self {
        Self {
            resolver,
            artifact,
            reporter,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve the effective configuration for `options.project_dir`.
    ///
    /// The provisioned artifact is removed before this returns, whatever
    /// the outcome. The output directory is emptied first so files from an
    /// earlier pass can never be mistaken for this pass's output.
    pub fn resolve(&self, options: &ResolveOptions) -> Result<LayeredConfig> {
        let local_display = match &options.local_config {
            Some(local) if !local.is_empty() => local.clone(),
            _ => find_default_local_config(&options.project_dir),
        };
        let local_path = local_config_path_with_project(&options.project_dir, &local_display);

        let artifact = ArtifactProvisioner::new(&options.scratch_root).provision(&self.artifact)?;

        let output_dir = options.output_dir();
        qodana_fs::io::reset_dir(&output_dir)?;

        let invocation = InvocationBuilder::new(output_dir)
            .runtime(options.runtime.clone())
            .artifact(Some(artifact.path().clone()))
            .local_config(Some(local_path))
            .global_configs_file(options.global_configs_file.clone())
            .global_config_id(options.global_config_id.clone())
            .build()?;

        tracing::debug!(
            command = %invocation.command_line(QuoteStyle::native()),
            "Running configuration resolver"
        );
        self.resolver.run(&invocation)?;
        drop(artifact);

        let config = LayeredConfig::discover(invocation.output_dir())?;
        verify(&config, &local_display, self.reporter.as_ref())?;

        self.reporter.success("Loaded Qodana Configuration");
        Ok(config)
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for ConfigResolverClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolverClient")
            .field("resolver", &self.resolver)
            .field("artifact", &self.artifact)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::{Invocation, LOCAL_CONFIG_FLAG};
    use crate::reporter::RecordingReporter;
    use crate::Error;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[test]
    fn test_default_output_dir_is_under_scratch_root() {
        let options = ResolveOptions::new("/work/project", "/tmp/system");
        assert_eq!(options.output_dir().as_str(), "/tmp/system/effective-config");
    }

    #[test]
    fn test_discovered_local_config_is_passed_to_resolver() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("qodana.yml"), "linter: jetbrains/qodana-jvm\n").unwrap();

        let seen = RefCell::new(None);
        let resolver = |invocation: &Invocation| -> crate::Result<()> {
            *seen.borrow_mut() = invocation
                .flag_value(LOCAL_CONFIG_FLAG)
                .map(|arg| arg.as_str().to_string());
            Ok(())
        };
        let client = ConfigResolverClient::with_reporter(
            resolver,
            ArtifactSource::Bytes(b"jar".to_vec()),
            Box::new(RecordingReporter::new()),
        );
        let mut options = ResolveOptions::new(&project, temp.path().join("scratch"));
        options.runtime = Some(NormalizedPath::new("/usr/bin/java"));

        client.resolve(&options).unwrap();

        let local = seen.borrow().clone().unwrap();
        assert!(local.ends_with("project/qodana.yml"), "{local}");
    }

    #[test]
    fn test_missing_runtime_fails_before_running_resolver() {
        let temp = TempDir::new().unwrap();
        let ran = RefCell::new(false);
        let resolver = |_: &Invocation| -> crate::Result<()> {
            *ran.borrow_mut() = true;
            Ok(())
        };
        let client = ConfigResolverClient::with_reporter(
            resolver,
            ArtifactSource::Bytes(b"jar".to_vec()),
            Box::new(RecordingReporter::new()),
        );

        let err = client
            .resolve(&ResolveOptions::new(temp.path(), temp.path().join("scratch")))
            .unwrap_err();

        assert!(matches!(err, Error::RuntimeNotFound));
        assert!(!*ran.borrow());
        assert!(!temp.path().join("scratch/tools/config-loader-cli.jar").exists());
    }

    #[test]
    fn test_stale_output_is_removed_before_resolution() {
        let temp = TempDir::new().unwrap();
        let scratch = temp.path().join("scratch");
        let stale = scratch.join("effective-config");
        std::fs::create_dir_all(&stale).unwrap();
        std::fs::write(stale.join("qodana.yaml"), "ide: QDPY\n").unwrap();

        let client = ConfigResolverClient::with_reporter(
            |_: &Invocation| -> crate::Result<()> { Ok(()) },
            ArtifactSource::Bytes(b"jar".to_vec()),
            Box::new(RecordingReporter::new()),
        );
        let mut options = ResolveOptions::new(temp.path(), &scratch);
        options.runtime = Some(NormalizedPath::new("/usr/bin/java"));

        let config = client.resolve(&options).unwrap();
        assert!(config.local_echo_path().is_none());
        assert!(config.effective_path().is_none());
    }
}
