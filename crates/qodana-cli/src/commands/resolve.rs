//! Single resolution pass

use colored::Colorize;

use qodana_config::{
    ArtifactSource, ConfigResolverClient, LayeredConfig, ProcessResolver, ResolveOptions,
};
use qodana_exec::ProcessRunner;
use qodana_fs::NormalizedPath;

use crate::cli::ResolveArgs;
use crate::error::Result;

/// Runner shared by git and the resolver, logging to `--log-dir` if given.
pub fn runner(args: &ResolveArgs) -> ProcessRunner {
    match &args.log_dir {
        Some(dir) => ProcessRunner::with_log_dir(dir),
        None => ProcessRunner::new(),
    }
}

pub fn resolve_options(args: &ResolveArgs) -> ResolveOptions {
    let mut options = ResolveOptions::new(&args.project_dir, &args.system_dir);
    options.local_config = args.local_config.clone();
    options.runtime = args.jre.as_ref().map(NormalizedPath::new);
    options.global_configs_file = args.global_configs_file.as_ref().map(NormalizedPath::new);
    options.global_config_id = args.global_config_id.clone();
    options
}

pub fn client(args: &ResolveArgs) -> ConfigResolverClient<ProcessResolver> {
    ConfigResolverClient::new(
        ProcessResolver::with_runner(runner(args)),
        ArtifactSource::File(NormalizedPath::new(&args.config_loader_cli)),
    )
}

/// Print where the layers of `config` live.
pub fn print_config(config: &LayeredConfig) {
    let layers = [
        ("effective", config.effective_path()),
        ("local", config.local_echo_path()),
        ("state", config.resolver_state_path()),
    ];
    for (label, path) in layers {
        match path {
            Some(path) => println!("  {:<10} {}", label.cyan(), path),
            None => println!("  {:<10} {}", label.cyan(), "(none)".dimmed()),
        }
    }
    let identity = config.effective_identity();
    if !identity.is_unconstrained() {
        println!("  {:<10} {}", "ide".cyan(), identity.ide);
        println!("  {:<10} {}", "linter".cyan(), identity.linter);
    }
}

/// Run the resolve command.
pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let config = client(args).resolve(&resolve_options(args))?;
    println!("{} {}", "Configuration directory:".bold(), config.config_dir());
    print_config(&config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> ResolveArgs {
        ResolveArgs {
            project_dir: PathBuf::from("/work/project"),
            local_config: Some("configs/qodana.yaml".into()),
            jre: Some(PathBuf::from("/usr/bin/java")),
            system_dir: PathBuf::from("/tmp/system"),
            config_loader_cli: PathBuf::from("/opt/loader.jar"),
            global_configs_file: None,
            global_config_id: Some("team".into()),
            log_dir: None,
        }
    }

    #[test]
    fn test_resolve_options_from_args() {
        let options = resolve_options(&args());

        assert_eq!(options.project_dir.as_str(), "/work/project");
        assert_eq!(options.local_config.as_deref(), Some("configs/qodana.yaml"));
        assert_eq!(options.runtime.as_ref().map(|p| p.as_str()), Some("/usr/bin/java"));
        assert_eq!(options.global_config_id.as_deref(), Some("team"));
        assert_eq!(options.output_dir().as_str(), "/tmp/system/effective-config");
    }

    #[test]
    fn test_runner_uses_log_dir() {
        let mut args = args();
        assert!(runner(&args).log_dir().is_none());

        args.log_dir = Some(PathBuf::from("/tmp/logs"));
        assert_eq!(runner(&args).log_dir(), Some(std::path::Path::new("/tmp/logs")));
    }
}
