//! Running the configuration resolver

use qodana_exec::ProcessRunner;

use crate::invocation::Invocation;
use crate::{Error, Result};

/// Tool name used for the resolver's log file.
pub const RESOLVER_TOOL: &str = "config-loader-cli";

/// Executes a built [`Invocation`] and reports how it ended.
///
/// Implementations return [`Error::ResolutionFailed`] for a nonzero exit
/// and [`Error::ResolverLaunch`] when the program could not be started.
pub trait ConfigResolver {
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

impl<F> ConfigResolver for F
where
    F: Fn(&Invocation) -> Result<()>,
{
    fn run(&self, invocation: &Invocation) -> Result<()> {
        self(invocation)
    }
}

/// Runs the resolver as a child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessResolver {
    runner: ProcessRunner,
}

impl ProcessResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runner(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

impl ConfigResolver for ProcessResolver {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let output = self
            .runner
            .run(
                None,
                RESOLVER_TOOL,
                invocation.program().to_native(),
                invocation.raw_args().as_slice(),
            )
            .map_err(|source| Error::ResolverLaunch { source })?;

        if !output.stdout.trim().is_empty() {
            tracing::info!(output = %output.stdout.trim_end(), "Resolver output");
        }
        if output.success() {
            Ok(())
        } else {
            Err(Error::ResolutionFailed {
                exit_code: output.code,
            })
        }
    }
}
