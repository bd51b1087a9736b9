//! Effective configuration resolution for Qodana analysis runs
//!
//! A resolution pass merges the project's local `qodana.yaml` with any
//! imported or global configuration layers. The merge itself happens in an
//! external resolver program (`config-loader-cli.jar`); this crate stages
//! that program, invokes it, validates the set of files it produced and
//! checks that the declared IDE/linter agree across layers.
//!
//! # Example
//!
//! ```ignore
//! use qodana_config::{ArtifactSource, ConfigResolverClient, ProcessResolver, ResolveOptions};
//! use qodana_fs::NormalizedPath;
//!
//! let client = ConfigResolverClient::new(
//!     ProcessResolver::new(),
//!     ArtifactSource::File(NormalizedPath::new("/opt/qodana/config-loader-cli.jar")),
//! );
//! let mut options = ResolveOptions::new("/work/project", "/tmp/qodana-system");
//! options.runtime = Some(NormalizedPath::new("/usr/bin/java"));
//! let config = client.resolve(&options)?;
//! println!("{:?}", config.effective_path());
//! ```

pub mod artifact;
pub mod client;
pub mod discovery;
pub mod error;
pub mod invocation;
pub mod model;
pub mod reporter;
pub mod resolver;
pub mod verify;
pub mod yaml;

pub use artifact::{ArtifactProvisioner, ArtifactSource, ProvisionedArtifact};
pub use client::{ConfigResolverClient, ResolveOptions};
pub use discovery::{find_default_local_config, local_config_path_with_project};
pub use error::{Error, IdentityField, IncoherentOutput, Result};
pub use invocation::{Invocation, InvocationArg, InvocationBuilder, QuoteStyle};
pub use model::LayeredConfig;
pub use reporter::{ConsoleReporter, Message, RecordingReporter, Reporter};
pub use resolver::{ConfigResolver, ProcessResolver};
pub use verify::verify;
pub use yaml::{Identity, QodanaYaml};
