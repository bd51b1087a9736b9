//! Cross-layer consistency check of IDE and linter declarations

use crate::model::LayeredConfig;
use crate::reporter::Reporter;
use crate::{Error, IdentityField, Result};

/// Check that the local layer declares the same IDE and linter as the
/// effective configuration.
///
/// A mismatch is reported through `reporter` before the error is returned;
/// `local_display_path` is how the local file is named in that message.
/// Comparison is exact: an empty local value never matches a non-empty
/// effective one.
pub fn verify(
    config: &LayeredConfig,
    local_display_path: &str,
    reporter: &dyn Reporter,
) -> Result<()> {
    let effective = config.effective_identity();
    if effective.is_unconstrained() {
        return Ok(());
    }

    let Some(local) = config.local_echo_yaml()? else {
        return Ok(());
    };

    let checks = [
        (IdentityField::Ide, &effective.ide, &local.ide),
        (IdentityField::Linter, &effective.linter, &local.linter),
    ];
    for (field, effective_value, local_value) in checks {
        if effective_value != local_value {
            reporter.error(&format!(
                "'{field}: {effective_value}' is specified in one of files provided by 'imports' from {local_display_path} '{field}' is required in root qodana.yaml"
            ));
            reporter.error(&format!("Add `{field}: {effective_value}` to {local_display_path}"));
            return Err(Error::Mismatch {
                field,
                effective: effective_value.clone(),
                local: local_value.clone(),
            });
        }
    }
    Ok(())
}
