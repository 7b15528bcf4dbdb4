//! Settings resolution: environment first, then Parameter Store.

use petadoptions_core::config::{merge_parameters, resolve_from_env, ResolvedSettings, Setting};

use crate::error::Result;
use crate::parameters::ParameterSource;

/// Resolves `settings` from `<prefix>_<NAME>` environment variables, fetching
/// whatever is unset from Parameter Store in one batch.
pub async fn resolve_settings(
    prefix: &str,
    settings: &[Setting],
    source: &dyn ParameterSource,
) -> Result<ResolvedSettings> {
    resolve_settings_with(prefix, settings, source, |key| std::env::var(key).ok()).await
}

/// [`resolve_settings`] with a custom environment lookup.
pub async fn resolve_settings_with<F>(
    prefix: &str,
    settings: &[Setting],
    source: &dyn ParameterSource,
    lookup: F,
) -> Result<ResolvedSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let (resolved, missing) = resolve_from_env(prefix, settings, lookup);
    if missing.is_empty() {
        return Ok(resolved);
    }

    let names: Vec<&str> = missing.iter().map(|s| s.parameter).collect();
    tracing::debug!(parameters = ?names, "Resolving settings from Parameter Store");
    let fetched = source.get_parameters(&names).await?;

    Ok(merge_parameters(resolved, &missing, &fetched)?)
}
