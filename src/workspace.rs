//! Resolves the resource set of a workspace in one pass: read settings, prime
//! the initial culture, switch to the requested one, collect its resources.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::config::{
    ConfigError,
    ConfigManager,
};
use crate::culture::Culture;
use crate::host::LoaderError;

/// Errors from resolving a workspace
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Loader(#[from] LoaderError),
}

/// Loads the satellite bundles of `workspace_root` and returns the resources
/// visible for `culture`, parent cultures merged in.
///
/// Without `culture`, the initial culture from settings (or the environment)
/// is used. An invariant initial culture loads nothing, so the result is
/// empty.
///
/// # Errors
/// Invalid settings, or a bundle that cannot be discovered, read or parsed.
pub async fn resolve_workspace_resources(
    workspace_root: &Path,
    culture: Option<&Culture>,
) -> Result<BTreeMap<String, String>, WorkspaceError> {
    let mut loader = ConfigManager::load(workspace_root)?.into_loader();
    tracing::info!(
        workspace = %workspace_root.display(),
        initial_culture = %loader.initial_culture(),
        "Loading satellite resources"
    );
    loader.load_default_culture_resources().await?;

    let culture = culture.unwrap_or_else(|| loader.initial_culture()).clone();
    loader.load_user_culture_resources(&culture).await?;

    let resources: BTreeMap<String, String> = loader
        .host()
        .store()
        .get_resource_set(loader.hierarchy(), &culture, true, loader.max_parent_depth())
        .await
        .into_iter()
        .collect();
    tracing::info!(culture = %culture, key_count = resources.len(), "Resolved resource set");

    Ok(resources)
}
