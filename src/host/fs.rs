//! Satellite host backed by JSON bundles in a workspace directory.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    Arc,
    OnceLock,
};

use futures::{
    StreamExt,
    TryStreamExt,
};
use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use super::{
    LoaderError,
    SatelliteHost,
};
use crate::config::LoaderSettings;
use crate::culture::Culture;
use crate::culture::codes::detect_culture_from_path;
use crate::store::{
    ResourceBundle,
    ResourceStore,
};

/// Bundle files grouped by culture, each group sorted by path
type BundleIndex = BTreeMap<Culture, Vec<PathBuf>>;

/// Reports and loads satellite bundles found under a workspace root.
///
/// A bundle is a JSON file matching `bundleFiles.filePattern` whose path
/// names a known culture (`locales/fr.json`, `satellites/de-CH/app.json`).
/// Loaded bundles are registered in the host's [`ResourceStore`].
///
/// The workspace is walked once. The bundle index built by the first fetch
/// (or load) serves every later load.
#[derive(Debug, Clone)]
pub struct FileSystemHost {
    /// Workspace root
    root: PathBuf,
    /// Discovery and loading settings
    settings: LoaderSettings,
    /// Destination of loaded bundles
    store: ResourceStore,
    /// Bundle files found by the first walk
    index: Arc<OnceLock<BundleIndex>>,
}

impl FileSystemHost {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, settings: LoaderSettings) -> Self {
        Self {
            root: root.into(),
            settings,
            store: ResourceStore::new(),
            index: Arc::new(OnceLock::new()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn store(&self) -> &ResourceStore {
        &self.store
    }

    #[must_use]
    pub const fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Builds a glob set from `patterns`.
    fn build_glob_set<I, S>(patterns: I) -> Result<GlobSet, LoaderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut added = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|source| LoaderError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
            added.push(pattern.to_string());
        }
        builder
            .build()
            .map_err(|source| LoaderError::InvalidPatternSet { patterns: added, source })
    }

    /// ワークスペースを走査してカルチャごとのバンドルファイルを収集する
    fn discover_bundles(
        root: &Path,
        file_pattern: &str,
        exclude_patterns: &[String],
    ) -> Result<BundleIndex, LoaderError> {
        let include_set = Self::build_glob_set([file_pattern])?;
        let exclude_set = Self::build_glob_set(exclude_patterns)?;

        let mut index = BundleIndex::new();
        for result in WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(root) else {
                continue;
            };
            if !include_set.is_match(relative_path) || exclude_set.is_match(relative_path) {
                continue;
            }

            let Some(culture) = detect_culture_from_path(relative_path) else {
                tracing::debug!(
                    path = %relative_path.display(),
                    "No culture in bundle path, skipping"
                );
                continue;
            };

            index.entry(culture).or_default().push(path.to_path_buf());
        }

        for paths in index.values_mut() {
            paths.sort();
        }

        Ok(index)
    }

    /// Reads and parses one bundle file.
    async fn read_bundle(
        culture: Culture,
        path: PathBuf,
        separator: String,
    ) -> Result<ResourceBundle, LoaderError> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoaderError::Read { path: path.clone(), source })?;

        ResourceBundle::from_json(culture, path.clone(), &content, &separator)
            .map_err(|source| LoaderError::Parse { path, source })
    }
}

impl SatelliteHost for FileSystemHost {
    type Error = LoaderError;

    fn fetch_available_cultures(&self) -> Result<Option<Vec<String>>, Self::Error> {
        if !self.root.is_dir() {
            tracing::debug!(root = %self.root.display(), "Workspace root not found");
            return Ok(None);
        }

        let index = if let Some(index) = self.index.get() {
            index
        } else {
            let index = Self::discover_bundles(
                &self.root,
                &self.settings.bundle_files.file_pattern,
                &self.settings.exclude_patterns,
            )?;
            self.index.get_or_init(|| index)
        };

        Ok(Some(index.keys().map(|culture| culture.name().to_string()).collect()))
    }

    async fn load_satellite_assemblies(&self, cultures: &[String]) -> Result<(), Self::Error> {
        let index = if let Some(index) = self.index.get() {
            index
        } else {
            let root = self.root.clone();
            let file_pattern = self.settings.bundle_files.file_pattern.clone();
            let exclude_patterns = self.settings.exclude_patterns.clone();
            let index = tokio::task::spawn_blocking(move || {
                Self::discover_bundles(&root, &file_pattern, &exclude_patterns)
            })
            .await??;
            self.index.get_or_init(|| index)
        };

        let requested: Vec<(Culture, PathBuf)> = cultures
            .iter()
            .map(|name| Culture::new(name))
            .filter_map(|culture| index.get_key_value(&culture))
            .flat_map(|(culture, paths)| paths.iter().map(|path| (culture.clone(), path.clone())))
            .collect();

        let separator = &self.settings.key_separator;
        let concurrency = self.settings.loading.effective_concurrency();
        tracing::debug!(
            cultures = ?cultures,
            file_count = requested.len(),
            concurrency,
            "Reading satellite bundles"
        );

        let bundles: Vec<ResourceBundle> = futures::stream::iter(requested)
            .map(|(culture, path)| Self::read_bundle(culture, path, separator.clone()))
            .buffered(concurrency)
            .try_collect()
            .await?;

        for bundle in bundles {
            self.store.insert(bundle).await;
        }

        Ok(())
    }
}
