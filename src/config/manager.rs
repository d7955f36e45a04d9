//! ワークスペース設定の保持とローダーの組み立て

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    LoaderSettings,
    loader,
};
use crate::culture::Culture;
use crate::host::FileSystemHost;
use crate::resolver::SatelliteResourcesLoader;

/// 検証済みのワークスペース設定と、そこから決まる起動時カルチャ
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// ワークスペースのルートパス
    workspace_root: PathBuf,

    /// 検証済みの設定
    settings: LoaderSettings,

    /// 起動時カルチャ（設定の `initialCulture`、なければ環境変数）
    initial_culture: Culture,
}

impl ConfigManager {
    /// ワークスペースの設定を読み込み、起動時カルチャを決める
    ///
    /// 設定ファイルがなければデフォルト値を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load(workspace_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let workspace_root = workspace_root.into();
        let settings = loader::read_workspace_settings(&workspace_root)?.unwrap_or_default();
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let initial_culture = settings.resolve_initial_culture();
        tracing::debug!(
            workspace_root = %workspace_root.display(),
            initial_culture = %initial_culture,
            "Workspace settings loaded"
        );

        Ok(Self { workspace_root, settings, initial_culture })
    }

    #[must_use]
    pub const fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    #[must_use]
    pub const fn initial_culture(&self) -> &Culture {
        &self.initial_culture
    }

    /// 設定どおりのファイルシステムホストとローダーを作る
    #[must_use]
    pub fn into_loader(self) -> SatelliteResourcesLoader<FileSystemHost> {
        let max_parent_depth = self.settings.max_parent_depth;
        let host = FileSystemHost::new(self.workspace_root, self.settings);
        SatelliteResourcesLoader::new(host, self.initial_culture)
            .with_max_parent_depth(max_parent_depth)
    }
}
