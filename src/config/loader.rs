//! `.satellite-resources.json` の読み込み

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    LoaderSettings,
};

/// ワークスペースルートに置く設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".satellite-resources.json";

/// ワークスペースルートの設定ファイルを読む
///
/// ファイルがなければ `Ok(None)`。バリデーションは呼び出し側で行う。
pub(super) fn read_workspace_settings(
    workspace_root: &Path,
) -> Result<Option<LoaderSettings>, ConfigError> {
    let path = workspace_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(None);
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    tracing::debug!(path = %path.display(), "Read configuration file");
    serde_json::from_str(&content).map(Some).map_err(|source| ConfigError::Parse { path, source })
}
