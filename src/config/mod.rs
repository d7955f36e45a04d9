//! 設定の読み込み・検証・保持
mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    BundleFilesConfig,
    ConfigError,
    LoaderSettings,
    LoadingConfig,
    ValidationError,
};
