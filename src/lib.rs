//! satellite-resources
//!
//! カルチャの親チェーンをたどり、利用可能なサテライトリソースバンドルを
//! 一括でロードするためのライブラリ

pub mod config;
pub mod culture;
pub mod host;
pub mod resolver;
pub mod store;
pub mod workspace;

#[cfg(test)]
mod test_utils;

pub use culture::Culture;
pub use host::SatelliteHost;
pub use resolver::SatelliteResourcesLoader;
