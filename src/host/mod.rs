//! Host boundary for satellite resources.
//!
//! The resolver never talks to a concrete runtime. It depends only on
//! [`SatelliteHost`], which reports the cultures that have satellite bundles
//! and loads a batch of them.

/// File-system backed host
mod fs;
/// Host error types
mod types;

use std::future::Future;

pub use fs::FileSystemHost;
pub use types::LoaderError;

/// The two capabilities the resolver needs from its environment.
pub trait SatelliteHost: Send + Sync {
    /// Error reported by the host. Propagated to callers unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists the cultures for which a satellite bundle exists.
    ///
    /// # Returns
    /// - `Ok(Some(cultures))`: localization data is available (possibly empty)
    /// - `Ok(None)`: no localization data is configured
    fn fetch_available_cultures(&self) -> Result<Option<Vec<String>>, Self::Error>;

    /// Loads the satellite bundles for `cultures`, most specific first.
    ///
    /// Called with a non-empty list.
    fn load_satellite_assemblies(
        &self,
        cultures: &[String],
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
