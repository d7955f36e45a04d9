//! Culture fallback resolution for satellite resources.
//!
//! Given the culture in effect and the cultures that have satellite bundles,
//! the resolver walks the culture's parent chain (most specific first) and
//! asks the host to load every available level in one batched call.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::culture::hierarchy::ParentChain;
use crate::culture::{
    Culture,
    CultureHierarchy,
    DefaultHierarchy,
};
use crate::host::SatelliteHost;

/// Default bound on the number of cultures visited in one parent walk.
pub const DEFAULT_MAX_PARENT_DEPTH: usize = 16;

/// Immutable set of cultures for which satellite bundles exist.
///
/// Keeps the host's order for display and a hash index for membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableCultures {
    /// Culture names in host order, without duplicates
    names: Vec<String>,
    /// Membership index over `names`
    index: HashSet<String>,
}

impl AvailableCultures {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let mut index = HashSet::with_capacity(names.len());
        let names = names.into_iter().filter(|name| index.insert(name.clone())).collect();
        Self { names, index }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl FromIterator<String> for AvailableCultures {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Computes the cultures to load for `target`.
///
/// Walks `target` and its ancestors and keeps those present in `available`,
/// ordered most specific first. The walk ends at a self-parenting root, on a
/// revisited culture, or after `max_depth` cultures.
///
/// # Examples
/// ```
/// use satellite_resources::culture::{Culture, DefaultHierarchy};
/// use satellite_resources::resolver::{AvailableCultures, resolve_culture_load_list};
///
/// let available = AvailableCultures::new(vec!["fr".to_string(), "de".to_string()]);
/// let list = resolve_culture_load_list(&available, &DefaultHierarchy, &Culture::new("fr-FR"), 16);
/// assert_eq!(list, vec!["fr".to_string()]);
/// ```
#[must_use]
pub fn resolve_culture_load_list<H>(
    available: &AvailableCultures,
    hierarchy: &H,
    target: &Culture,
    max_depth: usize,
) -> Vec<String>
where
    H: CultureHierarchy + ?Sized,
{
    ParentChain::new(hierarchy, target.clone(), max_depth)
        .filter(|culture| available.contains(culture.name()))
        .map(|culture| culture.name().to_string())
        .collect()
}

/// Loads satellite resource bundles for the initial culture and for later
/// culture changes.
///
/// Owns the culture captured at startup and the available-culture set, which
/// is fetched by the first successful [`Self::load_default_culture_resources`]
/// and read-only afterwards. Driven by one logical task; the `&mut self`
/// receiver on the priming call serializes it against everything else.
#[derive(Debug)]
pub struct SatelliteResourcesLoader<T, H = DefaultHierarchy> {
    /// Host that lists and loads satellite bundles
    host: T,
    /// Culture database
    hierarchy: H,
    /// Culture in effect at startup
    initial_culture: Culture,
    /// Host answer to the fetch, set at most once (`None` inside: not localized)
    available_cultures: OnceLock<Option<AvailableCultures>>,
    /// Bound on parent-walk length
    max_parent_depth: usize,
}

impl<T: SatelliteHost> SatelliteResourcesLoader<T> {
    /// Creates a loader using the default culture hierarchy.
    #[must_use]
    pub const fn new(host: T, initial_culture: Culture) -> Self {
        Self::with_hierarchy(host, DefaultHierarchy, initial_culture)
    }
}

impl<T: SatelliteHost, H: CultureHierarchy> SatelliteResourcesLoader<T, H> {
    #[must_use]
    pub const fn with_hierarchy(host: T, hierarchy: H, initial_culture: Culture) -> Self {
        Self {
            host,
            hierarchy,
            initial_culture,
            available_cultures: OnceLock::new(),
            max_parent_depth: DEFAULT_MAX_PARENT_DEPTH,
        }
    }

    /// Sets the bound on parent-walk length.
    ///
    /// The target culture itself is always checked, so `0` acts as `1`.
    #[must_use]
    pub const fn with_max_parent_depth(mut self, max_parent_depth: usize) -> Self {
        self.max_parent_depth = max_parent_depth;
        self
    }

    #[must_use]
    pub const fn initial_culture(&self) -> &Culture {
        &self.initial_culture
    }

    /// Cultures with satellite bundles, `None` until fetched or when the host
    /// reported none.
    #[must_use]
    pub fn available_cultures(&self) -> Option<&AvailableCultures> {
        self.available_cultures.get().and_then(Option::as_ref)
    }

    #[must_use]
    pub const fn host(&self) -> &T {
        &self.host
    }

    #[must_use]
    pub const fn hierarchy(&self) -> &H {
        &self.hierarchy
    }

    #[must_use]
    pub const fn max_parent_depth(&self) -> usize {
        self.max_parent_depth
    }

    /// Fetches the available cultures and loads bundles for the initial culture.
    ///
    /// Does nothing when the initial culture is invariant. Must complete
    /// before anything reads localized resources for the initial culture.
    /// Later calls reuse the fetched set and only repeat the resolution pass.
    ///
    /// # Errors
    /// Host errors from the fetch or load call, unchanged.
    pub async fn load_default_culture_resources(&mut self) -> Result<(), T::Error> {
        if self.initial_culture.is_invariant() {
            tracing::debug!("Initial culture is invariant, no satellite resources needed");
            return Ok(());
        }

        if self.available_cultures.get().is_none() {
            let fetched = self.host.fetch_available_cultures()?;
            tracing::debug!(
                initial_culture = %self.initial_culture,
                available = ?fetched,
                "Fetched available satellite cultures"
            );
            let _ = self.available_cultures.set(fetched.map(AvailableCultures::new));
        }

        self.load_for_culture(&self.initial_culture).await
    }

    /// Loads bundles for `current` after a runtime culture change.
    ///
    /// Does nothing when `current` is the initial culture, since that case is
    /// covered by [`Self::load_default_culture_resources`]. Every other call
    /// re-walks and re-loads.
    ///
    /// # Errors
    /// Host errors from the load call, unchanged.
    pub async fn load_user_culture_resources(&self, current: &Culture) -> Result<(), T::Error> {
        if *current == self.initial_culture {
            return Ok(());
        }

        self.load_for_culture(current).await
    }

    /// Resolution pass shared by both entry points.
    async fn load_for_culture(&self, culture: &Culture) -> Result<(), T::Error> {
        let Some(available) = self.available_cultures() else {
            return Ok(());
        };

        let cultures_to_load =
            resolve_culture_load_list(available, &self.hierarchy, culture, self.max_parent_depth);
        if cultures_to_load.is_empty() {
            tracing::debug!(culture = %culture, "No satellite bundles available for culture");
            return Ok(());
        }

        tracing::debug!(
            culture = %culture,
            cultures = ?cultures_to_load,
            "Loading satellite bundles"
        );
        self.host.load_satellite_assemblies(&cultures_to_load).await
    }
}
