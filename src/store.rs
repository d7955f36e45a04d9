//! Loaded satellite resource bundles and culture-aware lookup.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::culture::hierarchy::ParentChain;
use crate::culture::{
    Culture,
    CultureHierarchy,
};

/// A parsed satellite bundle for one culture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBundle {
    pub culture: Culture,

    pub file_path: PathBuf,

    /// Flattened resource key map (e.g., "common.hello" -> "Bonjour").
    pub keys: HashMap<String, String>,
}

impl ResourceBundle {
    /// Builds a bundle from JSON text, flattening nested objects with `separator`.
    ///
    /// # Errors
    /// Returns the parse error when `json_text` is not valid JSON.
    pub fn from_json(
        culture: Culture,
        file_path: PathBuf,
        json_text: &str,
        separator: &str,
    ) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json_text)?;
        let keys = flatten_json(&value, separator, None);
        Ok(Self { culture, file_path, keys })
    }
}

/// Flatten nested JSON object into separator-joined key map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use satellite_resources::store::flatten_json;
///
/// let json = json!({
///     "common": {
///         "hello": "Bonjour",
///         "goodbye": "Au revoir"
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("common.hello"), Some(&"Bonjour".to_string()));
/// assert_eq!(flattened.get("common.goodbye"), Some(&"Au revoir".to_string()));
/// ```
#[must_use]
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        Value::Null => {}
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}

/// Shared store of loaded satellite bundles, keyed by culture.
///
/// Lookups fall back through the culture's parent chain, so a key missing
/// from `fr-CA` is served from `fr` when that bundle is loaded.
#[derive(Clone, Debug, Default)]
pub struct ResourceStore {
    /// Merged keys per culture
    resources: Arc<RwLock<HashMap<Culture, HashMap<String, String>>>>,
}

impl ResourceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bundle. Keys from later bundles of the same culture win.
    pub async fn insert(&self, bundle: ResourceBundle) {
        tracing::debug!(
            culture = %bundle.culture,
            file_path = %bundle.file_path.display(),
            key_count = bundle.keys.len(),
            "Registering satellite bundle"
        );
        let mut resources = self.resources.write().await;
        resources.entry(bundle.culture).or_default().extend(bundle.keys);
    }

    /// Cultures with at least one registered bundle, sorted by name.
    pub async fn loaded_cultures(&self) -> Vec<Culture> {
        let resources = self.resources.read().await;
        let mut cultures: Vec<Culture> = resources.keys().cloned().collect();
        cultures.sort();
        cultures
    }

    /// Looks up `key` for `culture`, walking parent cultures until found.
    pub async fn get_string<H>(
        &self,
        hierarchy: &H,
        culture: &Culture,
        key: &str,
        max_depth: usize,
    ) -> Option<String>
    where
        H: CultureHierarchy + ?Sized,
    {
        let resources = self.resources.read().await;
        ParentChain::new(hierarchy, culture.clone(), max_depth)
            .find_map(|candidate| resources.get(&candidate)?.get(key).cloned())
    }

    /// Returns every key/value visible for `culture`.
    ///
    /// With `try_parents`, keys from ancestor cultures are merged in and the
    /// most specific culture wins on conflicts. Without it, only the exact
    /// culture's keys are returned.
    pub async fn get_resource_set<H>(
        &self,
        hierarchy: &H,
        culture: &Culture,
        try_parents: bool,
        max_depth: usize,
    ) -> HashMap<String, String>
    where
        H: CultureHierarchy + ?Sized,
    {
        let resources = self.resources.read().await;
        if !try_parents {
            return resources.get(culture).cloned().unwrap_or_default();
        }

        let mut merged = HashMap::new();
        for candidate in ParentChain::new(hierarchy, culture.clone(), max_depth) {
            if let Some(keys) = resources.get(&candidate) {
                for (key, value) in keys {
                    merged.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
        }
        merged
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::culture::DefaultHierarchy;

    fn bundle(culture: &str, keys: &[(&str, &str)]) -> ResourceBundle {
        ResourceBundle {
            culture: Culture::new(culture),
            file_path: PathBuf::from(format!("locales/{culture}.json")),
            keys: keys.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
        }
    }

    #[rstest]
    fn flatten_json_handles_nesting_arrays_and_scalars() {
        let value = json!({
            "menu": { "open": "Ouvrir", "items": ["Un", "Deux"] },
            "count": 3,
            "enabled": true,
            "missing": null
        });

        let flattened = flatten_json(&value, ".", None);

        assert_that!(flattened.get("menu.open"), some(eq("Ouvrir")));
        assert_that!(flattened.get("menu.items[1]"), some(eq("Deux")));
        assert_that!(flattened.get("count"), some(eq("3")));
        assert_that!(flattened.get("enabled"), some(eq("true")));
        assert_that!(flattened.get("missing"), none());
    }

    #[rstest]
    fn bundle_from_json_uses_separator() {
        let bundle = ResourceBundle::from_json(
            Culture::new("de"),
            PathBuf::from("locales/de.json"),
            r#"{"app": {"title": "Titel"}}"#,
            ":",
        )
        .unwrap();

        assert_that!(bundle.keys.get("app:title"), some(eq("Titel")));
    }

    #[rstest]
    fn bundle_from_invalid_json_fails() {
        let result = ResourceBundle::from_json(
            Culture::new("de"),
            PathBuf::from("locales/de.json"),
            "{ invalid",
            ".",
        );

        assert_that!(result, err(anything()));
    }

    #[tokio::test]
    async fn get_string_falls_back_to_parent_culture() {
        let store = ResourceStore::new();
        store.insert(bundle("fr", &[("hello", "Bonjour"), ("bye", "Au revoir")])).await;
        store.insert(bundle("fr-CA", &[("hello", "Allô")])).await;
        let fr_ca = Culture::new("fr-CA");

        let hello = store.get_string(&DefaultHierarchy, &fr_ca, "hello", 16).await;
        let bye = store.get_string(&DefaultHierarchy, &fr_ca, "bye", 16).await;
        let missing = store.get_string(&DefaultHierarchy, &fr_ca, "missing", 16).await;

        assert_that!(hello, some(eq("Allô")));
        assert_that!(bye, some(eq("Au revoir")));
        assert_that!(missing, none());
    }

    #[tokio::test]
    async fn get_resource_set_merges_specific_first() {
        let store = ResourceStore::new();
        store.insert(bundle("", &[("hello", "Hello"), ("ok", "OK")])).await;
        store.insert(bundle("fr", &[("hello", "Bonjour")])).await;
        let fr_fr = Culture::new("fr-FR");

        let merged = store.get_resource_set(&DefaultHierarchy, &fr_fr, true, 16).await;
        let exact = store.get_resource_set(&DefaultHierarchy, &fr_fr, false, 16).await;

        assert_that!(merged.get("hello"), some(eq("Bonjour")));
        assert_that!(merged.get("ok"), some(eq("OK")));
        assert_that!(exact, is_empty());
    }

    #[tokio::test]
    async fn insert_merges_bundles_of_same_culture() {
        let store = ResourceStore::new();
        store.insert(bundle("es", &[("a", "1")])).await;
        store.insert(bundle("es", &[("b", "2")])).await;
        store.insert(bundle("de", &[("a", "eins")])).await;

        let set = store.get_resource_set(&DefaultHierarchy, &Culture::new("es"), false, 16).await;

        let loaded: Vec<String> = store
            .loaded_cultures()
            .await
            .iter()
            .map(|culture| culture.name().to_string())
            .collect();

        assert_that!(set, len(eq(2)));
        assert_that!(loaded, elements_are![eq("de"), eq("es")]);
    }
}
