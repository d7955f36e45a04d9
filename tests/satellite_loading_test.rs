//! ファイルシステム上のサテライトバンドルを使ったロードの結合テスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use googletest::prelude::*;
use satellite_resources::config::LoaderSettings;
use satellite_resources::culture::Culture;
use satellite_resources::host::FileSystemHost;
use satellite_resources::resolver::SatelliteResourcesLoader;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "app/locales/fr.json", r#"{"menu": {"open": "Ouvrir", "close": "Fermer"}}"#);
    write(root, "app/locales/de.json", r#"{"menu": {"open": "Öffnen", "close": "Schließen"}}"#);
    write(root, "app/locales/de-AT.json", r#"{"menu": {"close": "Zumachen"}}"#);
    write(root, "node_modules/pkg/locales/es.json", r#"{"menu": {"open": "Abrir"}}"#);
    temp_dir
}

fn loader_for(
    root: &Path,
    initial_culture: &str,
) -> SatelliteResourcesLoader<FileSystemHost> {
    let host = FileSystemHost::new(root, LoaderSettings::default());
    SatelliteResourcesLoader::new(host, Culture::new(initial_culture))
}

async fn loaded_cultures(loader: &SatelliteResourcesLoader<FileSystemHost>) -> Vec<String> {
    loader
        .host()
        .store()
        .loaded_cultures()
        .await
        .iter()
        .map(|culture| culture.name().to_string())
        .collect()
}

#[tokio::test]
async fn prime_loads_parent_culture_bundle() {
    let workspace = create_workspace();
    let mut loader = loader_for(workspace.path(), "fr-FR");

    loader.load_default_culture_resources().await.unwrap();

    let available = loader.available_cultures().unwrap().names().to_vec();
    assert_that!(available, elements_are![eq("de"), eq("de-AT"), eq("fr")]);
    let loaded = loaded_cultures(&loader).await;
    assert_that!(loaded, elements_are![eq("fr")]);

    let open = loader
        .host()
        .store()
        .get_string(loader.hierarchy(), &Culture::new("fr-FR"), "menu.open", 16)
        .await;
    assert_that!(open, some(eq("Ouvrir")));
}

#[tokio::test]
async fn culture_change_loads_specific_and_parent_bundles() {
    let workspace = create_workspace();
    let mut loader = loader_for(workspace.path(), "fr-FR");
    loader.load_default_culture_resources().await.unwrap();
    let de_at = Culture::new("de-AT");

    loader.load_user_culture_resources(&de_at).await.unwrap();

    let loaded = loaded_cultures(&loader).await;
    assert_that!(loaded, elements_are![eq("de"), eq("de-AT"), eq("fr")]);
    let resources =
        loader.host().store().get_resource_set(loader.hierarchy(), &de_at, true, 16).await;
    assert_that!(resources.get("menu.close"), some(eq("Zumachen")));
    assert_that!(resources.get("menu.open"), some(eq("Öffnen")));
}

#[tokio::test]
async fn invariant_initial_culture_loads_nothing() {
    let workspace = create_workspace();
    let mut loader = loader_for(workspace.path(), "");

    loader.load_default_culture_resources().await.unwrap();
    loader.load_user_culture_resources(&Culture::new("de-DE")).await.unwrap();

    assert_that!(loader.available_cultures(), none());
    let loaded = loaded_cultures(&loader).await;
    assert_that!(loaded, is_empty());
}

#[tokio::test]
async fn excluded_bundles_are_not_available() {
    let workspace = create_workspace();
    let mut loader = loader_for(workspace.path(), "es-ES");

    loader.load_default_culture_resources().await.unwrap();

    assert_that!(loader.available_cultures().unwrap().contains("es"), eq(false));
    let loaded = loaded_cultures(&loader).await;
    assert_that!(loaded, is_empty());
}

#[tokio::test]
async fn broken_bundle_error_reaches_caller() {
    let workspace = create_workspace();
    write(workspace.path(), "app/locales/fr-FR.json", "{ not json");
    let mut loader = loader_for(workspace.path(), "fr-FR");

    let result = loader.load_default_culture_resources().await;

    assert_that!(result, err(displays_as(contains_substring("fr-FR.json"))));
}
