//! Integration tests for directory scanning and manifest-driven rendering

use std::fs;
use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use component_engine::{
    render_manifest, render_root, Component, ComponentRegistry, EngineConfig, Manifest,
    RenderError, RootOverrides, Value,
};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "components/default/pages/index.tpl", "<p>default index</p>");
    write(dir.path(), "components/default/layouts/footer.tpl", "<footer></footer>");
    write(dir.path(), "components/custom/pages/index.tpl", "<p>custom index</p>");
    write(dir.path(), "components/custom/notes.txt", "ignored");
    dir
}

#[test]
fn test_scan_dir_names_components_by_relative_path() {
    let dir = site_dir();
    let mut registry = ComponentRegistry::new();
    registry.add_folder("default");
    let count = registry
        .scan_dir("default", &dir.path().join("components/default"))
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(registry.component_names(), vec!["layouts/footer", "pages/index"]);

    let registry = Arc::new(registry);
    let footer = Component::create(&registry, "layouts/footer").unwrap();
    assert_eq!(footer.render().unwrap(), "<footer></footer>");
}

#[test]
fn test_scan_dir_respects_extension() {
    let dir = site_dir();
    let mut registry = ComponentRegistry::with_config(EngineConfig::new().with_extension("txt"));
    let count = registry
        .scan_dir("custom", &dir.path().join("components/custom"))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(registry.component_names(), vec!["notes"]);
}

#[test]
fn test_scan_missing_dir_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ComponentRegistry::new();
    let result = registry.scan_dir("x", &dir.path().join("absent"));
    assert!(matches!(result, Err(RenderError::Io(_))));
}

#[test]
fn test_manifest_folder_order_controls_override() {
    let dir = site_dir();
    let manifest_path = dir.path().join("site.toml");
    fs::write(
        &manifest_path,
        r#"
        root = "pages/index"
        folders = ["components/custom", "components/default"]
        "#,
    )
    .unwrap();

    let manifest = Manifest::from_file(&manifest_path).unwrap();
    assert_eq!(render_manifest(&manifest).unwrap(), "<p>custom index</p>");
}

#[test]
fn test_manifest_root_folder_pins_default() {
    let dir = site_dir();
    let manifest_path = dir.path().join("site.toml");
    fs::write(
        &manifest_path,
        r#"
        root = "pages/index"
        root_folder = "defaults"
        folders = [
            "components/custom",
            { name = "defaults", path = "components/default" },
        ]
        "#,
    )
    .unwrap();

    let manifest = Manifest::from_file(&manifest_path).unwrap();
    assert_eq!(render_manifest(&manifest).unwrap(), "<p>default index</p>");
}

#[test]
fn test_manifest_with_missing_folder_still_renders() {
    let dir = site_dir();
    let manifest_path = dir.path().join("site.toml");
    fs::write(
        &manifest_path,
        r#"
        root = "layouts/footer"
        folders = ["components/nowhere", "components/default"]
        "#,
    )
    .unwrap();

    let manifest = Manifest::from_file(&manifest_path).unwrap();
    let registry = manifest.build_registry().unwrap();
    assert_eq!(registry.folders().len(), 2);
    assert_eq!(render_manifest(&manifest).unwrap(), "<footer></footer>");
}

#[test]
fn test_manifest_unknown_root() {
    let dir = site_dir();
    let manifest_path = dir.path().join("site.toml");
    fs::write(
        &manifest_path,
        r#"
        root = "pages/about"
        folders = ["components/default"]
        "#,
    )
    .unwrap();

    let manifest = Manifest::from_file(&manifest_path).unwrap();
    let err = render_manifest(&manifest).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"unable to render component "pages/about""#);
}

#[test]
fn test_missing_manifest_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Manifest::from_file(&dir.path().join("site.toml"));
    assert!(result.is_err());
}

fn layout_site() -> (TempDir, Manifest) {
    let dir = site_dir();
    write(dir.path(), "components/custom/layouts/footer.tpl", "<footer>custom</footer>\n");
    let manifest_path = dir.path().join("site.toml");
    fs::write(
        &manifest_path,
        r#"
        root = "layouts/page"
        folders = ["components/custom", "components/default"]
        layouts = "builtin"

        [props]
        title = "Lorem Ipsum"
        contents = "<p>Body</p>"
        "#,
    )
    .unwrap();
    let manifest = Manifest::from_file(&manifest_path).unwrap();
    (dir, manifest)
}

#[test]
fn test_builtin_layouts_render_manifest_props() {
    let (_dir, manifest) = layout_site();
    let html = render_manifest(&manifest).unwrap();
    assert_eq!(
        html,
        "<!doctype html>\n<html lang=\"en\">\n<head><title>Lorem Ipsum</title></head>\n\
         <body>\n<main>\n<h1>Lorem Ipsum</h1>\n<p>Body</p></main>\n\
         <footer>custom</footer>\n</body>\n</html>\n"
    );
}

#[test]
fn test_override_props_replace_manifest_props() {
    let (_dir, manifest) = layout_site();
    let registry = Arc::new(manifest.build_registry().unwrap());
    let overrides = RootOverrides {
        props: vec![
            ("title".to_string(), Value::from("Dolor")),
            ("lang".to_string(), Value::from("fr")),
        ],
        ..RootOverrides::default()
    };
    let html = render_root(&manifest, &registry, &overrides).unwrap();
    assert!(html.contains("<html lang=\"fr\">"));
    assert!(html.contains("<title>Dolor</title>"));
    assert!(html.contains("<h1>Dolor</h1>"));
    assert!(!html.contains("Lorem Ipsum"));
    assert!(html.contains("<p>Body</p>"));
}

#[test]
fn test_override_component_and_folder() {
    let (_dir, manifest) = layout_site();
    let registry = Arc::new(manifest.build_registry().unwrap());

    let overrides = RootOverrides {
        component: Some("pages/index".to_string()),
        ..RootOverrides::default()
    };
    assert_eq!(
        render_root(&manifest, &registry, &overrides).unwrap(),
        "<p>custom index</p>"
    );

    let overrides = RootOverrides {
        component: Some("pages/index".to_string()),
        folder: Some("components/default".to_string()),
        ..RootOverrides::default()
    };
    assert_eq!(
        render_root(&manifest, &registry, &overrides).unwrap(),
        "<p>default index</p>"
    );

    let overrides = RootOverrides {
        component: Some("layouts/footer".to_string()),
        folder: Some("builtin".to_string()),
        ..RootOverrides::default()
    };
    assert_eq!(render_root(&manifest, &registry, &overrides).unwrap(), "");
}
