//! Component Engine - folder-ordered component resolution and rendering
//!
//! Components are named render callbacks stored in folders. Folders are
//! searched in the order they were added, so registering a "custom" folder
//! before a "default" one lets it override components by name. A component
//! instance carries its own props, which the callback reads with optional
//! required/type validation, and can embed further components.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use component_engine::{Component, ComponentRegistry, Kind, PropOptions};
//!
//! let mut registry = ComponentRegistry::new();
//! registry.add_folder("custom");
//! registry.add_folder("default");
//! registry.register("default", "title", |ctx| {
//!     let title = ctx.prop("title", &PropOptions::new().required().of_type(Kind::String))?;
//!     ctx.write("<h1>");
//!     ctx.embed_value(&title)?;
//!     ctx.write("</h1>");
//!     Ok(())
//! });
//! let registry = Arc::new(registry);
//!
//! let html = Component::create(&registry, "title")
//!     .unwrap()
//!     .assign("title", "Lorem Ipsum")
//!     .render()
//!     .unwrap();
//! assert_eq!(html, "<h1>Lorem Ipsum</h1>");
//! ```

mod capture;
pub mod component;
pub mod config;
pub mod context;
pub mod error;
pub mod layouts;
pub mod prop;
pub mod registry;
pub mod value;

use std::sync::Arc;

pub use component::Component;
pub use config::{ConfigError, EngineConfig, FolderEntry, Manifest};
pub use context::RenderContext;
pub use error::RenderError;
pub use prop::PropOptions;
pub use registry::{ComponentRegistry, RenderFn};
pub use value::{Kind, KindSet, UnknownKind, Value};

/// Create, assign and render a component in one call
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use component_engine::{render, ComponentRegistry};
///
/// let mut registry = ComponentRegistry::new();
/// registry.add_folder("default");
/// registry.register_static("default", "footer", "<footer></footer>");
///
/// let html = render(&Arc::new(registry), "footer", Vec::<(String, String)>::new()).unwrap();
/// assert_eq!(html, "<footer></footer>");
/// ```
pub fn render<I, K, V>(
    registry: &Arc<ComponentRegistry>,
    name: &str,
    props: I,
) -> Result<String, RenderError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    Component::create(registry, name)?.assign_all(props).render()
}

/// Command-line adjustments to what a manifest renders
#[derive(Debug, Clone, Default)]
pub struct RootOverrides {
    /// Component to render instead of the manifest root
    pub component: Option<String>,
    /// Folder to pin the rendered component to
    pub folder: Option<String>,
    /// Props assigned after the manifest's props
    pub props: Vec<(String, Value)>,
}

/// Render the root component a manifest names, with the manifest's props
pub fn render_manifest(manifest: &Manifest) -> Result<String, RenderError> {
    let registry = Arc::new(manifest.build_registry()?);
    render_root(manifest, &registry, &RootOverrides::default())
}

/// Render a manifest's root through an already built registry
///
/// The manifest's `root_folder` pin only applies when the manifest's own root
/// is rendered. Override props replace manifest props of the same name.
pub fn render_root(
    manifest: &Manifest,
    registry: &Arc<ComponentRegistry>,
    overrides: &RootOverrides,
) -> Result<String, RenderError> {
    let (name, pinned) = match &overrides.component {
        Some(name) => (name.clone(), None),
        None => (
            manifest.root.clone().unwrap_or_default(),
            manifest.root_folder.clone(),
        ),
    };
    let root = match overrides.folder.clone().or(pinned) {
        Some(folder) => Component::create_in(registry, name, folder)?,
        None => Component::create(registry, name)?,
    };
    root.assign_all(manifest.props())
        .assign_all(overrides.props.iter().cloned())
        .render()
}
