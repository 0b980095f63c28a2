//! Component registry: ordered folders and the render callbacks they hold

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use walkdir::WalkDir;

use crate::config::EngineConfig;
use crate::context::RenderContext;
use crate::error::RenderError;

/// A render callback: writes a component's output into the context
pub type RenderFn = Arc<dyn Fn(&mut RenderContext<'_>) -> Result<(), RenderError> + Send + Sync>;

#[derive(Clone)]
struct Entry {
    folder: String,
    name: String,
    callback: RenderFn,
}

/// Registry of component folders and their render callbacks
///
/// Folders are searched in registration order, so a folder added first
/// overrides identically named components in folders added later. Callbacks
/// are addressed by the path `<folder>/<name>.<extension>`.
///
/// Build the registry during startup, then share it behind an [`Arc`]; from
/// then on it can no longer be changed.
#[derive(Default)]
pub struct ComponentRegistry {
    config: EngineConfig,
    folders: Vec<String>,
    entries: HashMap<String, Entry>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&String> = self.entries.keys().collect();
        paths.sort();
        f.debug_struct("ComponentRegistry")
            .field("config", &self.config)
            .field("folders", &self.folders)
            .field("components", &paths)
            .finish()
    }
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty registry with the given configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            folders: Vec::new(),
            entries: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Append a folder to the search order; duplicates are kept
    pub fn add_folder(&mut self, folder: impl Into<String>) {
        let folder = folder.into();
        tracing::debug!(folder = %folder, position = self.folders.len(), "adding component folder");
        self.folders.push(folder);
    }

    /// Folders in search order
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    /// Path a component is addressed by
    pub fn path_of(&self, folder: &str, name: &str) -> String {
        let folder = folder.trim_end_matches('/');
        if folder.is_empty() {
            format!("{}.{}", name, self.config.extension)
        } else {
            format!("{}/{}.{}", folder, name, self.config.extension)
        }
    }

    /// Register a render callback for `name` in `folder`
    ///
    /// The folder does not have to be in the search order; components in
    /// unlisted folders are only reachable by pinning. Registering the same
    /// path again replaces the earlier callback.
    pub fn register<F>(&mut self, folder: impl Into<String>, name: impl Into<String>, callback: F)
    where
        F: Fn(&mut RenderContext<'_>) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        let folder = folder.into();
        let name = name.into();
        let path = self.path_of(&folder, &name);
        let entry = Entry {
            folder,
            name,
            callback: Arc::new(callback),
        };
        if self.entries.insert(path.clone(), entry).is_some() {
            tracing::debug!(path = %path, "replaced component");
        } else {
            tracing::debug!(path = %path, "registered component");
        }
    }

    /// Register a component that writes `text` verbatim
    pub fn register_static(
        &mut self,
        folder: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) {
        let text: String = text.into();
        self.register(folder, name, move |ctx| {
            ctx.write(&text);
            Ok(())
        });
    }

    /// Register every file under `dir` carrying the configured extension as
    /// a static component of `folder`
    ///
    /// Component names are the file paths relative to `dir` without the
    /// extension, using `/` as separator. Returns the number of components
    /// registered.
    pub fn scan_dir(&mut self, folder: &str, dir: &Path) -> Result<usize, RenderError> {
        let mut count = 0;
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.config.extension.as_str()) {
                continue;
            }
            let Ok(relative) = path.strip_prefix(dir) else {
                continue;
            };
            let name = relative
                .with_extension("")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let text = std::fs::read_to_string(path)?;
            self.register_static(folder, name, text);
            count += 1;
        }
        tracing::debug!(folder, dir = %dir.display(), count, "scanned component directory");
        Ok(count)
    }

    /// Callback for `name` in exactly `folder`
    pub fn lookup(&self, folder: &str, name: &str) -> Option<&RenderFn> {
        let path = self.path_of(folder, name);
        let found = self.entries.get(&path).map(|entry| &entry.callback);
        tracing::trace!(path = %path, found = found.is_some(), "probing component path");
        found
    }

    /// First callback for `name` in search order, with the folder it came from
    pub fn resolve(&self, name: &str) -> Option<(&str, &RenderFn)> {
        let resolved = self
            .folders
            .iter()
            .find_map(|folder| self.lookup(folder, name).map(|cb| (folder.as_str(), cb)));
        match resolved {
            Some((folder, _)) => tracing::debug!(component = name, folder, "resolved component"),
            None => tracing::debug!(component = name, "component not found in any folder"),
        }
        resolved
    }

    /// Folder that wins resolution for `name`
    pub fn resolve_folder(&self, name: &str) -> Option<&str> {
        self.resolve(name).map(|(folder, _)| folder)
    }

    /// Every registered component name, sorted and deduplicated
    pub fn component_names(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self.entries.values().map(|e| e.name.as_str()).collect();
        names.into_iter().collect()
    }

    /// Folders holding a component called `name`, in search order
    ///
    /// Folders registered with callbacks but absent from the search order are
    /// not listed.
    pub fn folders_defining(&self, name: &str) -> Vec<&str> {
        self.folders
            .iter()
            .filter(|folder| self.lookup(folder, name).is_some())
            .map(String::as_str)
            .collect()
    }

    /// Whether any callback was registered under `folder`
    pub fn has_components_in(&self, folder: &str) -> bool {
        let folder = folder.trim_end_matches('/');
        self.entries
            .values()
            .any(|e| e.folder.trim_end_matches('/') == folder)
    }
}
