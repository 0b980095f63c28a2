//! Engine configuration and site manifests
//!
//! A manifest is a TOML file describing the folders to register (in override
//! order), the root component and its top-level props:
//!
//! ```toml
//! root = "layouts/page"
//! folders = ["components/custom", "components/default"]
//! layouts = "builtin"
//!
//! [engine]
//! extension = "html"
//!
//! [props]
//! lang = "en"
//! title = "Lorem Ipsum"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::error::RenderError;
use crate::layouts;
use crate::registry::ComponentRegistry;
use crate::value::Value;

/// Errors that can occur when loading a manifest
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read manifest file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse manifest TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the component registry and renderer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extension joined to `<folder>/<name>` to form a component path
    pub extension: String,

    /// Deepest allowed chain of nested renders
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extension: "tpl".to_string(),
            max_depth: 64,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the component file extension (leading dots are ignored)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// One folder entry in a manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FolderEntry {
    /// Identifier and directory are the same string
    Path(String),
    /// Identifier used for pinning, scanned from a separate directory
    Named { name: String, path: PathBuf },
}

impl FolderEntry {
    pub fn name(&self) -> &str {
        match self {
            FolderEntry::Path(path) => path,
            FolderEntry::Named { name, .. } => name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FolderEntry::Path(path) => Path::new(path),
            FolderEntry::Named { path, .. } => path,
        }
    }
}

/// A site manifest: folders, root component and top-level props
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
    pub root: Option<String>,
    pub root_folder: Option<String>,
    /// Folder the built-in page layouts are registered in, searched last
    pub layouts: Option<String>,
    #[serde(default)]
    pub props: toml::Table,
    /// Directory relative folder paths resolve against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Manifest {
    /// Load a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::from_str(&content)?;
        manifest.base_dir = path.parent().map(Path::to_path_buf);
        Ok(manifest)
    }

    /// Load a manifest from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Directory a folder entry is scanned from
    pub fn folder_dir(&self, entry: &FolderEntry) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(entry.path()),
            None => entry.path().to_path_buf(),
        }
    }

    /// Top-level props in manifest order
    pub fn props(&self) -> IndexMap<String, Value> {
        self.props
            .iter()
            .map(|(key, value)| (key.clone(), Value::from(value.clone())))
            .collect()
    }

    /// Register every folder in order and scan the ones that exist on disk,
    /// then add the built-in layout folder if the manifest names one
    pub fn build_registry(&self) -> Result<ComponentRegistry, RenderError> {
        let mut registry = ComponentRegistry::with_config(self.engine.clone());
        for entry in &self.folders {
            registry.add_folder(entry.name());
            let dir = self.folder_dir(entry);
            if dir.is_dir() {
                registry.scan_dir(entry.name(), &dir)?;
            } else {
                tracing::warn!(folder = entry.name(), dir = %dir.display(), "folder directory does not exist");
            }
        }
        if let Some(folder) = &self.layouts {
            registry.add_folder(folder.clone());
            layouts::register(&mut registry, folder);
        }
        Ok(registry)
    }
}
