//! Error types for component lookup, prop validation and rendering

use thiserror::Error;

use crate::config::ConfigError;
use crate::value::{Kind, KindSet};

/// Errors that abort the rendering of a component tree
#[derive(Debug, Error)]
pub enum RenderError {
    /// A required prop had neither an assigned value nor a default
    #[error("the prop \"{prop}\" is required for rendering the component \"{component}\"")]
    MissingRequiredProp { prop: String, component: String },

    /// A prop value has a kind outside the accepted set
    #[error(
        "the prop \"{prop}\" of the component \"{component}\" must be of type \"{expected}\", found \"{actual}\""
    )]
    TypeMismatch {
        prop: String,
        component: String,
        expected: KindSet,
        actual: Kind,
    },

    /// No render callback for the component in the bound folder or any registered folder
    #[error("unable to render component \"{component}\"{}", folder_suffix(.folder))]
    ComponentNotFound {
        component: String,
        folder: Option<String>,
    },

    /// Component names must not be empty
    #[error("invalid component name \"{name}\"")]
    InvalidName { name: String },

    /// Nested renders went deeper than the configured limit
    #[error("component \"{component}\" exceeds the maximum nesting depth of {max_depth}")]
    NestingTooDeep { component: String, max_depth: usize },

    /// A render callback reported its own failure
    #[error("component \"{component}\" failed: {message}")]
    Callback { component: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn folder_suffix(folder: &Option<String>) -> String {
    match folder {
        Some(folder) => format!(" from folder \"{}\"", folder),
        None => String::new(),
    }
}

impl RenderError {
    /// Name of the component the error was raised for, if any
    pub fn component(&self) -> Option<&str> {
        match self {
            RenderError::MissingRequiredProp { component, .. }
            | RenderError::TypeMismatch { component, .. }
            | RenderError::ComponentNotFound { component, .. }
            | RenderError::NestingTooDeep { component, .. }
            | RenderError::Callback { component, .. } => Some(component),
            RenderError::InvalidName { .. } | RenderError::Io(_) | RenderError::Config(_) => None,
        }
    }
}
