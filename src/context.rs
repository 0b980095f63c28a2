//! The view a render callback has of the component being rendered

use std::fmt;

use crate::capture;
use crate::component::Component;
use crate::error::RenderError;
use crate::prop::PropOptions;
use crate::value::Value;

/// Output buffer and prop source handed to a render callback
///
/// Everything written here, including the output of embedded or printed
/// child components, becomes the rendered text of the component. The capture
/// is dropped when the callback fails, so a failed render never yields
/// partial output.
pub struct RenderContext<'a> {
    component: &'a Component,
    depth: usize,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(component: &'a Component, depth: usize) -> Self {
        Self { component, depth }
    }

    /// Component being rendered
    pub fn component(&self) -> &'a Component {
        self.component
    }

    pub fn name(&self) -> &'a str {
        self.component.name()
    }

    /// Nesting depth; the component `render` was called on is at depth 0
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Read and validate a prop of the component being rendered
    pub fn prop(&self, name: &str, options: &PropOptions) -> Result<Value, RenderError> {
        self.component.prop(name, options)
    }

    /// Append text to the output
    pub fn write(&mut self, text: impl AsRef<str>) {
        capture::write(text.as_ref());
    }

    /// Create a child component resolved through the same registry
    pub fn create(&self, name: impl Into<String>) -> Result<Component, RenderError> {
        Component::create(self.component.registry(), name)
    }

    /// Create a child component pinned to `folder`
    pub fn create_in(
        &self,
        name: impl Into<String>,
        folder: impl Into<String>,
    ) -> Result<Component, RenderError> {
        Component::create_in(self.component.registry(), name, folder)
    }

    /// Render `child` one level deeper and append its output
    pub fn embed(&mut self, child: &Component) -> Result<(), RenderError> {
        let rendered = child.render()?;
        capture::write(&rendered);
        Ok(())
    }

    /// Append a prop value: components are embedded, scalars written as
    /// text, null skipped, arrays and objects written item by item
    pub fn embed_value(&mut self, value: &Value) -> Result<(), RenderError> {
        match value {
            Value::Component(child) => self.embed(child),
            Value::Array(items) => items.iter().try_for_each(|item| self.embed_value(item)),
            Value::Object(map) => map.values().try_for_each(|item| self.embed_value(item)),
            scalar => {
                if let Some(text) = scalar.as_text() {
                    capture::write(&text);
                }
                Ok(())
            }
        }
    }

    /// Error for a failure detected by the callback itself
    pub fn fail(&self, message: impl Into<String>) -> RenderError {
        RenderError::Callback {
            component: self.component.name().to_string(),
            message: message.into(),
        }
    }

    /// Text written so far
    pub fn output(&self) -> String {
        capture::current()
    }
}

impl fmt::Write for RenderContext<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        capture::write(s);
        Ok(())
    }
}
