//! Component instances: a named render invocation with its own props

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::capture::{self, Frame};
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::prop::{self, PropOptions};
use crate::registry::{ComponentRegistry, RenderFn};
use crate::value::Value;

/// One invocation of a named component
///
/// A component is resolved through its registry on every render, either in
/// its bound folder or by searching the registry's folders in order. Props
/// are only validated when the render callback reads them.
#[derive(Clone)]
pub struct Component {
    registry: Arc<ComponentRegistry>,
    name: String,
    folder: Option<String>,
    props: IndexMap<String, Value>,
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("folder", &self.folder)
            .field("props", &self.props)
            .finish()
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry)
            && self.name == other.name
            && self.folder == other.folder
            && self.props == other.props
    }
}

impl Component {
    /// Create a component resolved through the registry's folder order
    pub fn create(
        registry: &Arc<ComponentRegistry>,
        name: impl Into<String>,
    ) -> Result<Self, RenderError> {
        Self::build(registry, name.into(), None)
    }

    /// Create a component pinned to `folder`
    ///
    /// Pinned components skip the folder order entirely, so an override can
    /// render the component it shadows. The folder need not be registered.
    pub fn create_in(
        registry: &Arc<ComponentRegistry>,
        name: impl Into<String>,
        folder: impl Into<String>,
    ) -> Result<Self, RenderError> {
        Self::build(registry, name.into(), Some(folder.into()))
    }

    fn build(
        registry: &Arc<ComponentRegistry>,
        name: String,
        folder: Option<String>,
    ) -> Result<Self, RenderError> {
        if name.trim().is_empty() {
            return Err(RenderError::InvalidName { name });
        }
        Ok(Self {
            registry: Arc::clone(registry),
            name,
            folder,
            props: IndexMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Folder the component is pinned to, if any
    pub fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Props as assigned, without validation
    pub fn props(&self) -> &IndexMap<String, Value> {
        &self.props
    }

    /// Set one prop, replacing any earlier value
    pub fn assign(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Merge a whole mapping of props, replacing values on key collisions
    pub fn assign_all<I, K, V>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in props {
            self.props.insert(key.into(), value.into());
        }
        self
    }

    /// Read a prop, applying its default, required flag and type check
    pub fn prop(&self, name: &str, options: &PropOptions) -> Result<Value, RenderError> {
        prop::resolve(&self.name, name, self.props.get(name), options)
    }

    /// Render to a string
    ///
    /// Either the complete output, including nested components, or an error;
    /// never partial output. Renders started from inside a render callback
    /// count toward the nesting depth, whether through
    /// [`RenderContext::embed`], [`Component::print`] or a direct call.
    pub fn render(&self) -> Result<String, RenderError> {
        let depth = capture::depth();
        let max_depth = self.registry.config().max_depth;
        if depth > max_depth {
            return Err(RenderError::NestingTooDeep {
                component: self.name.clone(),
                max_depth,
            });
        }

        let callback = self.resolve_callback()?;
        tracing::debug!(component = %self.name, depth, "rendering component");

        let frame = Frame::enter();
        let mut ctx = RenderContext::new(self, depth);
        callback(&mut ctx)?;
        let output = frame.finish();

        tracing::trace!(component = %self.name, bytes = output.len(), "rendered component");
        Ok(output)
    }

    fn resolve_callback(&self) -> Result<&RenderFn, RenderError> {
        let found = match &self.folder {
            Some(folder) => self.registry.lookup(folder, &self.name),
            None => self.registry.resolve(&self.name).map(|(_, callback)| callback),
        };
        found.ok_or_else(|| RenderError::ComponentNotFound {
            component: self.name.clone(),
            folder: self.folder.clone(),
        })
    }

    /// Render and write the result to the current output sink
    ///
    /// Inside a render callback the sink is the enclosing component's output,
    /// so printed text is discarded along with it if that render fails. At top
    /// level the sink is stdout.
    pub fn print(&self) -> Result<(), RenderError> {
        let rendered = self.render()?;
        if capture::is_active() {
            capture::write(&rendered);
            return Ok(());
        }
        let stdout = io::stdout();
        let mut out = stdout.lock();
        out.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Render and write the result to `out`; nothing is written on failure
    pub fn print_to<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        let rendered = self.render()?;
        out.write_all(rendered.as_bytes())?;
        Ok(())
    }
}

impl TryFrom<&Component> for String {
    type Error = RenderError;

    fn try_from(component: &Component) -> Result<Self, Self::Error> {
        component.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    fn registry() -> Arc<ComponentRegistry> {
        let mut registry = ComponentRegistry::new();
        registry.add_folder("default");
        registry.register("default", "greeting", |ctx| {
            let name = ctx.prop("name", &PropOptions::new().required().of_type(Kind::String))?;
            ctx.write("Hello, ");
            ctx.embed_value(&name)?;
            Ok(())
        });
        Arc::new(registry)
    }

    #[test]
    fn test_empty_name_rejected() {
        let registry = registry();
        assert!(matches!(
            Component::create(&registry, ""),
            Err(RenderError::InvalidName { .. })
        ));
        assert!(matches!(
            Component::create_in(&registry, "  ", "default"),
            Err(RenderError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_assign_overwrites() {
        let registry = registry();
        let component = Component::create(&registry, "greeting")
            .unwrap()
            .assign_all([("k", 1)])
            .assign_all([("k", 2)]);
        assert_eq!(
            component.prop("k", &PropOptions::new()).unwrap(),
            Value::from(2)
        );
    }

    #[test]
    fn test_render_and_coerce() {
        let registry = registry();
        let component = Component::create(&registry, "greeting")
            .unwrap()
            .assign("name", "World");
        assert_eq!(component.render().unwrap(), "Hello, World");
        assert_eq!(String::try_from(&component).unwrap(), "Hello, World");
    }

    #[test]
    fn test_print_to_writes_nothing_on_failure() {
        let registry = registry();
        let component = Component::create(&registry, "greeting").unwrap();
        let mut out = Vec::new();
        assert!(component.print_to(&mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_print_to_writes_output() {
        let registry = registry();
        let component = Component::create(&registry, "greeting")
            .unwrap()
            .assign("name", "there");
        let mut out = Vec::new();
        component.print_to(&mut out).unwrap();
        assert_eq!(out, b"Hello, there");
    }

    #[test]
    fn test_debug_omits_registry() {
        let registry = registry();
        let component = Component::create_in(&registry, "greeting", "default").unwrap();
        let debug = format!("{:?}", component);
        assert!(debug.contains("greeting"));
        assert!(!debug.contains("ComponentRegistry"));
    }
}
