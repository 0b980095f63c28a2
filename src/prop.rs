//! Prop options and validation

use crate::error::RenderError;
use crate::value::{KindSet, Value};

/// How a render callback wants a prop read
#[derive(Debug, Clone, Default)]
pub struct PropOptions {
    /// Fail when neither a value nor a default is present
    pub required: bool,
    /// Substituted when the prop was never assigned
    pub default: Option<Value>,
    /// Accepted kinds; `None` or an empty set accepts anything
    pub kinds: Option<KindSet>,
}

impl PropOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the prop as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the value used when the prop was never assigned
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Restrict the prop to one kind or a set of kinds
    pub fn of_type(mut self, kinds: impl Into<KindSet>) -> Self {
        self.kinds = Some(kinds.into());
        self
    }
}

/// Resolve a prop against its options
///
/// Order: assigned value, then default, then null. A required prop only fails
/// when that yields null; type checks only run on non-null values.
pub(crate) fn resolve(
    component: &str,
    prop: &str,
    assigned: Option<&Value>,
    options: &PropOptions,
) -> Result<Value, RenderError> {
    let value = match assigned {
        Some(value) if !value.is_null() => value.clone(),
        _ => options.default.clone().unwrap_or_default(),
    };

    if value.is_null() {
        if options.required {
            return Err(RenderError::MissingRequiredProp {
                prop: prop.to_string(),
                component: component.to_string(),
            });
        }
        return Ok(value);
    }

    if let Some(kinds) = &options.kinds {
        let actual = value.kind();
        if !kinds.accepts(actual) {
            return Err(RenderError::TypeMismatch {
                prop: prop.to_string(),
                component: component.to_string(),
                expected: kinds.clone(),
                actual,
            });
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    #[test]
    fn test_absent_optional_prop_is_null() {
        let options = PropOptions::new().of_type(Kind::String);
        let value = resolve("card", "title", None, &options).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_default_is_used_when_unassigned() {
        let options = PropOptions::new().with_default("fallback");
        let value = resolve("card", "title", None, &options).unwrap();
        assert_eq!(value, Value::from("fallback"));
    }

    #[test]
    fn test_assigned_null_falls_back_to_default() {
        let options = PropOptions::new().with_default(7);
        let value = resolve("card", "count", Some(&Value::Null), &options).unwrap();
        assert_eq!(value, Value::from(7));
    }

    #[test]
    fn test_required_satisfied_by_default() {
        let options = PropOptions::new().required().with_default("x");
        assert!(resolve("card", "title", None, &options).is_ok());
    }

    #[test]
    fn test_required_missing() {
        let options = PropOptions::new().required();
        let err = resolve("card", "title", None, &options).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingRequiredProp { ref prop, ref component }
                if prop == "title" && component == "card"
        ));
    }

    #[test]
    fn test_empty_type_set_accepts_any_value() {
        let options = PropOptions::new().of_type(Vec::<Kind>::new());
        let value = resolve("card", "v", Some(&Value::from(true)), &options).unwrap();
        assert_eq!(value, Value::from(true));
    }

    #[test]
    fn test_default_is_type_checked() {
        let options = PropOptions::new().with_default(true).of_type(Kind::String);
        let err = resolve("card", "title", None, &options).unwrap_err();
        assert!(matches!(err, RenderError::TypeMismatch { actual: Kind::Bool, .. }));
    }
}
