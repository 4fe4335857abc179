use crate::output::RenderNode;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Declared prop type for a section component field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    String,
    Number,
    Boolean,
    /// Any JSON value, passed through untouched.
    Json,
}

impl PropKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            PropKind::String => value.is_string(),
            PropKind::Number => value.is_number(),
            PropKind::Boolean => value.is_boolean(),
            PropKind::Json => true,
        }
    }
}

/// One declared field of a section component's prop schema.
#[derive(Debug, Clone)]
pub struct PropField {
    pub name: &'static str,
    pub kind: PropKind,
    pub default: Value,
}

impl PropField {
    pub fn new(name: &'static str, kind: PropKind, default: Value) -> Self {
        Self {
            name,
            kind,
            default,
        }
    }
}

/// Capability implemented by every registered section component.
///
/// `props` are already normalized against [`SectionComponent::fields`] when
/// `render` is called. Returning `None` means the component chose to render
/// nothing for these props.
pub trait SectionComponent: Send + Sync {
    fn render(&self, props: &Value) -> Option<RenderNode>;

    /// Declared prop schema; drives normalization and any property-editing
    /// UI. Empty by default, which passes props through as `{}`.
    fn fields(&self) -> &[PropField] {
        &[]
    }
}

/// Map from `componentKey` to a section renderer, injected into [`crate::render`]
/// at call time.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Box<dyn SectionComponent>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        key: impl Into<String>,
        component: Box<dyn SectionComponent>,
    ) -> &mut Self {
        self.components.insert(key.into(), component);
        self
    }

    pub fn resolve(&self, key: &str) -> Option<&dyn SectionComponent> {
        self.components.get(key).map(Box::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Normalize raw tree-level props against a declared field schema.
///
/// Every declared field is present in the result: the raw value if its type
/// matches the declaration, the declared default otherwise. Undeclared props
/// are dropped.
pub fn normalize_props(fields: &[PropField], raw: &Value) -> Value {
    let mut normalized = Map::with_capacity(fields.len());
    let raw_object = raw.as_object();

    for field in fields {
        let value = raw_object
            .and_then(|object| object.get(field.name))
            .filter(|value| field.kind.matches(value))
            .cloned()
            .unwrap_or_else(|| field.default.clone());
        normalized.insert(field.name.to_string(), value);
    }

    Value::Object(normalized)
}
