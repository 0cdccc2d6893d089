use serde_json::Value;

use crate::scene::style::SCENE_REF_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{invalid, Shape};

/// Leaf pointing at another, externally resolved graph by name.
///
/// The referenced graph's primitives are never embedded in this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRef {
    pub name: String,
}

impl SceneRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for SceneRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SceneRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl Shape for SceneRef {
    const KIND: Kind = Kind::SceneRef;
    const EXPECTED: &'static str = r#""scene name""#;

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        raw.as_str()
            .map(SceneRef::new)
            .ok_or_else(|| invalid::<Self>(raw, "not a string"))
    }

    fn to_value(&self) -> Value {
        Value::String(self.name.clone())
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if self.name.trim().is_empty() {
            Err(self.reject("name must not be blank"))
        } else {
            Ok(())
        }
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(SCENE_REF_STYLES)
    }
}
