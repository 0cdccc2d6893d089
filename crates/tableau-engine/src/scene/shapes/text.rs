use serde_json::Value;

use crate::coords::Vec2;
use crate::scene::style::TEXT_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{invalid, items, point, pt, Shape};

/// Text payload. `origin` is the text anchor (see the `text_align` and
/// `text_base` styles).
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub origin: Vec2,
    pub text: String,
}

impl Text {
    pub fn new(origin: Vec2, text: impl Into<String>) -> Self {
        Self { origin, text: text.into() }
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::new(Vec2::zero(), text)
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self::new(Vec2::zero(), text)
    }
}

impl<S: Into<String>> From<(Vec2, S)> for Text {
    fn from((origin, text): (Vec2, S)) -> Self {
        Self::new(origin, text)
    }
}

impl Shape for Text {
    const KIND: Kind = Kind::Text;
    const EXPECTED: &'static str = r#"[[x, y], "text"] or "text""#;

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        if let Some(s) = raw.as_str() {
            return Ok(s.into());
        }
        match items(raw) {
            Some([origin, text]) => match (point(origin), text.as_str()) {
                (Some(o), Some(t)) => Ok(Self::new(o, t)),
                _ => Err(invalid::<Self>(raw, "origin must be a point and text a string")),
            },
            _ => Err(invalid::<Self>(raw, "not a string or an [origin, string] pair")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Array(vec![pt(self.origin), Value::String(self.text.clone())])
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if self.origin.is_finite() {
            Ok(())
        } else {
            Err(self.reject("origin must be finite"))
        }
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(TEXT_STYLES)
    }
}
