use serde_json::Value;

use crate::coords::{contain, Rect, Vec2};
use crate::scene::style::SHAPE_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{invalid, items, num, number, numbers, point, pt, Shape};

/// Rectangle payload: top-left origin plus size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub origin: Vec2,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    #[inline]
    pub const fn new(origin: Vec2, width: f64, height: f64) -> Self {
        Self { origin, width, height }
    }

    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::from_origin_size(self.origin, Vec2::new(self.width, self.height))
    }
}

/// `(width, height)` at the local origin.
impl From<(f64, f64)> for Rectangle {
    #[inline]
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(Vec2::zero(), width, height)
    }
}

impl From<Rect> for Rectangle {
    #[inline]
    fn from(r: Rect) -> Self {
        Self::new(r.origin, r.size.x, r.size.y)
    }
}

impl Shape for Rectangle {
    const KIND: Kind = Kind::Rect;
    const EXPECTED: &'static str = "[[x, y], width, height] or [width, height]";

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        match items(raw) {
            Some(fields @ [_, _]) => numbers::<2>(fields)
                .map(|[w, h]| Self::from((w, h)))
                .ok_or_else(|| invalid::<Self>(raw, "width and height must be numbers")),
            Some([origin, w, h]) => match (point(origin), number(w), number(h)) {
                (Some(o), Some(w), Some(h)) => Ok(Self::new(o, w, h)),
                _ => Err(invalid::<Self>(raw, "origin must be a point and size numbers")),
            },
            _ => Err(invalid::<Self>(raw, "needs two or three fields")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Array(vec![pt(self.origin), num(self.width), num(self.height)])
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if self.bounds().is_finite() {
            Ok(())
        } else {
            Err(self.reject("fields must be finite"))
        }
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(SHAPE_STYLES)
    }

    fn contains_point(&self, p: Vec2) -> bool {
        contain::rect(self.bounds(), p)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn size_shorthand_expands_to_origin() {
        assert_eq!(Rectangle::normalize(&json!([100, 200])).unwrap(), json!([[0.0, 0.0], 100.0, 200.0]));
    }

    #[test]
    fn contains_uses_bounds() {
        let r = Rectangle::from((100.0, 200.0));
        assert!(r.contains_point(Vec2::new(50.0, 150.0)));
        assert!(!r.contains_point(Vec2::new(150.0, 50.0)));
    }

    #[test]
    fn rejects_strings() {
        assert!(Rectangle::verify(&json!(["100", 200])).is_err());
    }
}
