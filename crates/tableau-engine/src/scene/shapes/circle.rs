use serde_json::Value;

use crate::coords::{contain, Vec2};
use crate::scene::style::SHAPE_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{invalid, items, num, number, point, pt, Shape};

/// Circle payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub const fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// A bare radius is a circle at the local origin.
impl From<f64> for Circle {
    #[inline]
    fn from(radius: f64) -> Self {
        Self::new(Vec2::zero(), radius)
    }
}

impl From<(Vec2, f64)> for Circle {
    #[inline]
    fn from((center, radius): (Vec2, f64)) -> Self {
        Self::new(center, radius)
    }
}

impl Shape for Circle {
    const KIND: Kind = Kind::Circle;
    const EXPECTED: &'static str = "[[cx, cy], radius] or radius";

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        if let Some(radius) = number(raw) {
            return Ok(radius.into());
        }
        match items(raw) {
            Some([center, radius]) => match (point(center), number(radius)) {
                (Some(center), Some(radius)) => Ok(Self::new(center, radius)),
                _ => Err(invalid::<Self>(raw, "center must be a point and radius a number")),
            },
            _ => Err(invalid::<Self>(raw, "not a radius or a [center, radius] pair")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Array(vec![pt(self.center), num(self.radius)])
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if self.center.is_finite() && self.radius.is_finite() {
            Ok(())
        } else {
            Err(self.reject("fields must be finite"))
        }
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(SHAPE_STYLES)
    }

    fn contains_point(&self, p: Vec2) -> bool {
        contain::circle(self.center, self.radius, p)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_radius_normalizes_to_origin_center() {
        assert_eq!(Circle::normalize(&json!(5)).unwrap(), json!([[0.0, 0.0], 5.0]));
        let canonical = json!([[1.0, 2.0], 5.0]);
        assert_eq!(Circle::normalize(&canonical).unwrap(), canonical);
    }

    #[test]
    fn rejects_malformed() {
        assert!(Circle::verify(&json!("5")).is_err());
        assert!(Circle::verify(&json!([[0, 0]])).is_err());
        assert!(Circle::verify(&json!([[0], 5])).is_err());
    }
}
