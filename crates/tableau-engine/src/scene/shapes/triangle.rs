use serde_json::Value;

use crate::coords::{contain, Vec2};
use crate::scene::style::SHAPE_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{invalid, points, pt, Shape};

/// Triangle payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub points: [Vec2; 3],
}

impl Triangle {
    #[inline]
    pub const fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { points: [a, b, c] }
    }
}

impl From<[Vec2; 3]> for Triangle {
    #[inline]
    fn from(points: [Vec2; 3]) -> Self {
        Self { points }
    }
}

impl From<[(f64, f64); 3]> for Triangle {
    #[inline]
    fn from(points: [(f64, f64); 3]) -> Self {
        Self { points: points.map(Vec2::from) }
    }
}

impl Shape for Triangle {
    const KIND: Kind = Kind::Triangle;
    const EXPECTED: &'static str = "[[x0, y0], [x1, y1], [x2, y2]]";

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        points::<3>(raw)
            .map(|points| Self { points })
            .ok_or_else(|| invalid::<Self>(raw, "needs exactly three points"))
    }

    fn to_value(&self) -> Value {
        Value::Array(self.points.iter().copied().map(pt).collect())
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if self.points.iter().all(|p| p.is_finite()) {
            Ok(())
        } else {
            Err(self.reject("points must be finite"))
        }
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(SHAPE_STYLES)
    }

    fn contains_point(&self, p: Vec2) -> bool {
        let [a, b, c] = self.points;
        contain::triangle(a, b, c, p)
    }
}
