use serde_json::Value;

use crate::coords::{contain, Vec2};
use crate::scene::style::SHAPE_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{invalid, points, pt, Shape};

/// Four-sided polygon payload, points in drawing order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub points: [Vec2; 4],
}

impl Quad {
    #[inline]
    pub const fn new(points: [Vec2; 4]) -> Self {
        Self { points }
    }
}

impl From<[Vec2; 4]> for Quad {
    #[inline]
    fn from(points: [Vec2; 4]) -> Self {
        Self::new(points)
    }
}

impl From<[(f64, f64); 4]> for Quad {
    #[inline]
    fn from(points: [(f64, f64); 4]) -> Self {
        Self::new(points.map(Vec2::from))
    }
}

impl Shape for Quad {
    const KIND: Kind = Kind::Quad;
    const EXPECTED: &'static str = "[[x0, y0], [x1, y1], [x2, y2], [x3, y3]]";

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        points::<4>(raw)
            .map(Self::new)
            .ok_or_else(|| invalid::<Self>(raw, "needs exactly four points"))
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
        contain::polygon(&self.points, p)
    }
}
