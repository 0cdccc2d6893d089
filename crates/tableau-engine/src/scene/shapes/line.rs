use serde_json::Value;

use crate::coords::{contain, Vec2};
use crate::scene::style::LINE_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{invalid, points, pt, Shape};

/// Line segment payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
}

impl Line {
    /// Distance within which a point counts as on the line when no explicit
    /// tolerance is given.
    pub const HIT_TOLERANCE: f64 = 1.0;

    #[inline]
    pub const fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    #[inline]
    pub fn contains_point_within(&self, p: Vec2, tolerance: f64) -> bool {
        contain::segment(self.from, self.to, tolerance, p)
    }
}

impl From<(Vec2, Vec2)> for Line {
    #[inline]
    fn from((from, to): (Vec2, Vec2)) -> Self {
        Self::new(from, to)
    }
}

impl From<((f64, f64), (f64, f64))> for Line {
    #[inline]
    fn from((from, to): ((f64, f64), (f64, f64))) -> Self {
        Self::new(from.into(), to.into())
    }
}

impl Shape for Line {
    const KIND: Kind = Kind::Line;
    const EXPECTED: &'static str = "[[x0, y0], [x1, y1]]";

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        points::<2>(raw)
            .map(|[from, to]| Self::new(from, to))
            .ok_or_else(|| invalid::<Self>(raw, "needs exactly two points"))
    }

    fn to_value(&self) -> Value {
        Value::Array(vec![pt(self.from), pt(self.to)])
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if self.from.is_finite() && self.to.is_finite() {
            Ok(())
        } else {
            Err(self.reject("points must be finite"))
        }
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(LINE_STYLES)
    }

    fn contains_point(&self, p: Vec2) -> bool {
        self.contains_point_within(p, Self::HIT_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn tuple_shorthand() {
        let l = Line::from(((0.0, 0.0), (10.0, 10.0)));
        assert_eq!(l.to_value(), json!([[0.0, 0.0], [10.0, 10.0]]));
        assert!(l.contains_point(Vec2::new(5.0, 5.5)));
        assert!(!l.contains_point(Vec2::new(5.0, 8.0)));
    }

    #[test]
    fn rejects_three_points() {
        assert!(Line::verify(&json!([[0, 0], [1, 1], [2, 2]])).is_err());
    }
}
