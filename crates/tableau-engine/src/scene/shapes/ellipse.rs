use serde_json::Value;

use crate::coords::{contain, Vec2};
use crate::scene::style::SHAPE_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{all_finite, invalid, items, num, number, numbers, point, pt, Shape};

/// Axis-aligned ellipse payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub rx: f64,
    pub ry: f64,
}

impl Ellipse {
    #[inline]
    pub const fn new(center: Vec2, rx: f64, ry: f64) -> Self {
        Self { center, rx, ry }
    }
}

impl From<(f64, f64)> for Ellipse {
    #[inline]
    fn from((rx, ry): (f64, f64)) -> Self {
        Self::new(Vec2::zero(), rx, ry)
    }
}

impl Shape for Ellipse {
    const KIND: Kind = Kind::Ellipse;
    const EXPECTED: &'static str = "[[cx, cy], rx, ry] or [rx, ry]";

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        match items(raw) {
            Some(fields @ [_, _]) => numbers::<2>(fields)
                .map(|[rx, ry]| Self::from((rx, ry)))
                .ok_or_else(|| invalid::<Self>(raw, "radii must be numbers")),
            Some([center, rx, ry]) => match (point(center), number(rx), number(ry)) {
                (Some(c), Some(rx), Some(ry)) => Ok(Self::new(c, rx, ry)),
                _ => Err(invalid::<Self>(raw, "center must be a point and radii numbers")),
            },
            _ => Err(invalid::<Self>(raw, "needs two or three fields")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Array(vec![pt(self.center), num(self.rx), num(self.ry)])
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if self.center.is_finite() && all_finite(&[self.rx, self.ry]) {
            Ok(())
        } else {
            Err(self.reject("fields must be finite"))
        }
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(SHAPE_STYLES)
    }

    fn contains_point(&self, p: Vec2) -> bool {
        contain::ellipse(self.center, self.rx, self.ry, p)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn shorthand_radii() {
        let e = Ellipse::from_value(&json!([20, 10])).unwrap();
        assert_eq!(e, Ellipse::new(Vec2::zero(), 20.0, 10.0));
        assert!(e.contains_point(Vec2::new(15.0, 0.0)));
        assert!(!e.contains_point(Vec2::new(0.0, 15.0)));
    }
}
