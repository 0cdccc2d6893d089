use serde_json::Value;

use crate::coords::{contain, CornerRadii, Rect, Vec2};
use crate::scene::style::SHAPE_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{invalid, items, num, number, numbers, point, pt, Shape};

/// Rounded rectangle payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RoundedRectangle {
    pub origin: Vec2,
    pub width: f64,
    pub height: f64,
    pub radii: CornerRadii,
}

impl RoundedRectangle {
    #[inline]
    pub const fn new(origin: Vec2, width: f64, height: f64, radii: CornerRadii) -> Self {
        Self { origin, width, height, radii }
    }

    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::from_origin_size(self.origin, Vec2::new(self.width, self.height))
    }
}

/// `(width, height, radius)` at the local origin with uniform corners.
impl From<(f64, f64, f64)> for RoundedRectangle {
    #[inline]
    fn from((width, height, radius): (f64, f64, f64)) -> Self {
        Self::new(Vec2::zero(), width, height, CornerRadii::all(radius))
    }
}

fn radii(v: &Value) -> Option<CornerRadii> {
    match number(v) {
        Some(r) => Some(CornerRadii::all(r)),
        None => numbers::<4>(items(v)?).map(CornerRadii::from),
    }
}

impl Shape for RoundedRectangle {
    const KIND: Kind = Kind::RoundedRect;
    const EXPECTED: &'static str = "[[x, y], width, height, [tl, tr, br, bl]] or [width, height, radius]";

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        match items(raw) {
            Some(fields @ [_, _, _]) => numbers::<3>(fields)
                .map(|[w, h, r]| Self::from((w, h, r)))
                .ok_or_else(|| invalid::<Self>(raw, "width, height and radius must be numbers")),
            Some([origin, w, h, r]) => match (point(origin), number(w), number(h), radii(r)) {
                (Some(o), Some(w), Some(h), Some(r)) => Ok(Self::new(o, w, h, r)),
                _ => Err(invalid::<Self>(raw, "origin must be a point, size numbers, radii a number or four numbers")),
            },
            _ => Err(invalid::<Self>(raw, "needs three or four fields")),
        }
    }

    fn to_value(&self) -> Value {
        let radii = self.radii.as_array().map(num).to_vec();
        Value::Array(vec![pt(self.origin), num(self.width), num(self.height), Value::Array(radii)])
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if !self.bounds().is_finite() || !self.radii.is_finite() {
            return Err(self.reject("fields must be finite"));
        }
        if self.radii.as_array().iter().any(|r| *r < 0.0) {
            return Err(self.reject("corner radii must be non-negative"));
        }
        Ok(())
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(SHAPE_STYLES)
    }

    fn contains_point(&self, p: Vec2) -> bool {
        contain::rounded_rect(self.bounds(), self.radii, p)
    }
}
