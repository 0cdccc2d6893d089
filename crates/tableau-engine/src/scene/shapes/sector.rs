use serde_json::Value;

use crate::coords::{contain, Vec2};
use crate::scene::style::SHAPE_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{all_finite, invalid, items, num, numbers, Shape};

/// Pie slice around the local origin from `start` to `finish` (radians).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sector {
    pub radius: f64,
    pub start: f64,
    pub finish: f64,
}

impl Sector {
    #[inline]
    pub const fn new(radius: f64, start: f64, finish: f64) -> Self {
        Self { radius, start, finish }
    }
}

impl From<(f64, f64, f64)> for Sector {
    #[inline]
    fn from((radius, start, finish): (f64, f64, f64)) -> Self {
        Self::new(radius, start, finish)
    }
}

impl Shape for Sector {
    const KIND: Kind = Kind::Sector;
    const EXPECTED: &'static str = "[radius, start, finish]";

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        let fields = items(raw).ok_or_else(|| invalid::<Self>(raw, "not a list"))?;
        let [radius, start, finish] =
            numbers::<3>(fields).ok_or_else(|| invalid::<Self>(raw, "needs exactly three numbers"))?;
        Ok(Self::new(radius, start, finish))
    }

    fn to_value(&self) -> Value {
        Value::Array(vec![num(self.radius), num(self.start), num(self.finish)])
    }

    fn validate(&self) -> Result<(), InvalidData> {
        if all_finite(&[self.radius, self.start, self.finish]) {
            Ok(())
        } else {
            Err(self.reject("fields must be finite"))
        }
    }

    fn valid_styles() -> StyleSet {
        StyleSet::Only(SHAPE_STYLES)
    }

    fn contains_point(&self, p: Vec2) -> bool {
        contain::sector(self.radius, self.start, self.finish, p)
    }
}
