//! Primitive types.
//!
//! Every type is a plain struct implementing [`Shape`]. Adding a type:
//! - add a module here with the struct and its `Shape` impl
//! - add a variant to [`Kind`] and [`Data`]
//! - list it in the dispatch macros in `kind.rs` and `data.rs`

pub(crate) mod arc;
pub(crate) mod circle;
pub(crate) mod ellipse;
pub(crate) mod group;
pub(crate) mod line;
pub(crate) mod path;
pub(crate) mod quad;
pub(crate) mod rect;
pub(crate) mod rounded_rect;
pub(crate) mod scene_ref;
pub(crate) mod sector;
pub(crate) mod text;
pub(crate) mod triangle;

use serde_json::Value;

use crate::coords::Vec2;

use super::{Data, InvalidData, Kind, StyleSet, Styles};

/// Capability contract shared by all primitive types.
///
/// Two entry forms reach the same checks:
/// - untyped data (`serde_json::Value`, e.g. from a document or the wire)
///   goes through [`verify`](Shape::verify) / [`normalize`](Shape::normalize)
/// - typed values built in Rust go through [`validate`](Shape::validate)
pub trait Shape: Clone + Into<Data> {
    const KIND: Kind;
    /// Human-readable canonical form, used in error messages.
    const EXPECTED: &'static str;

    /// Structural parse of any accepted form (canonical or shorthand).
    /// Value constraints are checked separately by `validate`.
    fn parse(raw: &Value) -> Result<Self, InvalidData>;

    /// Canonical untyped form.
    fn to_value(&self) -> Value;

    /// Value constraints (finite numbers, well-formed references, ...).
    fn validate(&self) -> Result<(), InvalidData>;

    fn valid_styles() -> StyleSet;

    /// Point-in-shape test in local coordinates.
    ///
    /// Types without geometry of their own (groups, references, text)
    /// are never hit directly.
    fn contains_point(&self, _p: Vec2) -> bool {
        false
    }

    /// Parses and validates untyped data.
    fn from_value(raw: &Value) -> Result<Self, InvalidData> {
        let shape = Self::parse(raw)?;
        shape.validate()?;
        Ok(shape)
    }

    /// Non-panicking verification.
    fn verify(raw: &Value) -> Result<(), InvalidData> {
        Self::from_value(raw).map(|_| ())
    }

    /// Canonical form of accepted data. Normalizing canonical data returns it
    /// unchanged, including how each number is spelled (`10` stays `10`,
    /// `10.0` stays `10.0`).
    fn normalize(raw: &Value) -> Result<Value, InvalidData> {
        let canonical = Self::from_value(raw)?.to_value();
        if equivalent(&canonical, raw) { Ok(raw.clone()) } else { Ok(canonical) }
    }

    /// Verification that stops the caller on bad data.
    ///
    /// # Panics
    /// Panics with a message embedding the offending value and the
    /// expected shape when `raw` is not valid for this type.
    fn expect_valid(raw: &Value) -> Self {
        match Self::from_value(raw) {
            Ok(shape) => shape,
            Err(e) => panic!("{e}"),
        }
    }

    /// Projects `styles` onto [`valid_styles`](Shape::valid_styles).
    fn filter_styles(styles: &Styles) -> Styles {
        styles.project(Self::valid_styles())
    }

    /// Error for this type describing `self`.
    fn reject(&self, reason: &str) -> InvalidData {
        invalid::<Self>(&self.to_value(), reason)
    }
}

pub(crate) fn invalid<S: Shape>(raw: &Value, reason: impl Into<String>) -> InvalidData {
    InvalidData {
        kind: S::KIND,
        expected: S::EXPECTED,
        value: raw.to_string(),
        reason: reason.into(),
    }
}

// ── untyped helpers ───────────────────────────────────────────────────────

#[inline]
pub(crate) fn items(v: &Value) -> Option<&[Value]> {
    v.as_array().map(Vec::as_slice)
}

#[inline]
pub(crate) fn number(v: &Value) -> Option<f64> {
    v.as_f64()
}

pub(crate) fn numbers<const N: usize>(vs: &[Value]) -> Option<[f64; N]> {
    if vs.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, v) in out.iter_mut().zip(vs) {
        *slot = number(v)?;
    }
    Some(out)
}

pub(crate) fn point(v: &Value) -> Option<Vec2> {
    numbers::<2>(items(v)?).map(Vec2::from)
}

pub(crate) fn points<const N: usize>(v: &Value) -> Option<[Vec2; N]> {
    let vs = items(v)?;
    if vs.len() != N {
        return None;
    }
    let mut out = [Vec2::zero(); N];
    for (slot, v) in out.iter_mut().zip(vs) {
        *slot = point(v)?;
    }
    Some(out)
}

#[inline]
pub(crate) fn num(n: f64) -> Value {
    Value::from(n)
}

/// Same structure, strings and numeric values; integer and float spellings
/// of one number compare equal.
pub(crate) fn equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| equivalent(x, y))
        }
        _ => a == b,
    }
}

#[inline]
pub(crate) fn pt(p: Vec2) -> Value {
    Value::Array(vec![num(p.x), num(p.y)])
}

#[inline]
pub(crate) fn all_finite(ns: &[f64]) -> bool {
    ns.iter().all(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numbers_requires_exact_arity() {
        assert_eq!(numbers::<2>(&[json!(1), json!(2.5)]), Some([1.0, 2.5]));
        assert_eq!(numbers::<2>(&[json!(1)]), None);
        assert_eq!(numbers::<2>(&[json!(1), json!("2")]), None);
    }

    #[test]
    fn equivalence_ignores_number_spelling() {
        assert!(equivalent(&json!([10, [0, 1.5]]), &json!([10.0, [0.0, 1.5]])));
        assert!(!equivalent(&json!([10, 1]), &json!([10, 1, 2])));
        assert!(!equivalent(&json!(["a", 1]), &json!(["b", 1])));
        assert!(!equivalent(&json!([1]), &json!(1)));
    }

    #[test]
    fn point_forms() {
        assert_eq!(point(&json!([3, 4])), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(point(&json!({"x": 3, "y": 4})), None);
        assert_eq!(points::<2>(&json!([[0, 0], [1, 1]])).map(|p| p[1]), Some(Vec2::new(1.0, 1.0)));
    }
}
