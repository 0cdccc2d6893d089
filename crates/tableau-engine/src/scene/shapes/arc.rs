use serde_json::Value;

use crate::coords::{contain, Vec2};
use crate::scene::style::ARC_STYLES;
use crate::scene::{InvalidData, Kind, StyleSet};

use super::{all_finite, invalid, items, num, numbers, Shape};

/// Curved band of a circle around the local origin, from `start` to
/// `finish` (radians). Position it with a `translate` transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Arc {
    pub radius: f64,
    pub start: f64,
    pub finish: f64,
}

impl Arc {
    #[inline]
    pub const fn new(radius: f64, start: f64, finish: f64) -> Self {
        Self { radius, start, finish }
    }
}

impl From<(f64, f64, f64)> for Arc {
    #[inline]
    fn from((radius, start, finish): (f64, f64, f64)) -> Self {
        Self::new(radius, start, finish)
    }
}

impl Shape for Arc {
    const KIND: Kind = Kind::Arc;
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
        StyleSet::Only(ARC_STYLES)
    }

    fn contains_point(&self, p: Vec2) -> bool {
        contain::arc(self.radius, self.start, self.finish, p)
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn verify_rejects_wrong_arity_and_types() {
        assert!(Arc::verify(&json!([10, 0])).is_err());
        assert!(Arc::verify(&json!([10, 0, 1, 2])).is_err());
        assert!(Arc::verify(&json!([10, "0", 1])).is_err());
        assert!(Arc::verify(&json!(10)).is_err());
    }

    #[test]
    fn error_message_embeds_value_and_shape() {
        let err = Arc::verify(&json!(["ten", 0, 1])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(r#"["ten",0,1]"#), "{msg}");
        assert!(msg.contains("[radius, start, finish]"), "{msg}");
        assert_eq!(err.kind, Kind::Arc);
    }

    #[test]
    #[should_panic(expected = "invalid arc data")]
    fn expect_valid_panics_on_bad_data() {
        Arc::expect_valid(&json!([1, 2]));
    }

    #[test]
    fn contains_only_curved_band() {
        let arc = Arc::new(10.0, 0.0, FRAC_PI_2);
        assert!(!arc.contains_point(Vec2::new(2.0, 2.0)));
        assert!(arc.contains_point(Vec2::polar(9.8, FRAC_PI_4)));
        assert!(!arc.contains_point(Vec2::polar(10.2, FRAC_PI_4)));
    }

    #[test]
    fn normalize_keeps_precision_and_spelling() {
        for raw in [json!([10.5, 0.1, 1.25]), json!([10, 0, 1]), json!([10.0, 0.0, 1.0]), json!([1e300, -0.3, 7])] {
            assert_eq!(Arc::normalize(&raw).unwrap(), raw);
        }
        assert_eq!(Arc::from_value(&json!([10.5, 0.1, 1.25])).unwrap(), Arc::new(10.5, 0.1, 1.25));
    }

    fn field() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<f64>().prop_filter("finite", |x| x.is_finite()).prop_map(|x| json!(x)),
            any::<i64>().prop_map(|n| json!(n)),
            any::<u64>().prop_map(|n| json!(n)),
        ]
    }

    proptest! {
        #[test]
        fn numeric_data_verifies_and_normalizes_to_itself(r in field(), s in field(), f in field()) {
            let raw = Value::Array(vec![r, s, f]);
            prop_assert!(Arc::verify(&raw).is_ok());
            prop_assert_eq!(Arc::normalize(&raw).unwrap(), raw.clone());
            let once = Arc::normalize(&raw).unwrap();
            prop_assert_eq!(Arc::normalize(&once).unwrap(), once);
        }

        #[test]
        fn non_numeric_or_wrong_arity_fails(
            len in 0usize..6, bad in 0usize..6, word in "[a-z]{1,6}",
        ) {
            let mut fields: Vec<Value> = (0..len).map(|i| json!(i)).collect();
            if len == 3 {
                fields[bad % 3] = json!(word);
            }
            let err = Arc::verify(&Value::Array(fields)).unwrap_err();
            prop_assert_eq!(err.kind, Kind::Arc);
        }
    }
}
