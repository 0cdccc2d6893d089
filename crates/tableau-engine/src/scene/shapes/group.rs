use serde_json::Value;

use crate::scene::{Data, InvalidData, Kind, Primitive, SceneError, StyleSet, Styles, Uid};

use super::{invalid, items, Shape};

/// Ordered child uids. Order is paint order: later entries draw on top.
///
/// Child-list operations are functional: they return a new list and leave
/// the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub children: Vec<Uid>,
}

impl Group {
    pub fn new(children: Vec<Uid>) -> Self {
        Self { children }
    }

    /// Inserts `uid` at `index`; indices past the end append.
    pub fn insert_at(&self, index: usize, uid: Uid) -> Group {
        let mut children = self.children.clone();
        children.insert(index.min(children.len()), uid);
        Group { children }
    }

    /// Removes every occurrence of `uid`. Absent uids are a no-op.
    pub fn delete(&self, uid: Uid) -> Group {
        Group { children: self.children.iter().copied().filter(|c| *c != uid).collect() }
    }

    /// Shifts every child uid by `offset` (wrapping), for renumbering a
    /// subtree into another graph's uid range.
    pub fn increment(&self, offset: i64) -> Group {
        Group { children: self.children.iter().map(|c| c.wrapping_offset(offset)).collect() }
    }
}

impl From<Vec<Uid>> for Group {
    fn from(children: Vec<Uid>) -> Self {
        Self::new(children)
    }
}

impl Shape for Group {
    const KIND: Kind = Kind::Group;
    const EXPECTED: &'static str = "[uid, ...]";

    fn parse(raw: &Value) -> Result<Self, InvalidData> {
        let entries = items(raw).ok_or_else(|| invalid::<Self>(raw, "not a list"))?;
        entries
            .iter()
            .map(|v| {
                v.as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .map(Uid)
                    .ok_or_else(|| invalid::<Self>(raw, format!("child {v} is not a uid")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Group::new)
    }

    fn to_value(&self) -> Value {
        Value::Array(self.children.iter().map(|c| Value::from(c.0)).collect())
    }

    fn validate(&self) -> Result<(), InvalidData> {
        Ok(())
    }

    fn valid_styles() -> StyleSet {
        StyleSet::All
    }

    /// Groups forward every style for their descendants to inherit.
    fn filter_styles(styles: &Styles) -> Styles {
        styles.clone()
    }
}

// ── Primitive-level child operations ─────────────────────────────────────

impl Primitive {
    fn map_group(mut self, f: impl FnOnce(&Group) -> Group) -> Result<Self, SceneError> {
        let Data::Group(group) = &self.data else {
            return Err(SceneError::NotAGroup(self.uid));
        };
        self.data = Data::Group(f(group));
        Ok(self)
    }

    /// See [`Group::insert_at`]. Fails when `self` is not a group.
    pub fn insert_at(self, index: usize, uid: Uid) -> Result<Self, SceneError> {
        self.map_group(|g| g.insert_at(index, uid))
    }

    /// See [`Group::delete`]. Fails when `self` is not a group.
    pub fn delete(self, uid: Uid) -> Result<Self, SceneError> {
        self.map_group(|g| g.delete(uid))
    }

    /// See [`Group::increment`]. Fails when `self` is not a group.
    pub fn increment(self, offset: i64) -> Result<Self, SceneError> {
        self.map_group(|g| g.increment(offset))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn uids(ns: &[u32]) -> Vec<Uid> {
        ns.iter().copied().map(Uid).collect()
    }

    #[test]
    fn insert_at_clamps_to_append() {
        let g = Group::new(uids(&[1, 2]));
        assert_eq!(g.insert_at(0, Uid(9)).children, uids(&[9, 1, 2]));
        assert_eq!(g.insert_at(99, Uid(9)).children, uids(&[1, 2, 9]));
        assert_eq!(g.children, uids(&[1, 2]));
    }

    #[test]
    fn delete_removes_every_occurrence() {
        let g = Group::new(uids(&[1, 2, 1, 3]));
        assert_eq!(g.delete(Uid(1)).children, uids(&[2, 3]));
        assert_eq!(g.delete(Uid(7)), g);
    }

    #[test]
    fn verify_rejects_non_uids() {
        assert!(Group::verify(&json!([0, 1, 2])).is_ok());
        assert!(Group::verify(&json!([])).is_ok());
        assert!(Group::verify(&json!([1, 2.5])).is_err());
        assert!(Group::verify(&json!([1, -2])).is_err());
        assert!(Group::verify(&json!([1, "2"])).is_err());
        assert!(Group::verify(&json!([4294967296u64])).is_err());
    }

    proptest! {
        #[test]
        fn integer_lists_verify(children in prop::collection::vec(any::<u32>(), 0..32)) {
            let raw = Value::Array(children.iter().map(|c| json!(c)).collect());
            prop_assert!(Group::verify(&raw).is_ok());
            prop_assert_eq!(Group::normalize(&raw).unwrap(), raw);
        }

        #[test]
        fn list_with_a_fraction_fails(
            children in prop::collection::vec(any::<u32>(), 0..16),
            at in any::<prop::sample::Index>(),
            frac in 0.01f64..0.99,
        ) {
            let mut raw: Vec<Value> = children.iter().map(|c| json!(c)).collect();
            let i = at.index(raw.len() + 1);
            raw.insert(i, json!(i as f64 + frac));
            prop_assert!(Group::verify(&Value::Array(raw)).is_err());
        }

        #[test]
        fn insert_then_delete_restores(
            children in prop::collection::vec(0u32..1000, 0..16),
            index in 0usize..32,
            uid in 1000u32..2000,
        ) {
            let g = Group::new(uids(&children));
            prop_assert_eq!(g.insert_at(index, Uid(uid)).delete(Uid(uid)), g);
        }

        #[test]
        fn increment_inverts(children in prop::collection::vec(any::<u32>(), 0..16), k in any::<i64>()) {
            // wrapping_neg keeps i64::MIN in range; modulo 2^32 it is still -k
            let g = Group::new(uids(&children));
            prop_assert_eq!(g.increment(k).increment(k.wrapping_neg()), g);
        }
    }
}
