use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Data, Group, Id, Kind, Options, Primitive, SceneError, Tag, Uid};

/// Selects the node(s) a [`Graph::modify`] or [`Graph::delete`] applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Uid(Uid),
    Id(Id),
    /// Every primitive carrying the tag.
    Tag(Tag),
}

impl From<Uid> for Selector {
    fn from(uid: Uid) -> Self {
        Selector::Uid(uid)
    }
}

impl From<Id> for Selector {
    fn from(id: Id) -> Self {
        Selector::Id(id)
    }
}

impl From<Tag> for Selector {
    fn from(tag: Tag) -> Self {
        Selector::Tag(tag)
    }
}

/// Bare strings select by id.
impl From<&str> for Selector {
    fn from(id: &str) -> Self {
        Selector::Id(Id::from(id))
    }
}

/// The scene graph: an arena of primitives keyed by uid, rooted at a group.
///
/// Groups hold child uids; there are no back-pointers. The graph keeps the
/// structure a tree at every step:
/// - new uids come from a counter and are never reused
/// - the only way to attach a node is [`insert`](Graph::insert), which
///   appends it to the current group
/// - [`modify`](Graph::modify) may reorder a group's children but never
///   change the set
///
/// Every mutating call takes the graph by value and returns it, so builder
/// pipelines read as a chain of `?` calls.
///
/// # Group context
/// `open_group` / `close_group` form a stack, like a clip stack: while a
/// group is open, inserts land in it.
///
/// # Equality
/// Two graphs are equal when their primitives and uid counters are. The
/// group context is editing state: it is not serialized and takes no part
/// in equality, so a graph equals its own JSON round trip even while a
/// group is open.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GraphWire", into = "GraphWire")]
pub struct Graph {
    primitives: BTreeMap<Uid, Primitive>,
    next_uid: Uid,
    ids: BTreeMap<Id, Uid>,
    tags: BTreeMap<Tag, BTreeSet<Uid>>,
    group_stack: Vec<Uid>,
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.next_uid == other.next_uid && self.primitives == other.primitives
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::build()
    }
}

impl Graph {
    /// Empty graph holding only the root group.
    pub fn build() -> Self {
        let root = Primitive {
            uid: Uid::ROOT,
            data: Data::Group(Group::default()),
            styles: Default::default(),
            transforms: Default::default(),
            id: None,
            tags: BTreeSet::new(),
        };
        Graph {
            primitives: BTreeMap::from([(Uid::ROOT, root)]),
            next_uid: Uid(1),
            ids: BTreeMap::new(),
            tags: BTreeMap::new(),
            group_stack: Vec::new(),
        }
    }

    /// Empty graph whose root carries `options`: default styles and
    /// transforms inherited by every primitive.
    pub fn build_with(options: Options) -> Result<Self, SceneError> {
        let mut graph = Self::build();
        let root = graph.fetch(Uid::ROOT)?.merge(options)?;
        graph.index(&root);
        graph.primitives.insert(Uid::ROOT, root);
        Ok(graph)
    }

    // ── insertion ─────────────────────────────────────────────────────────

    /// Validates `data`, allocates a uid and appends the new primitive to
    /// the current group.
    pub fn insert(mut self, data: impl Into<Data>, options: Options) -> Result<Self, SceneError> {
        self.insert_uid(data, options)?;
        Ok(self)
    }

    /// Like [`insert`](Self::insert) for untyped data of the given kind.
    pub fn insert_value(self, kind: Kind, raw: &Value, options: Options) -> Result<Self, SceneError> {
        let data = kind.parse(raw)?;
        self.insert(data, options)
    }

    /// In-place insert returning the new uid. On error the graph is unchanged.
    pub fn insert_uid(&mut self, data: impl Into<Data>, options: Options) -> Result<Uid, SceneError> {
        let data = data.into();
        if !data.children().is_empty() {
            return Err(SceneError::Structural(
                "groups are inserted empty and filled through open_group".into(),
            ));
        }
        let uid = self.next_uid;
        let next = uid.next().ok_or_else(|| SceneError::Structural("uid space exhausted".into()))?;
        let primitive = Primitive::new(uid, data, options)?;
        self.check_id(&primitive)?;

        let parent = self.current_group();
        let group = self.fetch(parent)?.insert_at(usize::MAX, uid)?;
        self.primitives.insert(parent, group);

        log::debug!("insert {} {uid} into {parent}", primitive.kind());
        self.index(&primitive);
        self.primitives.insert(uid, primitive);
        self.next_uid = next;
        Ok(uid)
    }

    /// Inserts an empty group and makes it the current group.
    pub fn open_group(mut self, options: Options) -> Result<Self, SceneError> {
        let uid = self.insert_uid(Group::default(), options)?;
        self.group_stack.push(uid);
        Ok(self)
    }

    pub fn close_group(mut self) -> Result<Self, SceneError> {
        self.group_stack.pop().ok_or(SceneError::UnbalancedGroup)?;
        Ok(self)
    }

    /// Group that receives inserts: the innermost open group, or the root.
    #[inline]
    pub fn current_group(&self) -> Uid {
        self.group_stack.last().copied().unwrap_or(Uid::ROOT)
    }

    /// Inserts `other` as a new group under the current group.
    ///
    /// `other`'s uids are shifted past this graph's counter; its root
    /// becomes the new group and keeps its own styles and transforms, with
    /// `options` merged on top. An id already present in `self`, or carried
    /// twice by the incoming nodes, is rejected and `self` is unchanged.
    pub fn graft(mut self, other: Graph, options: Options) -> Result<Self, SceneError> {
        let offset = i64::from(self.next_uid.0) - i64::from(Uid::ROOT.0);
        let span = other.next_uid.0;
        let next = self
            .next_uid
            .0
            .checked_add(span)
            .map(Uid)
            .ok_or_else(|| SceneError::Structural("uid space exhausted".into()))?;

        let mut incoming: Vec<Primitive> =
            other.primitives.into_values().map(|p| p.renumbered(offset)).collect();
        let new_root = self.next_uid;
        if let Some(root) = incoming.iter_mut().find(|p| p.uid == new_root) {
            *root = root.clone().merge(options)?;
        }
        let mut incoming_ids: BTreeMap<&Id, Uid> = BTreeMap::new();
        for p in &incoming {
            self.check_id(p)?;
            if let Some(id) = &p.id {
                if let Some(owner) = incoming_ids.insert(id, p.uid) {
                    return Err(SceneError::DuplicateId { id: id.clone(), uid: owner });
                }
            }
        }

        let parent = self.current_group();
        let group = self.fetch(parent)?.insert_at(usize::MAX, new_root)?;
        self.primitives.insert(parent, group);
        for p in incoming {
            self.index(&p);
            self.primitives.insert(p.uid, p);
        }
        self.next_uid = next;
        log::debug!("graft {span} uids at {new_root} into {parent}");
        Ok(self)
    }

    // ── lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn root(&self) -> &Primitive {
        &self.primitives[&Uid::ROOT]
    }

    #[inline]
    pub fn get(&self, uid: Uid) -> Option<&Primitive> {
        self.primitives.get(&uid)
    }

    /// Primitive carrying `id`.
    pub fn get_id(&self, id: &str) -> Option<&Primitive> {
        self.find_id(id).and_then(|uid| self.get(uid))
    }

    /// Uid carrying `id`.
    pub fn find_id(&self, id: &str) -> Option<Uid> {
        self.ids.get(&Id::from(id)).copied()
    }

    /// Uids carrying `tag`, ascending. Empty when none do.
    pub fn find_tag(&self, tag: &str) -> Vec<Uid> {
        self.tags.get(&Tag::from(tag)).map(|s| s.iter().copied().collect()).unwrap_or_default()
    }

    /// Children of `uid` in paint order; empty for leaves and unknown uids.
    pub fn children(&self, uid: Uid) -> &[Uid] {
        self.get(uid).map(Primitive::children).unwrap_or(&[])
    }

    /// Group listing `uid` as a child.
    pub fn parent_of(&self, uid: Uid) -> Option<Uid> {
        self.primitives.values().find(|p| p.children().contains(&uid)).map(Primitive::uid)
    }

    /// All primitives in uid order.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Only the root exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.len() == 1
    }

    /// Uid the next insert will receive.
    #[inline]
    pub fn next_uid(&self) -> Uid {
        self.next_uid
    }

    fn select(&self, selector: &Selector) -> Vec<Uid> {
        match selector {
            Selector::Uid(uid) => self.get(*uid).map(|p| vec![p.uid]).unwrap_or_default(),
            Selector::Id(id) => self.find_id(id.as_str()).into_iter().collect(),
            Selector::Tag(tag) => self.find_tag(tag.as_str()),
        }
    }

    // ── mutation ──────────────────────────────────────────────────────────

    /// Applies `f` to every selected primitive and writes the result back.
    ///
    /// `f` may change data (same kind), styles, transforms, id and tags. A
    /// group's children may be reordered but not added or removed; use
    /// [`insert`](Self::insert) and [`delete`](Self::delete) for that.
    /// Selecting nothing is a no-op.
    pub fn modify<F>(mut self, selector: impl Into<Selector>, mut f: F) -> Result<Self, SceneError>
    where
        F: FnMut(Primitive) -> Result<Primitive, SceneError>,
    {
        for uid in self.select(&selector.into()) {
            let before = self.primitives[&uid].clone();
            let after = f(before.clone())?;
            if after.uid != before.uid {
                return Err(SceneError::UidChanged { before: before.uid, after: after.uid });
            }
            if after.kind() != before.kind() {
                return Err(SceneError::KindMismatch {
                    uid,
                    expected: before.kind(),
                    actual: after.kind(),
                });
            }
            if !same_members(before.children(), after.children()) {
                return Err(SceneError::Structural(format!(
                    "modify of {uid} changed its children; only reordering is allowed"
                )));
            }
            after.data.validate()?;
            after.transforms.validate()?;

            self.unindex(&before);
            if let Err(e) = self.check_id(&after) {
                self.index(&before);
                return Err(e);
            }
            self.index(&after);
            self.primitives.insert(uid, after);
            log::debug!("modify {uid}");
        }
        Ok(self)
    }

    /// Removes the selected primitives with their subtrees and drops them
    /// from their parent groups. Selecting nothing is a no-op; selecting
    /// the root is an error.
    pub fn delete(mut self, selector: impl Into<Selector>) -> Result<Self, SceneError> {
        let targets = self.select(&selector.into());
        if targets.contains(&Uid::ROOT) {
            return Err(SceneError::RootDeletion);
        }
        for uid in targets {
            if !self.primitives.contains_key(&uid) {
                // already gone with an earlier target's subtree
                continue;
            }
            if let Some(parent) = self.parent_of(uid) {
                let group = self.fetch(parent)?.delete(uid)?;
                self.primitives.insert(parent, group);
            }
            let removed = self.subtree(uid)?;
            for r in &removed {
                if let Some(p) = self.primitives.remove(r) {
                    self.unindex(&p);
                }
            }
            if let Some(pos) = self.group_stack.iter().position(|g| removed.contains(g)) {
                self.group_stack.truncate(pos);
            }
            log::debug!("delete {uid} ({} primitives)", removed.len());
        }
        Ok(self)
    }

    /// `uid` and all its descendants.
    fn subtree(&self, uid: Uid) -> Result<BTreeSet<Uid>, SceneError> {
        let mut seen = BTreeSet::new();
        let mut pending = vec![uid];
        while let Some(next) = pending.pop() {
            if !seen.insert(next) {
                return Err(SceneError::Structural(format!("{next} is reachable twice under {uid}")));
            }
            pending.extend_from_slice(self.children(next));
        }
        Ok(seen)
    }

    // ── validation ────────────────────────────────────────────────────────

    /// Full structural check: the root is a group, every child exists,
    /// every node has at most one parent, there are no cycles and every
    /// node is reachable from the root. Also re-verifies every payload,
    /// checks that ids are unique and that the id and tag indices list
    /// exactly what the primitives carry.
    pub fn validate(&self) -> Result<(), SceneError> {
        match self.get(Uid::ROOT) {
            Some(root) if root.kind() == Kind::Group => {}
            Some(root) => {
                return Err(SceneError::Structural(format!("root is a {}", root.kind())));
            }
            None => return Err(SceneError::Structural("missing root".into())),
        }

        let mut parent: BTreeMap<Uid, Uid> = BTreeMap::new();
        for p in self.primitives.values() {
            p.data.validate()?;
            p.transforms.validate()?;
            for &child in p.children() {
                if !self.primitives.contains_key(&child) {
                    return Err(SceneError::Structural(format!("{} lists missing child {child}", p.uid)));
                }
                if child == Uid::ROOT {
                    return Err(SceneError::Structural(format!("{} lists the root", p.uid)));
                }
                if let Some(prev) = parent.insert(child, p.uid) {
                    return Err(SceneError::Structural(format!(
                        "{child} has two parents: {prev} and {}",
                        p.uid
                    )));
                }
            }
        }

        // one parent each and no edge into the root: reachability rules out cycles
        let reachable = self.subtree(Uid::ROOT)?;
        if let Some(orphan) = self.primitives.keys().find(|uid| !reachable.contains(uid)) {
            return Err(SceneError::Structural(format!("{orphan} is not reachable from the root")));
        }
        if let Some(max) = self.primitives.keys().next_back() {
            if *max >= self.next_uid {
                return Err(SceneError::Structural(format!("{max} is not below the uid counter")));
            }
        }
        self.validate_indices()
    }

    fn validate_indices(&self) -> Result<(), SceneError> {
        let mut ids: BTreeMap<Id, Uid> = BTreeMap::new();
        let mut tags: BTreeMap<Tag, BTreeSet<Uid>> = BTreeMap::new();
        for p in self.primitives.values() {
            if let Some(id) = &p.id {
                if let Some(owner) = ids.insert(id.clone(), p.uid) {
                    return Err(SceneError::DuplicateId { id: id.clone(), uid: owner });
                }
            }
            for tag in &p.tags {
                tags.entry(tag.clone()).or_default().insert(p.uid);
            }
        }
        if ids != self.ids {
            return Err(SceneError::Structural("id index does not match the primitives".into()));
        }
        if tags != self.tags {
            return Err(SceneError::Structural("tag index does not match the primitives".into()));
        }
        Ok(())
    }

    // ── serialization ─────────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses, verifies every payload and checks the structure.
    pub fn from_json(s: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Deterministic CBOR encoding. Equal graphs produce equal bytes.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, SceneError> {
        let mut out = Vec::new();
        ciborium::into_writer(self, &mut out).map_err(|e| SceneError::Cbor(e.to_string()))?;
        Ok(out)
    }

    /// blake3 hash of [`canonical_bytes`](Self::canonical_bytes), for
    /// comparing graphs between renders.
    pub fn digest(&self) -> Result<[u8; 32], SceneError> {
        Ok(*blake3::hash(&self.canonical_bytes()?).as_bytes())
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn fetch(&self, uid: Uid) -> Result<Primitive, SceneError> {
        self.primitives
            .get(&uid)
            .cloned()
            .ok_or_else(|| SceneError::Structural(format!("{uid} is referenced but missing")))
    }

    fn check_id(&self, p: &Primitive) -> Result<(), SceneError> {
        match p.id.as_ref().and_then(|id| self.ids.get(id).map(|owner| (id, *owner))) {
            Some((id, owner)) if owner != p.uid => {
                Err(SceneError::DuplicateId { id: id.clone(), uid: owner })
            }
            _ => Ok(()),
        }
    }

    fn index(&mut self, p: &Primitive) {
        if let Some(id) = &p.id {
            self.ids.insert(id.clone(), p.uid);
        }
        for tag in &p.tags {
            self.tags.entry(tag.clone()).or_default().insert(p.uid);
        }
    }

    fn unindex(&mut self, p: &Primitive) {
        if let Some(id) = &p.id {
            if self.ids.get(id) == Some(&p.uid) {
                self.ids.remove(id);
            }
        }
        for tag in &p.tags {
            if let Some(set) = self.tags.get_mut(tag) {
                set.remove(&p.uid);
                if set.is_empty() {
                    self.tags.remove(tag);
                }
            }
        }
    }
}

fn same_members(a: &[Uid], b: &[Uid]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[derive(Clone, Serialize, Deserialize)]
struct GraphWire {
    next_uid: Uid,
    primitives: Vec<Primitive>,
}

impl From<Graph> for GraphWire {
    fn from(g: Graph) -> Self {
        GraphWire { next_uid: g.next_uid, primitives: g.primitives.into_values().collect() }
    }
}

impl TryFrom<GraphWire> for Graph {
    type Error = SceneError;

    fn try_from(w: GraphWire) -> Result<Self, Self::Error> {
        let mut graph = Graph {
            primitives: BTreeMap::new(),
            next_uid: w.next_uid,
            ids: BTreeMap::new(),
            tags: BTreeMap::new(),
            group_stack: Vec::new(),
        };
        for p in w.primitives {
            if graph.primitives.contains_key(&p.uid) {
                return Err(SceneError::Structural(format!("{} appears twice", p.uid)));
            }
            graph.check_id(&p)?;
            graph.index(&p);
            graph.primitives.insert(p.uid, p);
        }
        graph.validate()?;
        Ok(graph)
    }
}
