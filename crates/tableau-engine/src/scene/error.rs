use thiserror::Error;

use super::{Id, Kind, Uid};

/// A primitive payload that does not match its type's required shape.
///
/// Produced by the non-panicking verification entry points. `value` holds
/// the offending data rendered as JSON.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {kind} data {value}: {reason} (expected {expected})")]
pub struct InvalidData {
    pub kind: Kind,
    pub expected: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything that can stop a graph operation.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    InvalidData(#[from] InvalidData),

    #[error("invalid transform: {0}")]
    InvalidTransform(String),

    #[error("primitive {uid} is a {actual}, not a {expected}")]
    KindMismatch { uid: Uid, expected: Kind, actual: Kind },

    #[error("id `{id}` is already assigned to primitive {uid}")]
    DuplicateId { id: Id, uid: Uid },

    #[error("primitive {0} is not a group")]
    NotAGroup(Uid),

    #[error("update changed uid {before} to {after}")]
    UidChanged { before: Uid, after: Uid },

    #[error("the root primitive cannot be deleted")]
    RootDeletion,

    #[error("close_group without a matching open_group")]
    UnbalancedGroup,

    /// Broken tree invariant: dangling child, shared child, cycle or orphan.
    #[error("structural violation: {0}")]
    Structural(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cbor: {0}")]
    Cbor(String),
}
