use core::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a primitive within one [`Graph`](super::Graph).
///
/// Allocated at insertion, never reused within the graph's lifetime and
/// never changed afterwards.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(pub u32);

impl Uid {
    /// The root group of every graph.
    pub const ROOT: Uid = Uid(0);

    #[inline]
    pub const fn new(v: u32) -> Self {
        Self(v)
    }

    /// Shifts the uid by `offset` modulo 2³², so that shifting by `k` then
    /// `-k` always restores the original value.
    #[inline]
    pub const fn wrapping_offset(self, offset: i64) -> Self {
        Self(self.0.wrapping_add(offset as u32))
    }

    #[inline]
    pub(crate) fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for Uid {
    #[inline]
    fn from(v: u32) -> Self {
        Self(v)
    }
}

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

name_type! {
    /// Caller-supplied lookup name. Unique within a graph; not structural.
    Id
}

name_type! {
    /// Free-form label; a primitive may carry many and a tag may mark many primitives.
    Tag
}
