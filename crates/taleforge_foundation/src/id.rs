//! Object identifiers and locations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a world object.
///
/// Objects are created once when the world is built and never removed
/// (logical destruction uses [`DisplayLevel::Deleted`](crate::DisplayLevel)),
/// so an id stays valid for the whole session.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates an object id from its arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the arena index of this object.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a world object currently is.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Location {
    /// Not placed anywhere yet (or removed from play).
    #[default]
    Nowhere,
    /// Present everywhere (walls, ceiling, the sky).
    Ubiquitous,
    /// Inside, on, held or worn by another object.
    In(ObjectId),
}

impl Location {
    /// Returns the containing object, if any.
    #[must_use]
    pub const fn object(self) -> Option<ObjectId> {
        match self {
            Self::In(id) => Some(id),
            Self::Nowhere | Self::Ubiquitous => None,
        }
    }

    /// Returns true if this location is the given object.
    #[must_use]
    pub fn is_in(self, id: ObjectId) -> bool {
        self == Self::In(id)
    }
}

impl From<ObjectId> for Location {
    fn from(id: ObjectId) -> Self {
        Self::In(id)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nowhere => write!(f, "nowhere"),
            Self::Ubiquitous => write!(f, "everywhere"),
            Self::In(id) => write!(f, "in {id}"),
        }
    }
}
