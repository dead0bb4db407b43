//! Display levels.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visibility/existence state of a world object.
///
/// Levels are ordered; an object below [`DisplayLevel::Scenery`] is never a
/// valid command target.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayLevel {
    /// The object no longer exists.
    Deleted = 0,
    /// The object does not exist yet, but is ready to.
    NotYetPresent = 1,
    /// Exists here but is not accessible. Turnscripts still run.
    Hidden = 2,
    /// Exists and is accessible, but is never mentioned.
    Scenery = 5,
    /// Accessible and listed in rooms, but not in inventories.
    InventoryExcluded = 8,
    /// Accessible and listed in inventories, but not in rooms.
    ListExcluded = 9,
    /// Accessible and shown in every listing.
    #[default]
    FullyDisplayed = 10,
}

impl DisplayLevel {
    /// Returns true if an object at this level can fill a command slot.
    #[must_use]
    pub fn is_targetable(self) -> bool {
        self >= Self::Scenery
    }

    /// Returns true if an object at this level still exists in the world.
    ///
    /// Hidden objects exist (and run turnscripts) even though nobody can
    /// interact with them.
    #[must_use]
    pub fn exists(self) -> bool {
        self >= Self::Hidden
    }

    /// Returns true if the object appears in a room description listing.
    #[must_use]
    pub fn in_room_listing(self) -> bool {
        matches!(self, Self::InventoryExcluded | Self::FullyDisplayed)
    }

    /// Returns true if the object appears in an inventory listing.
    #[must_use]
    pub fn in_inventory_listing(self) -> bool {
        matches!(self, Self::ListExcluded | Self::FullyDisplayed)
    }
}

impl fmt::Display for DisplayLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Deleted => "deleted",
            Self::NotYetPresent => "not-yet-present",
            Self::Hidden => "hidden",
            Self::Scenery => "scenery",
            Self::InventoryExcluded => "inventory-excluded",
            Self::ListExcluded => "list-excluded",
            Self::FullyDisplayed => "displayed",
        };
        f.write_str(name)
    }
}
