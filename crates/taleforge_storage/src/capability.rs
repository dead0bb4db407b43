//! Capability records.
//!
//! Behaviour is composed per object: a world object carries any subset of
//! these records, and commands dispatch on which ones are present. There is
//! no type hierarchy; a takeable, openable container is simply an object
//! with all three records.

use taleforge_foundation::ObjectId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::exit::Exit;

/// Holds other objects (their `location` names this object).
///
/// A container without an [`Openable`] record is always open (a tray, a
/// basket). Transparency only matters while it is closed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    /// Contents can be seen (not reached) while closed.
    pub transparent: bool,
}

/// Can be opened and closed: a lid, a door, a trapdoor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Openable {
    /// Currently closed.
    pub closed: bool,
    /// Optional lock.
    pub lock: Option<Lock>,
}

/// A lock operated by a specific key object.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lock {
    /// Currently locked.
    pub locked: bool,
    /// The key that fits.
    pub key: ObjectId,
}

/// Can be picked up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Takeable;

/// Can be worn while held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wearable {
    /// Currently worn by whoever holds it.
    pub worn: bool,
}

/// Can be switched on and off.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Switchable {
    /// Currently on.
    pub on: bool,
}

/// Can be sat on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Furniture;

/// A non-player character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Npc {
    /// How many times the player has talked to this character.
    pub talked: u32,
}

/// A conversation topic, located in the character it belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Topic {
    /// Currently offered to the player.
    pub shown: bool,
    /// Topics that become available once this one is used.
    pub reveals: Vec<ObjectId>,
}

/// A location the player can be in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Room {
    /// Ways out, in declaration order.
    pub exits: Vec<Exit>,
}

impl Room {
    /// Finds the exit leading in a direction.
    #[must_use]
    pub fn exit(&self, direction: crate::exit::Direction) -> Option<&Exit> {
        self.exits.iter().find(|e| e.direction == direction)
    }
}
