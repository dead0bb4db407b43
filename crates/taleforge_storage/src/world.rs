//! The object store.
//!
//! The `World` owns every world object in an arena indexed by [`ObjectId`]
//! plus a name table for by-name lookup. It uses persistent data structures,
//! so cloning a world for an undo snapshot is O(1) and shares structure with
//! the live copy.

use std::sync::Arc;

use im::{HashMap, Vector};
use taleforge_foundation::{DisplayLevel, Error, ErrorKind, Location, ObjectId, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::exit::{Direction, Exit};
use crate::object::WorldObject;

/// The object store every other layer queries.
///
/// Built once by [`WorldBuilder`](crate::WorldBuilder); afterwards objects
/// are mutated in place but never added or removed, so ids and names stay
/// valid for the whole session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    /// Object arena; `ObjectId` is the index.
    objects: Vector<WorldObject>,
    /// Name to id.
    names: HashMap<Arc<str>, ObjectId>,
    /// The player character.
    player: ObjectId,
    /// Number of turns that have passed.
    turn: u64,
}

impl World {
    pub(crate) fn from_parts(
        objects: Vector<WorldObject>,
        names: HashMap<Arc<str>, ObjectId>,
        player: ObjectId,
    ) -> Self {
        Self {
            objects,
            names,
            player,
            turn: 0,
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns the object with this id.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(id.index())
    }

    /// Returns the object with this id for mutation.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject> {
        self.objects.get_mut(id.index())
    }

    /// Returns the object with this id.
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` if the id is out of range.
    pub fn object(&self, id: ObjectId) -> Result<&WorldObject> {
        self.get(id).ok_or_else(|| Error::object_not_found(id))
    }

    /// Returns the object with this id for mutation.
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` if the id is out of range.
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut WorldObject> {
        self.get_mut(id).ok_or_else(|| Error::object_not_found(id))
    }

    /// Finds an object id by authoring name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied()
    }

    /// Finds an object by authoring name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&WorldObject> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    /// Finds an object id by authoring name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownObject` if nothing has that name.
    pub fn resolve(&self, name: &str) -> Result<ObjectId> {
        self.lookup(name).ok_or_else(|| Error::unknown_object(name))
    }

    /// Returns the authoring name of an object, or `"?"` for a bad id.
    #[must_use]
    pub fn name_of(&self, id: ObjectId) -> &str {
        self.get(id).map_or("?", WorldObject::name)
    }

    /// Iterates every object in id order.
    pub fn objects(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter()
    }

    /// Number of objects in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // =========================================================================
    // Player and clock
    // =========================================================================

    /// The player character.
    #[must_use]
    pub fn player(&self) -> ObjectId {
        self.player
    }

    /// Switches which object the player controls.
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` if the id is out of range.
    pub fn set_player(&mut self, id: ObjectId) -> Result<()> {
        self.object(id)?;
        let old = self.player;
        if let Some(obj) = self.get_mut(old) {
            obj.player = false;
        }
        self.object_mut(id)?.player = true;
        self.player = id;
        Ok(())
    }

    /// Number of turns that have passed.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Advances the turn counter.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
    }

    // =========================================================================
    // Containment
    // =========================================================================

    /// Where an object is (`Nowhere` for a bad id).
    #[must_use]
    pub fn location_of(&self, id: ObjectId) -> Location {
        self.get(id).map_or(Location::Nowhere, |o| o.location)
    }

    /// The objects directly inside `container`, in id order.
    ///
    /// Contents are derived from each object's location, never stored.
    #[must_use]
    pub fn contents(&self, container: ObjectId) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| o.location.is_in(container))
            .map(WorldObject::id)
            .collect()
    }

    /// The chain of containers above an object, innermost first.
    ///
    /// Bounded by the store size so a corrupt graph cannot loop forever.
    #[must_use]
    pub fn ancestors(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut chain = Vec::new();
        let mut current = self.location_of(id);
        while let Location::In(parent) = current {
            if chain.len() > self.objects.len() {
                break;
            }
            chain.push(parent);
            current = self.location_of(parent);
        }
        chain
    }

    /// Returns true if `ancestor` directly or indirectly contains `id`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    /// The room an object is ultimately in, if any.
    #[must_use]
    pub fn room_of(&self, id: ObjectId) -> Option<ObjectId> {
        if self.get(id).is_some_and(WorldObject::is_room) {
            return Some(id);
        }
        self.ancestors(id)
            .into_iter()
            .find(|a| self.get(*a).is_some_and(WorldObject::is_room))
    }

    /// Moves an object. Moving an object clears its worn flag.
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` for a bad id or destination, and
    /// `ContainmentCycle` if the destination is the object itself or
    /// something inside it.
    pub fn move_to(&mut self, id: ObjectId, destination: Location) -> Result<()> {
        self.object(id)?;
        if let Location::In(container) = destination {
            self.object(container)?;
            if container == id || self.is_ancestor(id, container) {
                return Err(Error::containment_cycle(
                    self.name_of(id),
                    self.name_of(container),
                ));
            }
        }
        let obj = self.object_mut(id)?;
        obj.location = destination;
        if let Some(wearable) = obj.wearable.as_mut() {
            wearable.worn = false;
        }
        Ok(())
    }

    /// Sets an object's display level.
    ///
    /// # Errors
    ///
    /// Returns `ObjectNotFound` for a bad id.
    pub fn set_display(&mut self, id: ObjectId, display: DisplayLevel) -> Result<()> {
        self.object_mut(id)?.display = display;
        Ok(())
    }

    // =========================================================================
    // Exits
    // =========================================================================

    /// The exits of a room (empty for non-rooms).
    #[must_use]
    pub fn exits(&self, room: ObjectId) -> &[Exit] {
        self.get(room)
            .and_then(|o| o.room.as_ref())
            .map_or(&[][..], |r| r.exits.as_slice())
    }

    /// The exit leading from a room in a direction.
    #[must_use]
    pub fn exit(&self, room: ObjectId, direction: Direction) -> Option<&Exit> {
        self.exits(room).iter().find(|e| e.direction == direction)
    }

    /// Checks the structural soundness of the store: every location and
    /// exit refers to an existing object and no containment chain loops.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        for obj in &self.objects {
            if let Location::In(parent) = obj.location {
                if self.get(parent).is_none() {
                    return Err(Error::new(ErrorKind::UnknownLocation {
                        object: obj.name().to_string(),
                        location: parent.to_string(),
                    }));
                }
            }
            let chain = self.ancestors(obj.id());
            if chain.contains(&obj.id()) || chain.len() > self.objects.len() {
                let container = chain.first().map_or("?", |c| self.name_of(*c));
                return Err(Error::containment_cycle(obj.name(), container));
            }
            for exit in self.exits(obj.id()) {
                if self.get(exit.destination).is_none() {
                    return Err(Error::new(ErrorKind::UnknownExit {
                        room: obj.name().to_string(),
                        direction: exit.direction.to_string(),
                        destination: exit.destination.to_string(),
                    }));
                }
            }
        }
        Ok(())
    }
}
