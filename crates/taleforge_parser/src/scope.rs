//! Scope resolution.
//!
//! Pure predicates answering "is this object here / held / worn / reachable /
//! visible" for one acting character. Reachability and visibility walk the
//! containment chain: a closed container blocks reaching, and blocks seeing
//! unless it is transparent.

use std::fmt;

use taleforge_foundation::{Location, ObjectId};
use taleforge_storage::{World, WorldObject};

/// The membership tests a command slot can require.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Scope {
    /// Carried by the actor and not worn.
    Held,
    /// Worn by the actor.
    Worn,
    /// Carried by the actor, worn or not.
    HeldOrWorn,
    /// Directly in the actor's location, listed or not.
    Here,
    /// Directly in the actor's location and shown in the room listing.
    HereListed,
    /// Can be touched: every container on the way is open.
    Reachable,
    /// Can be seen: every container on the way is open or transparent.
    Visible,
    /// Here or carried.
    Present,
}

impl Scope {
    /// Every scope, in report order.
    pub const ALL: [Scope; 8] = [
        Self::Held,
        Self::Worn,
        Self::HeldOrWorn,
        Self::Here,
        Self::HereListed,
        Self::Reachable,
        Self::Visible,
        Self::Present,
    ];

    /// Lowercase label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Held => "held",
            Self::Worn => "worn",
            Self::HeldOrWorn => "held or worn",
            Self::Here => "here",
            Self::HereListed => "here listed",
            Self::Reachable => "reachable",
            Self::Visible => "visible",
            Self::Present => "present",
        }
    }
}

/// Answers scope questions for one actor against one world state.
///
/// Holds no cache, so results always reflect the live locations.
#[derive(Clone, Copy, Debug)]
pub struct ScopeResolver<'w> {
    world: &'w World,
    actor: ObjectId,
}

impl<'w> ScopeResolver<'w> {
    /// Creates a resolver for `actor`.
    #[must_use]
    pub fn new(world: &'w World, actor: ObjectId) -> Self {
        Self { world, actor }
    }

    /// Creates a resolver for the player.
    #[must_use]
    pub fn for_player(world: &'w World) -> Self {
        Self::new(world, world.player())
    }

    /// The world being queried.
    #[must_use]
    pub fn world(&self) -> &'w World {
        self.world
    }

    /// The acting character.
    #[must_use]
    pub fn actor(&self) -> ObjectId {
        self.actor
    }

    /// Where the actor is.
    #[must_use]
    pub fn actor_location(&self) -> Location {
        self.world.location_of(self.actor)
    }

    fn targetable(&self, id: ObjectId) -> Option<&'w WorldObject> {
        self.world.get(id).filter(|o| o.display.is_targetable())
    }

    /// Tests membership in one scope.
    #[must_use]
    pub fn in_scope(&self, id: ObjectId, scope: Scope) -> bool {
        match scope {
            Scope::Held => self.is_held(id),
            Scope::Worn => self.is_worn(id),
            Scope::HeldOrWorn => self.is_held_or_worn(id),
            Scope::Here => self.is_here(id),
            Scope::HereListed => self.is_here_listed(id),
            Scope::Reachable => self.is_reachable(id),
            Scope::Visible => self.is_visible(id),
            Scope::Present => self.is_present(id),
        }
    }

    /// Carried by the actor and not worn.
    #[must_use]
    pub fn is_held(&self, id: ObjectId) -> bool {
        self.targetable(id)
            .is_some_and(|o| o.location.is_in(self.actor) && !o.is_worn())
    }

    /// Worn by the actor.
    #[must_use]
    pub fn is_worn(&self, id: ObjectId) -> bool {
        self.targetable(id)
            .is_some_and(|o| o.location.is_in(self.actor) && o.is_worn())
    }

    /// Carried by the actor, worn or not.
    #[must_use]
    pub fn is_held_or_worn(&self, id: ObjectId) -> bool {
        self.targetable(id)
            .is_some_and(|o| o.location.is_in(self.actor))
    }

    /// Directly in the actor's location.
    #[must_use]
    pub fn is_here(&self, id: ObjectId) -> bool {
        let here = self.actor_location();
        here != Location::Nowhere
            && id != self.actor
            && self.targetable(id).is_some_and(|o| o.location == here)
    }

    /// Directly in the actor's location and shown in the room listing.
    #[must_use]
    pub fn is_here_listed(&self, id: ObjectId) -> bool {
        self.is_here(id) && self.world.get(id).is_some_and(|o| o.display.in_room_listing())
    }

    /// Here or carried.
    #[must_use]
    pub fn is_present(&self, id: ObjectId) -> bool {
        self.is_here(id) || self.is_held_or_worn(id)
    }

    /// Every container between the object and the actor (or the actor's
    /// location) is open.
    #[must_use]
    pub fn is_reachable(&self, id: ObjectId) -> bool {
        self.targetable(id).is_some() && self.walk(id, false)
    }

    /// Every container between the object and the actor (or the actor's
    /// location) is open or transparent.
    #[must_use]
    pub fn is_visible(&self, id: ObjectId) -> bool {
        self.targetable(id).is_some() && self.walk(id, true)
    }

    /// Climbs the containment chain. Cycles are rejected when the world is
    /// built, but the walk is still bounded by the store size.
    fn walk(&self, id: ObjectId, see_through: bool) -> bool {
        let here = self.actor_location();
        let mut current = id;
        for _ in 0..=self.world.len() {
            if current == self.actor {
                return true;
            }
            let Some(obj) = self.world.get(current) else {
                return false;
            };
            match obj.location {
                Location::Nowhere => return false,
                Location::Ubiquitous => return true,
                loc if loc == here => return true,
                Location::In(parent) => {
                    if parent == self.actor {
                        return true;
                    }
                    let Some(container) = self.world.get(parent) else {
                        return false;
                    };
                    if container.container.is_none() {
                        return false;
                    }
                    if container.is_closed() && !(see_through && container.is_transparent()) {
                        return false;
                    }
                    current = parent;
                }
            }
        }
        false
    }

    /// Every object the actor can currently see, in id order.
    #[must_use]
    pub fn visible_objects(&self) -> Vec<ObjectId> {
        self.world
            .objects()
            .map(WorldObject::id)
            .filter(|id| *id != self.actor && self.is_visible(*id))
            .collect()
    }

    /// Every object satisfying a scope, in id order.
    #[must_use]
    pub fn objects_in(&self, scope: Scope) -> Vec<ObjectId> {
        self.world
            .objects()
            .map(WorldObject::id)
            .filter(|id| self.in_scope(*id, scope))
            .collect()
    }

    /// Evaluates every scope for one object.
    #[must_use]
    pub fn report(&self, id: ObjectId) -> ScopeReport {
        ScopeReport {
            name: self.world.name_of(id).to_string(),
            results: Scope::ALL.map(|s| (s, self.in_scope(id, s))),
        }
    }
}

/// Every scope predicate evaluated for one object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeReport {
    /// The object's name.
    pub name: String,
    /// One result per scope, in [`Scope::ALL`] order.
    pub results: [(Scope, bool); 8],
}

impl ScopeReport {
    /// Looks up one result.
    #[must_use]
    pub fn get(&self, scope: Scope) -> bool {
        self.results
            .iter()
            .find(|(s, _)| *s == scope)
            .is_some_and(|(_, v)| *v)
    }
}

impl fmt::Display for ScopeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for (scope, value) in &self.results {
            writeln!(f, "  {}: {value}", scope.label())?;
        }
        Ok(())
    }
}
