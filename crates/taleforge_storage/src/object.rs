//! The world object record.

use std::sync::Arc;

use im::OrdMap;
use taleforge_foundation::{DisplayLevel, Location, ObjectId, Pronouns, Value};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::capability::{
    Container, Furniture, Npc, Openable, Room, Switchable, Takeable, Topic, Wearable,
};

/// A room, item or character.
///
/// Identity (`id`, `name`) is fixed when the world is built. Everything else
/// is mutable game state. Behaviour is given by the optional capability
/// records; per-instance behaviour overrides live in the engine's hook
/// registry, never on the record itself, so a `WorldObject` is plain data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldObject {
    id: ObjectId,
    name: Arc<str>,
    /// What the player calls it ("glass cabinet").
    pub alias: String,
    /// Other words that refer to it.
    pub synonyms: Vec<String>,
    /// Containing object, or a sentinel.
    pub location: Location,
    /// Visibility/existence state.
    pub display: DisplayLevel,
    /// Pronoun set used in narration and for "it"/"him"/"her"/"them".
    pub pronouns: Pronouns,
    /// A proper name takes no article ("Kyle", not "the Kyle").
    pub proper_name: bool,
    /// This object is the player character.
    pub player: bool,
    /// Examine text template.
    pub examine: Option<String>,
    /// Room description template.
    pub description: Option<String>,
    /// Holds other objects.
    pub container: Option<Container>,
    /// Opens and closes, possibly locked.
    pub openable: Option<Openable>,
    /// Can be picked up.
    pub takeable: Option<Takeable>,
    /// Can be worn.
    pub wearable: Option<Wearable>,
    /// Can be switched on and off.
    pub switchable: Option<Switchable>,
    /// Can be sat on.
    pub furniture: Option<Furniture>,
    /// Is a non-player character.
    pub npc: Option<Npc>,
    /// Is a conversation topic.
    pub topic: Option<Topic>,
    /// Is a room.
    pub room: Option<Room>,
    /// Free-form fields (`power`, `happy`, ...).
    pub fields: OrdMap<String, Value>,
}

impl WorldObject {
    /// Creates a bare object. The alias defaults to the name with
    /// underscores turned into spaces.
    #[must_use]
    pub fn new(id: ObjectId, name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        Self {
            id,
            alias: name.replace('_', " "),
            name,
            synonyms: Vec::new(),
            location: Location::Nowhere,
            display: DisplayLevel::FullyDisplayed,
            pronouns: Pronouns::ThirdPerson,
            proper_name: false,
            player: false,
            examine: None,
            description: None,
            container: None,
            openable: None,
            takeable: None,
            wearable: None,
            switchable: None,
            furniture: None,
            npc: None,
            topic: None,
            room: None,
            fields: OrdMap::new(),
        }
    }

    pub(crate) fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    /// Stable id.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Unique authoring name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if an [`Openable`] record says it is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.openable.as_ref().is_some_and(|o| o.closed)
    }

    /// Returns true if it is locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.openable
            .as_ref()
            .and_then(|o| o.lock.as_ref())
            .is_some_and(|l| l.locked)
    }

    /// Returns true if it is a transparent container.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.container.as_ref().is_some_and(|c| c.transparent)
    }

    /// Returns true if it is currently worn.
    #[must_use]
    pub fn is_worn(&self) -> bool {
        self.wearable.as_ref().is_some_and(|w| w.worn)
    }

    /// Returns true if it is switched on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.switchable.as_ref().is_some_and(|s| s.on)
    }

    /// Returns true for non-player characters.
    #[must_use]
    pub fn is_npc(&self) -> bool {
        self.npc.is_some()
    }

    /// Returns true for rooms.
    #[must_use]
    pub fn is_room(&self) -> bool {
        self.room.is_some()
    }

    /// Returns true for characters, player or not.
    #[must_use]
    pub fn is_character(&self) -> bool {
        self.player || self.npc.is_some()
    }

    /// Looks up a free-form field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Sets a free-form field.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Reads a property by name for templates: built-in state first
    /// (`alias`, `name`, `closed`, `locked`, `worn`, `on`, `transparent`),
    /// then free-form fields.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<Value> {
        match key {
            "alias" => Some(Value::from(self.alias.as_str())),
            "name" => Some(Value::from(self.name())),
            "closed" if self.openable.is_some() => Some(Value::Bool(self.is_closed())),
            "locked" if self.openable.is_some() => Some(Value::Bool(self.is_locked())),
            "worn" if self.wearable.is_some() => Some(Value::Bool(self.is_worn())),
            "on" | "switchedon" if self.switchable.is_some() => Some(Value::Bool(self.is_on())),
            "transparent" if self.container.is_some() => Some(Value::Bool(self.is_transparent())),
            _ => self.field(key).cloned(),
        }
    }

    /// Every word the player may use for this object, lowercased.
    pub fn words(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.alias.to_lowercase())
            .chain(self.synonyms.iter().map(|s| s.to_lowercase()))
    }
}
