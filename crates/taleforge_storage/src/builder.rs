//! By-name world declaration and build-time validation.
//!
//! Content declares objects by name and refers to other objects (locations,
//! exit destinations, keys, doors) by name. [`WorldBuilder::build`] assigns
//! ids, resolves every reference and rejects any world the engine could not
//! run safely: bad or duplicate names, dangling references, containment
//! cycles and a missing player.

use std::sync::Arc;

use im::{HashMap, Vector};
use taleforge_foundation::{
    DisplayLevel, Error, ErrorContext, ErrorKind, Location, ObjectId, Pronouns, Result, Value,
};

use crate::capability::{
    Container, Furniture, Lock, Npc, Openable, Room, Switchable, Takeable, Topic, Wearable,
};
use crate::exit::{Direction, Exit};
use crate::object::WorldObject;
use crate::world::World;

#[derive(Clone, Debug)]
enum PlaceDecl {
    Nowhere,
    Ubiquitous,
    Named(String),
}

#[derive(Clone, Debug)]
struct ExitDecl {
    direction: Direction,
    destination: String,
    door: Option<String>,
}

/// Declaration of one world object, composed from capabilities.
///
/// ```
/// use taleforge_storage::ObjectDecl;
///
/// let cabinet = ObjectDecl::item("glass_cabinet")
///     .at("lounge")
///     .container(true)
///     .openable(true)
///     .locked_with("small_key");
/// assert_eq!(cabinet.name(), "glass_cabinet");
/// ```
#[derive(Clone, Debug)]
pub struct ObjectDecl {
    object: WorldObject,
    place: PlaceDecl,
    exits: Vec<ExitDecl>,
    key: Option<String>,
    reveals: Vec<String>,
}

impl ObjectDecl {
    /// Declares a plain object with no capabilities.
    #[must_use]
    pub fn item(name: &str) -> Self {
        Self {
            object: WorldObject::new(ObjectId::new(0), name),
            place: PlaceDecl::Nowhere,
            exits: Vec::new(),
            key: None,
            reveals: Vec::new(),
        }
    }

    /// Declares a room.
    #[must_use]
    pub fn room(name: &str) -> Self {
        let mut decl = Self::item(name);
        decl.object.room = Some(Room::default());
        decl
    }

    /// Declares the player character.
    #[must_use]
    pub fn player(name: &str) -> Self {
        let mut decl = Self::item(name);
        decl.object.player = true;
        decl.object.proper_name = true;
        decl.object.pronouns = Pronouns::SecondPerson;
        decl.object.synonyms = vec!["me".into(), "myself".into(), "self".into()];
        decl
    }

    /// Declares a non-player character.
    #[must_use]
    pub fn npc(name: &str, pronouns: Pronouns) -> Self {
        let mut decl = Self::item(name);
        decl.object.npc = Some(Npc::default());
        decl.object.proper_name = true;
        decl.object.pronouns = pronouns;
        decl
    }

    /// Declares a conversation topic held by a character.
    #[must_use]
    pub fn topic(name: &str, character: &str, shown: bool) -> Self {
        let mut decl = Self::item(name).at(character);
        decl.object.topic = Some(Topic {
            shown,
            reveals: Vec::new(),
        });
        decl.object.display = DisplayLevel::Hidden;
        decl
    }

    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.object.name()
    }

    /// Places the object inside the named object.
    #[must_use]
    pub fn at(mut self, location: &str) -> Self {
        self.place = PlaceDecl::Named(location.to_string());
        self
    }

    /// Makes the object present everywhere.
    #[must_use]
    pub fn ubiquitous(mut self) -> Self {
        self.place = PlaceDecl::Ubiquitous;
        self
    }

    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: &str) -> Self {
        self.object.alias = alias.to_string();
        self
    }

    /// Adds synonyms.
    #[must_use]
    pub fn synonyms(mut self, words: &[&str]) -> Self {
        self.object
            .synonyms
            .extend(words.iter().map(|w| (*w).to_string()));
        self
    }

    /// Sets the display level.
    #[must_use]
    pub fn display(mut self, display: DisplayLevel) -> Self {
        self.object.display = display;
        self
    }

    /// Marks the object as scenery.
    #[must_use]
    pub fn scenery(self) -> Self {
        self.display(DisplayLevel::Scenery)
    }

    /// Sets the pronoun set.
    #[must_use]
    pub fn pronouns(mut self, pronouns: Pronouns) -> Self {
        self.object.pronouns = pronouns;
        self
    }

    /// Marks the alias as a proper name (no article).
    #[must_use]
    pub fn proper_name(mut self) -> Self {
        self.object.proper_name = true;
        self
    }

    /// Sets the examine template.
    #[must_use]
    pub fn examine(mut self, text: &str) -> Self {
        self.object.examine = Some(text.to_string());
        self
    }

    /// Sets the room description template.
    #[must_use]
    pub fn description(mut self, text: &str) -> Self {
        self.object.description = Some(text.to_string());
        self
    }

    /// Adds the takeable capability.
    #[must_use]
    pub fn takeable(mut self) -> Self {
        self.object.takeable = Some(Takeable);
        self
    }

    /// Adds the wearable capability (implies takeable).
    #[must_use]
    pub fn wearable(mut self) -> Self {
        self.object.takeable = Some(Takeable);
        self.object.wearable = Some(Wearable::default());
        self
    }

    /// Adds the wearable capability, already worn by whoever holds it.
    #[must_use]
    pub fn worn(mut self) -> Self {
        self.object.takeable = Some(Takeable);
        self.object.wearable = Some(Wearable { worn: true });
        self
    }

    /// Adds the switchable capability.
    #[must_use]
    pub fn switchable(mut self, on: bool) -> Self {
        self.object.switchable = Some(Switchable { on });
        self
    }

    /// Adds the container capability.
    #[must_use]
    pub fn container(mut self, transparent: bool) -> Self {
        self.object.container = Some(Container { transparent });
        self
    }

    /// Adds the openable capability.
    #[must_use]
    pub fn openable(mut self, closed: bool) -> Self {
        let lock = self.object.openable.take().and_then(|o| o.lock);
        self.object.openable = Some(Openable { closed, lock });
        self
    }

    /// Locks the object with the named key. Implies openable and closed.
    #[must_use]
    pub fn locked_with(mut self, key: &str) -> Self {
        if self.object.openable.is_none() {
            self.object.openable = Some(Openable::default());
        }
        if let Some(openable) = self.object.openable.as_mut() {
            openable.closed = true;
        }
        self.key = Some(key.to_string());
        self
    }

    /// Adds the furniture capability.
    #[must_use]
    pub fn furniture(mut self) -> Self {
        self.object.furniture = Some(Furniture);
        self
    }

    /// Names a topic revealed when this topic is used.
    #[must_use]
    pub fn reveals(mut self, topic: &str) -> Self {
        self.reveals.push(topic.to_string());
        self
    }

    /// Adds an exit to a room.
    #[must_use]
    pub fn exit(mut self, direction: Direction, destination: &str) -> Self {
        self.exits.push(ExitDecl {
            direction,
            destination: destination.to_string(),
            door: None,
        });
        self
    }

    /// Adds an exit guarded by a door object.
    #[must_use]
    pub fn exit_through(mut self, direction: Direction, destination: &str, door: &str) -> Self {
        self.exits.push(ExitDecl {
            direction,
            destination: destination.to_string(),
            door: Some(door.to_string()),
        });
        self
    }

    /// Sets a free-form field.
    #[must_use]
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.object.set_field(key, value);
        self
    }
}

/// Collects declarations and builds a validated [`World`].
#[derive(Clone, Debug, Default)]
pub struct WorldBuilder {
    decls: Vec<ObjectDecl>,
}

impl WorldBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one declaration.
    #[must_use]
    pub fn object(mut self, decl: ObjectDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Adds one declaration in place.
    pub fn push(&mut self, decl: ObjectDecl) {
        self.decls.push(decl);
    }

    /// Number of declarations so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns true if nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Resolves names and builds the world.
    ///
    /// # Errors
    ///
    /// Returns an authoring error for a disallowed or duplicate name, an
    /// unknown location, exit destination, door, key or topic, a containment
    /// cycle, or a missing player.
    pub fn build(self) -> Result<World> {
        let mut names: HashMap<Arc<str>, ObjectId> = HashMap::new();
        for (index, decl) in self.decls.iter().enumerate() {
            let name = decl.name();
            validate_name(name)?;
            let id = ObjectId::new(u32::try_from(index).map_err(|_| {
                Error::new(ErrorKind::Internal("too many objects".to_string()))
            })?);
            if names.insert(Arc::from(name), id).is_some() {
                return Err(Error::duplicate_name(name));
            }
        }

        let resolve = |name: &str| -> Result<ObjectId> {
            names
                .get(name)
                .copied()
                .ok_or_else(|| Error::unknown_object(name))
        };

        let mut objects = Vector::new();
        let mut player = None;
        for decl in self.decls {
            let ObjectDecl {
                mut object,
                place,
                exits,
                key,
                reveals,
            } = decl;
            let frame_name = format!("object `{}`", object.name());
            let frame = || ErrorContext::new().with_frame(frame_name.clone());
            let id = resolve(object.name())?;
            object.set_id(id);

            object.location = match place {
                PlaceDecl::Nowhere => Location::Nowhere,
                PlaceDecl::Ubiquitous => Location::Ubiquitous,
                PlaceDecl::Named(location) => {
                    let parent = names.get(location.as_str()).copied().ok_or_else(|| {
                        Error::new(ErrorKind::UnknownLocation {
                            object: object.name().to_string(),
                            location: location.clone(),
                        })
                    })?;
                    Location::In(parent)
                }
            };

            for exit in exits {
                let destination = names
                    .get(exit.destination.as_str())
                    .copied()
                    .ok_or_else(|| {
                        Error::new(ErrorKind::UnknownExit {
                            room: object.name().to_string(),
                            direction: exit.direction.to_string(),
                            destination: exit.destination.clone(),
                        })
                    })?;
                let mut built = Exit::new(exit.direction, destination);
                if let Some(door) = exit.door {
                    built = built.through(resolve(&door).map_err(|e| e.with_context(frame()))?);
                }
                object.room.get_or_insert_with(Room::default).exits.push(built);
            }

            if let Some(key) = key {
                let key = resolve(&key).map_err(|e| e.with_context(frame()))?;
                if let Some(openable) = object.openable.as_mut() {
                    openable.lock = Some(Lock { locked: true, key });
                }
            }

            if !reveals.is_empty() {
                let mut ids = Vec::with_capacity(reveals.len());
                for topic in &reveals {
                    ids.push(resolve(topic).map_err(|e| e.with_context(frame()))?);
                }
                if let Some(topic) = object.topic.as_mut() {
                    topic.reveals = ids;
                }
            }

            if object.player && player.is_none() {
                player = Some(id);
            } else {
                object.player = false;
            }
            objects.push_back(object);
        }

        let player = player.ok_or_else(|| Error::new(ErrorKind::MissingPlayer))?;
        let world = World::from_parts(objects, names, player);
        world.validate()?;
        Ok(world)
    }
}

/// Checks that a name is non-empty and uses only ASCII letters, digits and
/// underscores.
///
/// # Errors
///
/// Returns `DisallowedName` otherwise.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Error::disallowed_name(name));
    }
    Ok(())
}
