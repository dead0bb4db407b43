//! Behaviour hooks.
//!
//! Per-object behaviour ("the coin will not budge", "the torch dies after
//! a few turns") lives in an explicit registry keyed by object id, not on
//! the objects themselves. An action hook is resolved through a fixed
//! fallback chain:
//!
//! ```text
//! instance hook (this object)
//!     └─▶ capability default (first capability the object has)
//!             └─▶ generic default (any object)
//!                     └─▶ none: the command's built-in behaviour
//! ```
//!
//! The registry also holds agreement hooks (see [`crate::delegation`]),
//! zero-argument accessors for `{show:}`/`{if:}` and turnscripts.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use taleforge_foundation::{ObjectId, Value};
use taleforge_storage::{World, WorldObject};
use taleforge_text::FieldAccessors;

use crate::context::TurnContext;
use crate::delegation::{ActionFamily, AgreementHook, AgreementRequest};
use crate::outcome::ItemOutcome;

/// Actions an object can customise.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Action {
    /// Being examined.
    Examine,
    /// Being taken.
    Take,
    /// Being dropped.
    Drop,
    /// Being put on.
    Wear,
    /// Being taken off.
    Remove,
    /// Being opened.
    Open,
    /// Being closed.
    Close,
    /// Being pushed, pressed or moved.
    Push,
    /// Permission check before switching on; `Failed` blocks it.
    CanSwitchOn,
    /// Being switched on.
    SwitchOn,
    /// Being switched off.
    SwitchOff,
    /// Being sat on.
    SitOn,
    /// Being talked to.
    Talk,
    /// A character receiving an item (`HookArgs::other`).
    Give,
    /// A topic being raised.
    Topic,
    /// Being charged by a device.
    Charge,
}

/// A capability record an object may carry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Capability {
    /// [`taleforge_storage::Container`]
    Container,
    /// [`taleforge_storage::Openable`]
    Openable,
    /// [`taleforge_storage::Takeable`]
    Takeable,
    /// [`taleforge_storage::Wearable`]
    Wearable,
    /// [`taleforge_storage::Switchable`]
    Switchable,
    /// [`taleforge_storage::Furniture`]
    Furniture,
    /// [`taleforge_storage::Npc`]
    Npc,
    /// [`taleforge_storage::Topic`]
    Topic,
    /// [`taleforge_storage::Room`]
    Room,
}

impl Capability {
    /// Every capability, in the order defaults are looked up.
    pub const ALL: [Capability; 9] = [
        Capability::Npc,
        Capability::Topic,
        Capability::Room,
        Capability::Switchable,
        Capability::Wearable,
        Capability::Openable,
        Capability::Container,
        Capability::Furniture,
        Capability::Takeable,
    ];

    /// Returns true if `object` carries this capability.
    #[must_use]
    pub fn present(self, object: &WorldObject) -> bool {
        match self {
            Self::Container => object.container.is_some(),
            Self::Openable => object.openable.is_some(),
            Self::Takeable => object.takeable.is_some(),
            Self::Wearable => object.wearable.is_some(),
            Self::Switchable => object.switchable.is_some(),
            Self::Furniture => object.furniture.is_some(),
            Self::Npc => object.npc.is_some(),
            Self::Topic => object.topic.is_some(),
            Self::Room => object.room.is_some(),
        }
    }
}

/// Arguments passed to an action hook.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HookArgs {
    /// The object the hook belongs to.
    pub object: ObjectId,
    /// Who is acting.
    pub actor: ObjectId,
    /// A second object: the item given, the device doing the charging.
    pub other: Option<ObjectId>,
    /// The command was applied to several objects.
    pub multiple: bool,
}

impl HookArgs {
    /// Arguments for `actor` acting on `object`.
    #[must_use]
    pub fn new(object: ObjectId, actor: ObjectId) -> Self {
        Self {
            object,
            actor,
            other: None,
            multiple: false,
        }
    }

    /// Sets the second object.
    #[must_use]
    pub fn with_other(mut self, other: ObjectId) -> Self {
        self.other = Some(other);
        self
    }

    /// Marks the command as multi-object.
    #[must_use]
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }
}

/// An action hook.
pub type ActionHook = Arc<dyn Fn(&mut TurnContext<'_>, &HookArgs) -> ItemOutcome + Send + Sync>;

/// A computed field read by `{show:}` and `{if:}`.
pub type Accessor = Arc<dyn Fn(&World, ObjectId) -> Value + Send + Sync>;

/// Where a resolved action hook came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HookSource {
    /// Registered for this object.
    Instance,
    /// Registered for a capability the object carries.
    Capability(Capability),
    /// Registered for every object.
    Generic,
}

/// A recurring check-and-effect run once per advancing turn.
#[derive(Clone)]
pub struct Turnscript {
    /// Name for logs.
    pub name: String,
    /// Runs the effect only when this holds.
    pub check: Arc<dyn Fn(&World) -> bool + Send + Sync>,
    /// The effect.
    pub effect: Arc<dyn Fn(&mut TurnContext<'_>) + Send + Sync>,
}

impl fmt::Debug for Turnscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Turnscript")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The behaviour hook registry.
#[derive(Clone, Default)]
pub struct BehaviourHooks {
    instance: HashMap<(ObjectId, Action), ActionHook>,
    capability: HashMap<(Capability, Action), ActionHook>,
    generic: HashMap<Action, ActionHook>,
    specific_agreement: HashMap<(ObjectId, ActionFamily), AgreementHook>,
    generic_agreement: HashMap<ObjectId, AgreementHook>,
    capability_agreement: HashMap<ActionFamily, AgreementHook>,
    accessors: HashMap<(ObjectId, String), Accessor>,
    turnscripts: Vec<Turnscript>,
}

impl fmt::Debug for BehaviourHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviourHooks")
            .field("instance", &self.instance.len())
            .field("capability", &self.capability.len())
            .field("generic", &self.generic.len())
            .field("accessors", &self.accessors.len())
            .field("turnscripts", &self.turnscripts)
            .finish_non_exhaustive()
    }
}

impl BehaviourHooks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Action hooks
    // =========================================================================

    /// Registers a hook for one object.
    pub fn on<F>(&mut self, object: ObjectId, action: Action, hook: F)
    where
        F: Fn(&mut TurnContext<'_>, &HookArgs) -> ItemOutcome + Send + Sync + 'static,
    {
        self.instance.insert((object, action), Arc::new(hook));
    }

    /// Registers a default for every object with a capability.
    pub fn on_capability<F>(&mut self, capability: Capability, action: Action, hook: F)
    where
        F: Fn(&mut TurnContext<'_>, &HookArgs) -> ItemOutcome + Send + Sync + 'static,
    {
        self.capability.insert((capability, action), Arc::new(hook));
    }

    /// Registers a default for every object.
    pub fn on_any<F>(&mut self, action: Action, hook: F)
    where
        F: Fn(&mut TurnContext<'_>, &HookArgs) -> ItemOutcome + Send + Sync + 'static,
    {
        self.generic.insert(action, Arc::new(hook));
    }

    /// Resolves the hook for `action` on `object` through the fallback chain.
    #[must_use]
    pub fn resolve(
        &self,
        world: &World,
        object: ObjectId,
        action: Action,
    ) -> Option<(HookSource, ActionHook)> {
        if let Some(hook) = self.instance.get(&(object, action)) {
            return Some((HookSource::Instance, Arc::clone(hook)));
        }
        if let Some(obj) = world.get(object) {
            for capability in Capability::ALL {
                if !capability.present(obj) {
                    continue;
                }
                if let Some(hook) = self.capability.get(&(capability, action)) {
                    return Some((HookSource::Capability(capability), Arc::clone(hook)));
                }
            }
        }
        self.generic
            .get(&action)
            .map(|hook| (HookSource::Generic, Arc::clone(hook)))
    }

    /// Returns true if an instance hook exists.
    #[must_use]
    pub fn has_instance(&self, object: ObjectId, action: Action) -> bool {
        self.instance.contains_key(&(object, action))
    }

    // =========================================================================
    // Agreement hooks
    // =========================================================================

    /// Registers a character's agreement hook for one action family.
    pub fn on_agreement<F>(&mut self, character: ObjectId, family: ActionFamily, hook: F)
    where
        F: Fn(&mut TurnContext<'_>, &AgreementRequest) -> bool + Send + Sync + 'static,
    {
        self.specific_agreement
            .insert((character, family), Arc::new(hook));
    }

    /// Registers a character's agreement hook for every other family.
    pub fn on_any_agreement<F>(&mut self, character: ObjectId, hook: F)
    where
        F: Fn(&mut TurnContext<'_>, &AgreementRequest) -> bool + Send + Sync + 'static,
    {
        self.generic_agreement.insert(character, Arc::new(hook));
    }

    /// Registers the default agreement of every character for a family.
    pub fn on_npc_agreement<F>(&mut self, family: ActionFamily, hook: F)
    where
        F: Fn(&mut TurnContext<'_>, &AgreementRequest) -> bool + Send + Sync + 'static,
    {
        self.capability_agreement.insert(family, Arc::new(hook));
    }

    pub(crate) fn specific_agreement(
        &self,
        character: ObjectId,
        family: ActionFamily,
    ) -> Option<AgreementHook> {
        self.specific_agreement.get(&(character, family)).cloned()
    }

    pub(crate) fn generic_agreement(&self, character: ObjectId) -> Option<AgreementHook> {
        self.generic_agreement.get(&character).cloned()
    }

    pub(crate) fn capability_agreement(&self, family: ActionFamily) -> Option<AgreementHook> {
        self.capability_agreement.get(&family).cloned()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Registers a computed field on one object.
    pub fn accessor<F>(&mut self, object: ObjectId, name: impl Into<String>, accessor: F)
    where
        F: Fn(&World, ObjectId) -> Value + Send + Sync + 'static,
    {
        self.accessors.insert((object, name.into()), Arc::new(accessor));
    }

    // =========================================================================
    // Turnscripts
    // =========================================================================

    /// Registers a turnscript. Turnscripts run in registration order.
    pub fn turnscript<C, E>(&mut self, name: impl Into<String>, check: C, effect: E)
    where
        C: Fn(&World) -> bool + Send + Sync + 'static,
        E: Fn(&mut TurnContext<'_>) + Send + Sync + 'static,
    {
        self.turnscripts.push(Turnscript {
            name: name.into(),
            check: Arc::new(check),
            effect: Arc::new(effect),
        });
    }

    /// Registered turnscripts, in order.
    #[must_use]
    pub fn turnscripts(&self) -> &[Turnscript] {
        &self.turnscripts
    }
}

impl FieldAccessors for BehaviourHooks {
    fn call(&self, world: &World, object: ObjectId, name: &str) -> Option<Value> {
        self.accessors
            .get(&(object, name.to_string()))
            .map(|accessor| accessor(world, object))
    }
}
