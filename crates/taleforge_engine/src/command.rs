//! Command definitions and the command registry.
//!
//! A command couples trigger patterns and slot scopes (handed to the
//! matcher) with precondition rules and an effect. Effects come in two
//! shapes: a whole-command effect that sees the full match, or a per-item
//! effect the engine runs once for every object in the first slot.
//!
//! ```text
//! CommandDef::per_item("Take", take)
//!     .pattern("take|get|pick_up <obj>")
//!     .slot(SlotSpec::new(Scope::Visible).multiple())
//!     .rule(Rule::reachable())
//!     .family(ActionFamily::Take)
//! ```

use std::fmt;
use std::sync::Arc;

use taleforge_foundation::{ObjectId, Result};
use taleforge_parser::{CommandId, CommandMatch, CommandMatcher, SlotSpec};
use taleforge_storage::World;

use crate::context::TurnContext;
use crate::delegation::ActionFamily;
use crate::lang;
use crate::outcome::{ItemOutcome, TurnOutcome};
use crate::rules::Rule;

/// One item of a per-item command.
#[derive(Clone, Copy, Debug)]
pub struct ItemRequest<'m> {
    /// Who is acting.
    pub actor: ObjectId,
    /// The item from the first slot.
    pub item: ObjectId,
    /// The first object of the second slot, if the command has one.
    pub other: Option<ObjectId>,
    /// The slot held several items.
    pub multiple: bool,
    /// The full match.
    pub matched: &'m CommandMatch,
}

/// A whole-command effect.
pub type CommandEffect =
    Arc<dyn Fn(&mut TurnContext<'_>, &CommandMatch) -> TurnOutcome + Send + Sync>;

/// A per-item effect.
pub type ItemEffect =
    Arc<dyn Fn(&mut TurnContext<'_>, &ItemRequest<'_>) -> ItemOutcome + Send + Sync>;

/// What a command does once matched.
#[derive(Clone)]
pub enum Effect {
    /// Runs once with the whole match.
    Command(CommandEffect),
    /// Runs once per first-slot object, after the rules pass.
    PerItem(ItemEffect),
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(_) => f.write_str("Command(..)"),
            Self::PerItem(_) => f.write_str("PerItem(..)"),
        }
    }
}

/// A command definition.
#[derive(Clone, Debug)]
pub struct CommandDef {
    /// Unique name.
    pub name: String,
    /// Trigger patterns, tried in order.
    pub patterns: Vec<String>,
    /// Object slot specs, in pattern order.
    pub slots: Vec<SlotSpec>,
    /// Preconditions checked per item.
    pub rules: Vec<Rule>,
    /// The effect.
    pub effect: Effect,
    /// Family used when asking a character to agree.
    pub family: ActionFamily,
    /// Narrated when an item's effect does not apply.
    pub failure: String,
    /// Characters other than the player may be told to do this.
    pub delegable: bool,
}

impl CommandDef {
    fn with_effect(name: &str, effect: Effect) -> Self {
        Self {
            name: name.to_string(),
            patterns: Vec::new(),
            slots: Vec::new(),
            rules: Vec::new(),
            effect,
            family: ActionFamily::Generic,
            failure: lang::NO_ATTRIBUTE.to_string(),
            delegable: true,
        }
    }

    /// A command with a whole-command effect.
    pub fn command<F>(name: &str, effect: F) -> Self
    where
        F: Fn(&mut TurnContext<'_>, &CommandMatch) -> TurnOutcome + Send + Sync + 'static,
    {
        Self::with_effect(name, Effect::Command(Arc::new(effect)))
    }

    /// A command with a per-item effect.
    pub fn per_item<F>(name: &str, effect: F) -> Self
    where
        F: Fn(&mut TurnContext<'_>, &ItemRequest<'_>) -> ItemOutcome + Send + Sync + 'static,
    {
        Self::with_effect(name, Effect::PerItem(Arc::new(effect)))
    }

    /// Adds a trigger pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.patterns.push(pattern.to_string());
        self
    }

    /// Adds an object slot spec.
    #[must_use]
    pub fn slot(mut self, spec: SlotSpec) -> Self {
        self.slots.push(spec);
        self
    }

    /// Adds a precondition rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the agreement family.
    #[must_use]
    pub fn family(mut self, family: ActionFamily) -> Self {
        self.family = family;
        self
    }

    /// Sets the default failure message.
    #[must_use]
    pub fn failure(mut self, message: &str) -> Self {
        self.failure = message.to_string();
        self
    }

    /// Only the player may issue this command.
    #[must_use]
    pub fn not_delegable(mut self) -> Self {
        self.delegable = false;
        self
    }
}

/// Registered commands plus the matcher built from their patterns.
#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    matcher: CommandMatcher,
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command. Earlier registrations take precedence when
    /// patterns overlap.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCommand` or `InvalidPattern` from the matcher.
    pub fn register(&mut self, def: CommandDef) -> Result<CommandId> {
        let id = self.commands.len();
        let patterns: Vec<&str> = def.patterns.iter().map(String::as_str).collect();
        self.matcher
            .register(id, &def.name, &patterns, def.slots.clone())?;
        self.commands.push(def);
        Ok(id)
    }

    /// Looks up a command by id.
    #[must_use]
    pub fn get(&self, id: CommandId) -> Option<&CommandDef> {
        self.commands.get(id)
    }

    /// Looks up a command by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command names in precedence order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.name.as_str())
    }

    /// The matcher.
    #[must_use]
    pub fn matcher(&self) -> &CommandMatcher {
        &self.matcher
    }

    /// Names of commands whose first slot accepts `object` right now.
    #[must_use]
    pub fn commands_for(&self, world: &World, object: ObjectId) -> Vec<String> {
        self.matcher.commands_for(world, object)
    }
}
