//! The per-turn context handed to effects and hooks.
//!
//! A [`TurnContext`] bundles everything a command effect may touch: the
//! world, the hook registry, the engine configuration, the text processor
//! and the narration sink. It lives for one turn.

use log::debug;
use taleforge_foundation::ObjectId;
use taleforge_parser::ScopeResolver;
use taleforge_storage::{World, WorldObject};
use taleforge_text::{TextParams, TextProcessor, escape_log};

use crate::config::EngineConfig;
use crate::hooks::{Action, BehaviourHooks, HookArgs};
use crate::narration::Narrator;
use crate::outcome::ItemOutcome;

/// Everything an effect can reach during one turn.
pub struct TurnContext<'a> {
    /// The world being played.
    pub world: &'a mut World,
    /// Registered behaviour.
    pub hooks: &'a BehaviourHooks,
    /// Engine configuration.
    pub config: &'a EngineConfig,
    text: &'a mut TextProcessor,
    sink: &'a mut dyn Narrator,
    prefix: String,
    undo_requested: bool,
}

impl<'a> TurnContext<'a> {
    /// Creates a context.
    pub fn new(
        world: &'a mut World,
        hooks: &'a BehaviourHooks,
        config: &'a EngineConfig,
        text: &'a mut TextProcessor,
        sink: &'a mut dyn Narrator,
    ) -> Self {
        Self {
            world,
            hooks,
            config,
            text,
            sink,
            prefix: String::new(),
            undo_requested: false,
        }
    }

    // =========================================================================
    // Narration
    // =========================================================================

    /// Expands `template` and emits it.
    pub fn msg(&mut self, template: &str) {
        self.msg_with(template, &TextParams::new());
    }

    /// Expands `template` with named object bindings and emits it.
    ///
    /// While a multi-object command runs, every line is prefixed with the
    /// current item ("Apple: ").
    pub fn msg_with(&mut self, template: &str, params: &TextParams) {
        let expanded = self.text.process(template, &*self.world, self.hooks, params);
        if expanded.is_empty() {
            return;
        }
        let line = format!("{}{expanded}", self.prefix);
        debug!("narrate: {}", escape_log(&line));
        self.sink.emit(&line);
    }

    /// Expands a template without emitting it.
    pub fn expand(&mut self, template: &str) -> String {
        self.text
            .process(template, &*self.world, self.hooks, &TextParams::new())
    }

    pub(crate) fn set_prefix(&mut self, prefix: String) {
        self.prefix = prefix;
    }

    // =========================================================================
    // World access
    // =========================================================================

    /// The player's id.
    #[must_use]
    pub fn player(&self) -> ObjectId {
        self.world.player()
    }

    /// Looks up an object, `None` for stale ids.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        self.world.get(id)
    }

    /// A clone of an object, for building messages while the world is
    /// being changed.
    #[must_use]
    pub fn snapshot(&self, id: ObjectId) -> Option<WorldObject> {
        self.world.get(id).cloned()
    }

    /// Scope predicates for `actor`.
    #[must_use]
    pub fn scope(&self, actor: ObjectId) -> ScopeResolver<'_> {
        ScopeResolver::new(&*self.world, actor)
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    /// Runs the hook for `action` on `args.object`, if one resolves.
    pub fn run_hook(&mut self, action: Action, args: &HookArgs) -> Option<ItemOutcome> {
        let (source, hook) = self.hooks.resolve(&*self.world, args.object, action)?;
        debug!(
            "{action:?} hook on {} from {source:?}",
            self.world.name_of(args.object)
        );
        Some(hook(self, args))
    }

    // =========================================================================
    // Meta
    // =========================================================================

    /// Asks the engine to restore the previous snapshot after this turn.
    pub fn request_undo(&mut self) {
        self.undo_requested = true;
    }

    pub(crate) fn undo_requested(&self) -> bool {
        self.undo_requested
    }
}
