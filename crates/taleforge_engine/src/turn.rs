//! The turn engine.
//!
//! One call to [`TurnEngine::handle`] is one complete turn:
//!
//! ```text
//! Idle ─▶ Resolving ─┬─▶ AwaitingChoice (prompt narrated, next input answers it)
//!                    ├─▶ Idle (parse failure narrated)
//!                    └─▶ Executing (rules, agreement, effect)
//!                            └─▶ Advancing (Success only: clock + turnscripts)
//!                                    └─▶ Idle
//! ```
//!
//! Turns never overlap. The only thing the caller learns about control
//! flow is the returned [`TurnOutcome`].

use std::collections::VecDeque;

use log::{debug, trace};
use taleforge_foundation::{ObjectId, Result};
use taleforge_parser::{
    CommandMatch, MatchResult, PendingMatch, PronounState, Scope, ScopeResolver,
};
use taleforge_storage::{World, WorldObject};
use taleforge_text::english::multiple_prefix;
use taleforge_text::{TextParams, TextProcessor, escape_log};

use crate::command::{CommandDef, CommandRegistry, Effect, ItemRequest};
use crate::config::EngineConfig;
use crate::context::TurnContext;
use crate::delegation::{AgreementRequest, seek_agreement};
use crate::hooks::BehaviourHooks;
use crate::lang;
use crate::narration::Narrator;
use crate::outcome::{ItemOutcome, TurnOutcome};
use crate::rules::{PreconditionResult, RuleContext, check_all};
use crate::stdlib;

/// Where the engine is in the turn cycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TurnState {
    /// Waiting for a command.
    Idle,
    /// Matching input against the registry.
    Resolving,
    /// A disambiguation question is open.
    AwaitingChoice,
    /// Running a command.
    Executing,
    /// Running turnscripts.
    Advancing,
}

/// Drives turns against a world.
pub struct TurnEngine {
    registry: CommandRegistry,
    hooks: BehaviourHooks,
    text: TextProcessor,
    config: EngineConfig,
    pronouns: PronounState,
    pending: Option<PendingMatch>,
    state: TurnState,
    history: VecDeque<World>,
}

impl std::fmt::Debug for TurnEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("commands", &self.registry.len())
            .field("state", &self.state)
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl TurnEngine {
    /// Creates an engine over a registry and hooks.
    #[must_use]
    pub fn new(registry: CommandRegistry, hooks: BehaviourHooks, config: EngineConfig) -> Self {
        let text = TextProcessor::new()
            .with_seed(config.rng_seed)
            .with_style(config.style)
            .with_max_depth(config.max_directive_depth);
        Self {
            registry,
            hooks,
            text,
            config,
            pronouns: PronounState::new(),
            pending: None,
            state: TurnState::Idle,
            history: VecDeque::new(),
        }
    }

    /// Creates an engine with the standard command library.
    ///
    /// # Errors
    ///
    /// Returns an error if the standard library fails to register.
    pub fn standard(hooks: BehaviourHooks, config: EngineConfig) -> Result<Self> {
        Ok(Self::new(stdlib::standard_registry()?, hooks, config))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The command registry.
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for game-specific commands.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// The hook registry.
    #[must_use]
    pub fn hooks(&self) -> &BehaviourHooks {
        &self.hooks
    }

    /// Mutable access to the hook registry.
    pub fn hooks_mut(&mut self) -> &mut BehaviourHooks {
        &mut self.hooks
    }

    /// The text processor.
    #[must_use]
    pub fn text(&self) -> &TextProcessor {
        &self.text
    }

    /// Mutable access to the text processor, for custom directives.
    pub fn text_mut(&mut self) -> &mut TextProcessor {
        &mut self.text
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current pronoun referents.
    #[must_use]
    pub fn pronouns(&self) -> &PronounState {
        &self.pronouns
    }

    /// Where the engine is in the turn cycle.
    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Returns true if the next input answers a disambiguation question.
    #[must_use]
    pub fn awaiting_choice(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of snapshots available to `undo`.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // =========================================================================
    // Turns
    // =========================================================================

    /// Plays one line of input.
    pub fn handle(
        &mut self,
        input: &str,
        world: &mut World,
        sink: &mut dyn Narrator,
    ) -> TurnOutcome {
        self.state = TurnState::Resolving;
        if self.config.echo_commands {
            sink.emit(&format!("> {input}"));
        }
        debug!("turn {}: {}", world.turn(), escape_log(input));

        let result = match self.pending.take() {
            Some(pending) => {
                self.registry
                    .matcher()
                    .disambiguate(input, pending, world, &self.pronouns)
            }
            None => self.registry.matcher().resolve(input, world, &self.pronouns),
        };

        let outcome = match result {
            MatchResult::Failed(err) => {
                debug!("parse failure: {err:?}");
                // Player text can contain braces; keep it out of the directive scanner.
                let message = err.to_string().replace(['{', '}'], "");
                self.narrate(world, sink, &message);
                TurnOutcome::Failed
            }
            MatchResult::Disambiguate(request) => {
                trace!(
                    "asking which '{}' among {} candidates",
                    request.pending.phrase(),
                    request.options.len()
                );
                sink.emit(&request.prompt());
                self.pending = Some(request.pending);
                self.state = TurnState::AwaitingChoice;
                return TurnOutcome::Failed;
            }
            MatchResult::Matched(matched) => self.execute(&matched, world, sink),
        };
        self.state = TurnState::Idle;
        outcome
    }

    /// Runs an already matched command.
    pub fn execute(
        &mut self,
        matched: &CommandMatch,
        world: &mut World,
        sink: &mut dyn Narrator,
    ) -> TurnOutcome {
        let Some(def) = self.registry.get(matched.command).cloned() else {
            return TurnOutcome::Failed;
        };
        self.state = TurnState::Executing;
        debug!(
            "executing `{}` for {}",
            def.name,
            world.name_of(matched.actor)
        );

        let snapshot = world.clone();
        let mut ctx = TurnContext::new(world, &self.hooks, &self.config, &mut self.text, sink);
        let outcome = run_command(&mut ctx, &def, matched);
        let undo = ctx.undo_requested();

        if undo {
            self.state = TurnState::Idle;
            return self.undo(world, sink);
        }

        if outcome.succeeded() {
            self.pronouns.remember(world, matched.objects(0));
            if *world != snapshot {
                self.push_history(snapshot);
            }
        }

        if outcome.advances() {
            self.advance(world, sink);
        }
        debug!("`{}` finished: {outcome:?}", def.name);
        outcome
    }

    fn push_history(&mut self, snapshot: World) {
        if self.config.undo_depth == 0 {
            return;
        }
        if self.history.len() >= self.config.undo_depth {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
    }

    /// Advances the clock and runs every eligible turnscript once, in
    /// registration order.
    fn advance(&mut self, world: &mut World, sink: &mut dyn Narrator) {
        self.state = TurnState::Advancing;
        world.advance_turn();
        let scripts = self.hooks.turnscripts().to_vec();
        let mut ctx = TurnContext::new(world, &self.hooks, &self.config, &mut self.text, sink);
        for script in scripts {
            if (script.check)(&*ctx.world) {
                trace!("turnscript `{}` runs", script.name);
                (script.effect)(&mut ctx);
            }
        }
    }

    /// Restores the world to its state before the last changing turn.
    pub fn undo(&mut self, world: &mut World, sink: &mut dyn Narrator) -> TurnOutcome {
        self.pending = None;
        if let Some(previous) = self.history.pop_back() {
            *world = previous;
            self.pronouns.clear();
            self.narrate(world, sink, lang::UNDONE);
            TurnOutcome::SuccessNoTurnscripts
        } else {
            self.narrate(world, sink, lang::NOTHING_TO_UNDO);
            TurnOutcome::Failed
        }
    }

    /// Expands a template and emits it outside of any command.
    pub fn narrate(&mut self, world: &World, sink: &mut dyn Narrator, template: &str) {
        let text = self
            .text
            .process(template, world, &self.hooks, &TextParams::new());
        if !text.is_empty() {
            sink.emit(&text);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Checks the world's templates and the command failure messages for
    /// unknown directives.
    ///
    /// # Errors
    ///
    /// Returns the first authoring error found.
    pub fn validate(&self, world: &World) -> Result<()> {
        world.validate()?;
        self.text.validate_world(world)?;
        for name in self.registry.names() {
            if let Some(def) = self.registry.by_name(name) {
                self.text.validate(&def.failure)?;
            }
        }
        Ok(())
    }

    /// Names of commands whose first slot accepts `object` right now.
    #[must_use]
    pub fn commands_for(&self, world: &World, object: ObjectId) -> Vec<String> {
        self.registry.commands_for(world, object)
    }

    /// For every object the player can reach, the commands it supports.
    #[must_use]
    pub fn valid_commands(&self, world: &World) -> Vec<(ObjectId, Vec<String>)> {
        ScopeResolver::for_player(world)
            .objects_in(Scope::Reachable)
            .into_iter()
            .map(|id| (id, self.commands_for(world, id)))
            .filter(|(_, commands)| !commands.is_empty())
            .collect()
    }
}

// =============================================================================
// Execution
// =============================================================================

fn run_command(
    ctx: &mut TurnContext<'_>,
    def: &CommandDef,
    matched: &CommandMatch,
) -> TurnOutcome {
    let actor = matched.actor;
    let delegated = actor != ctx.player();
    if delegated && !def.delegable {
        if let Some(character) = ctx.snapshot(actor) {
            ctx.msg(&lang::cannot_delegate(&character));
        }
        return TurnOutcome::Failed;
    }

    match &def.effect {
        Effect::Command(effect) => {
            let Some(actor_obj) = ctx.snapshot(actor) else {
                return TurnOutcome::Failed;
            };
            let target = matched.object(0).and_then(|id| ctx.snapshot(id));
            let verdict = check_rules(ctx, def, &actor_obj, target.as_ref());
            if let PreconditionResult::Fail { message } = verdict {
                trace!("`{}` refused: {}", def.name, escape_log(&message));
                ctx.msg(&message);
                return TurnOutcome::Failed;
            }
            if delegated {
                let mut request = AgreementRequest::new(actor, def.family);
                if let Some(object) = matched.object(0) {
                    request = request.with_object(object);
                }
                if let Some(direction) = matched.direction() {
                    request = request.with_direction(direction);
                }
                if !seek_agreement(ctx, &request) {
                    return TurnOutcome::Failed;
                }
            }
            effect(ctx, matched)
        }
        Effect::PerItem(effect) => {
            let items = matched.objects(0).to_vec();
            let multiple = matched.is_multiple() || items.len() > 1;
            let mut results = Vec::with_capacity(items.len());
            for item in items {
                if let Some(obj) = ctx.get(item) {
                    let prefix = multiple_prefix(obj, multiple);
                    ctx.set_prefix(prefix);
                }
                let request = ItemRequest {
                    actor,
                    item,
                    other: matched.object(1),
                    multiple,
                    matched,
                };
                results.push(run_item(ctx, def, &**effect, &request, delegated));
            }
            ctx.set_prefix(String::new());
            TurnOutcome::aggregate(results)
        }
    }
}

fn run_item(
    ctx: &mut TurnContext<'_>,
    def: &CommandDef,
    effect: &(dyn Fn(&mut TurnContext<'_>, &ItemRequest<'_>) -> ItemOutcome + Send + Sync),
    request: &ItemRequest<'_>,
    delegated: bool,
) -> ItemOutcome {
    let (Some(actor), Some(item)) = (ctx.snapshot(request.actor), ctx.snapshot(request.item))
    else {
        return ItemOutcome::Failed;
    };
    let verdict = check_rules(ctx, def, &actor, Some(&item));
    if let PreconditionResult::Fail { message } = verdict {
        trace!("`{}` refused for {}: {}", def.name, item.name(), escape_log(&message));
        ctx.msg(&message);
        return ItemOutcome::Failed;
    }

    if delegated {
        let agreement =
            AgreementRequest::new(request.actor, def.family).with_object(request.item);
        if !seek_agreement(ctx, &agreement) {
            return ItemOutcome::Failed;
        }
    }

    match effect(ctx, request) {
        ItemOutcome::NotApplicable => {
            let params = TextParams::new()
                .with("actor", request.actor)
                .with("item", request.item);
            ctx.msg_with(&def.failure, &params);
            ItemOutcome::NotApplicable
        }
        outcome => outcome,
    }
}

fn check_rules(
    ctx: &TurnContext<'_>,
    def: &CommandDef,
    actor: &WorldObject,
    item: Option<&WorldObject>,
) -> PreconditionResult {
    check_all(
        &def.rules,
        &RuleContext {
            world: &*ctx.world,
            actor,
            item,
        },
    )
}
