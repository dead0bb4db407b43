//! Main matcher pipeline.
//!
//! Orchestrates the full flow from raw input to a matched command with bound
//! slots:
//!
//! 1. Tokenize, and peel off an addressee ("kyle, take knife" /
//!    "tell kyle to take knife")
//! 2. Try each registered command's trigger patterns in registration order;
//!    the first structural match wins
//! 3. Bind each object slot independently: "all" expands over the slot's
//!    scope, pronouns read the pronoun state, named phrases filter the
//!    visible objects by alias and prefer those the slot's scope accepts
//! 4. Suspend with a [`DisambiguationRequest`] when a named phrase is
//!    ambiguous; [`CommandMatcher::disambiguate`] resumes it

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};
use taleforge_foundation::{DisplayLevel, Error, ErrorKind, ObjectId, Result};
use taleforge_storage::{Direction, World};
use thiserror::Error;

use crate::noun_phrase::{NounPhrase, NounResolution, NounResolver, Reference, SlotPhrase};
use crate::pronouns::PronounState;
use crate::scope::{Scope, ScopeResolver};
use crate::syntax::{Capture, Pattern, SlotKind};
use crate::tokenizer::{InputToken, InputTokenizer, tokens_to_text};
use crate::vocabulary::Vocabulary;

/// Index of a command in its registry.
pub type CommandId = usize;

/// A custom slot test.
pub type ScopeFn = Arc<dyn Fn(&ScopeResolver<'_>, ObjectId) -> bool + Send + Sync>;

/// Decides whether an object is a legal filler for a slot.
#[derive(Clone)]
pub enum ScopePredicate {
    /// One of the standard scopes.
    Standard(Scope),
    /// A command-specific test.
    Custom(ScopeFn),
}

impl ScopePredicate {
    /// Tests an object from the resolver's actor's point of view.
    #[must_use]
    pub fn test(&self, resolver: &ScopeResolver<'_>, id: ObjectId) -> bool {
        match self {
            Self::Standard(scope) => resolver.in_scope(id, *scope),
            Self::Custom(f) => f(resolver, id),
        }
    }
}

impl fmt::Debug for ScopePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(scope) => write!(f, "Standard({scope:?})"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Scope and arity of one object slot.
#[derive(Clone, Debug)]
pub struct SlotSpec {
    /// Legal fillers.
    pub scope: ScopePredicate,
    /// Accepts "all" and lists.
    pub multiple: bool,
    /// What "all" expands over, when narrower than the legal fillers.
    pub all_scope: Option<ScopePredicate>,
}

impl Default for SlotSpec {
    fn default() -> Self {
        Self::new(Scope::Visible)
    }
}

impl SlotSpec {
    /// A single-object slot with a standard scope.
    #[must_use]
    pub fn new(scope: Scope) -> Self {
        Self {
            scope: ScopePredicate::Standard(scope),
            multiple: false,
            all_scope: None,
        }
    }

    /// A single-object slot with a custom scope.
    #[must_use]
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&ScopeResolver<'_>, ObjectId) -> bool + Send + Sync + 'static,
    {
        Self {
            scope: ScopePredicate::Custom(Arc::new(f)),
            multiple: false,
            all_scope: None,
        }
    }

    /// Allows "all" and lists in this slot.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Allows "all" and lists, with "all" expanding only over objects that
    /// pass `f`. Named objects still match the slot's full scope.
    #[must_use]
    pub fn multiple_from<F>(mut self, f: F) -> Self
    where
        F: Fn(&ScopeResolver<'_>, ObjectId) -> bool + Send + Sync + 'static,
    {
        self.multiple = true;
        self.all_scope = Some(ScopePredicate::Custom(Arc::new(f)));
        self
    }
}

/// One registered command as the matcher sees it.
#[derive(Clone, Debug)]
pub struct SyntaxEntry {
    /// Registry id.
    pub command: CommandId,
    /// Command name.
    pub name: String,
    /// Trigger patterns, tried in order.
    pub patterns: Vec<Pattern>,
    /// Object slot specs, in pattern order.
    pub slots: Vec<SlotSpec>,
}

impl SyntaxEntry {
    fn slot(&self, index: usize) -> SlotSpec {
        self.slots.get(index).cloned().unwrap_or_default()
    }
}

/// A bound slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotBinding {
    /// An object slot.
    Objects {
        /// The bound objects, in the order the player gave them.
        ids: Vec<ObjectId>,
        /// The player used "all" or a list.
        multiple: bool,
    },
    /// A free-text slot.
    Text(String),
    /// A direction slot.
    Direction(Direction),
}

/// A fully resolved command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandMatch {
    /// Registry id.
    pub command: CommandId,
    /// Command name.
    pub name: String,
    /// Who performs it.
    pub actor: ObjectId,
    /// Slot bindings, in pattern order.
    pub slots: Vec<SlotBinding>,
}

impl CommandMatch {
    /// The objects bound to the `n`th object slot.
    #[must_use]
    pub fn objects(&self, n: usize) -> &[ObjectId] {
        self.slots
            .iter()
            .filter_map(|s| match s {
                SlotBinding::Objects { ids, .. } => Some(ids.as_slice()),
                _ => None,
            })
            .nth(n)
            .unwrap_or(&[])
    }

    /// The first object bound to the `n`th object slot.
    #[must_use]
    pub fn object(&self, n: usize) -> Option<ObjectId> {
        self.objects(n).first().copied()
    }

    /// The first free-text binding.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.slots.iter().find_map(|s| match s {
            SlotBinding::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// The first direction binding.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.slots.iter().find_map(|s| match s {
            SlotBinding::Direction(d) => Some(*d),
            _ => None,
        })
    }

    /// Returns true if any object slot came from "all" or a list.
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        self.slots
            .iter()
            .any(|s| matches!(s, SlotBinding::Objects { multiple: true, .. }))
    }
}

/// A player-facing failure to understand input.
///
/// These are narrated to the player, never propagated as [`Error`]s.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was typed.
    #[error("I don't even know where to begin with that.")]
    EmptyInput,
    /// No command pattern matched.
    #[error("I don't even know where to begin with that.")]
    NotUnderstood,
    /// A named phrase matched nothing.
    #[error("Not finding any object '{0}'.")]
    ObjectNotFound(String),
    /// A pronoun with no referent.
    #[error("I'm not sure what '{0}' refers to.")]
    NoReferent(String),
    /// "all" or a list in a single-object slot.
    #[error("You cannot use multiple objects with that command.")]
    NoMultiples,
    /// "all" expanded to nothing.
    #[error("Nothing there to do that with.")]
    Nothing,
}

/// Resumable matcher state while waiting for a disambiguation answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingMatch {
    entry: usize,
    actor: ObjectId,
    captures: Vec<Capture>,
    bound: Vec<SlotBinding>,
    partial: Vec<ObjectId>,
    item: usize,
    candidates: Vec<ObjectId>,
    phrase: String,
}

impl PendingMatch {
    /// The candidates the answer must choose between.
    #[must_use]
    pub fn candidates(&self) -> &[ObjectId] {
        &self.candidates
    }

    /// The ambiguous phrase.
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Who will perform the command.
    #[must_use]
    pub fn actor(&self) -> ObjectId {
        self.actor
    }
}

/// A disambiguation request when multiple objects match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisambiguationRequest {
    /// Question to ask the player
    pub question: String,
    /// Available options (description, object)
    pub options: Vec<(String, ObjectId)>,
    /// State needed to continue matching after disambiguation
    pub pending: PendingMatch,
}

impl DisambiguationRequest {
    /// The question followed by a numbered option list.
    #[must_use]
    pub fn prompt(&self) -> String {
        let mut out = self.question.clone();
        for (i, (label, _)) in self.options.iter().enumerate() {
            out.push_str(&format!("\n{}. {label}", i + 1));
        }
        out
    }
}

/// Result of matching player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchResult {
    /// Resolved to a command with every slot bound.
    Matched(CommandMatch),
    /// A slot is ambiguous; the next input answers the question.
    Disambiguate(DisambiguationRequest),
    /// Not understood.
    Failed(ParseError),
}

/// Message used for every disambiguation question.
pub const DISAMBIGUATION_QUESTION: &str = "Which do you mean?";

/// The command matcher.
#[derive(Clone, Debug, Default)]
pub struct CommandMatcher {
    entries: Vec<SyntaxEntry>,
    vocabulary: Vocabulary,
}

impl CommandMatcher {
    /// Creates an empty matcher with the English vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the vocabulary.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// The vocabulary in use.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Registered entries, in precedence order.
    #[must_use]
    pub fn entries(&self) -> &[SyntaxEntry] {
        &self.entries
    }

    /// Registers a command's trigger patterns.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if a pattern does not compile, and
    /// `DuplicateCommand` if the name is taken.
    pub fn register(
        &mut self,
        command: CommandId,
        name: &str,
        patterns: &[&str],
        slots: Vec<SlotSpec>,
    ) -> Result<()> {
        if self.entries.iter().any(|e| e.name == name) {
            return Err(Error::new(ErrorKind::DuplicateCommand(name.to_string())));
        }
        let mut compiled = Vec::with_capacity(patterns.len());
        for source in patterns {
            let pattern = Pattern::compile(source).map_err(|e| {
                Error::new(ErrorKind::InvalidPattern {
                    command: name.to_string(),
                    pattern: (*source).to_string(),
                    reason: e.to_string(),
                })
            })?;
            compiled.push(pattern);
        }
        self.entries.push(SyntaxEntry {
            command,
            name: name.to_string(),
            patterns: compiled,
            slots,
        });
        Ok(())
    }

    // =========================================================================
    // Matching
    // =========================================================================

    /// Resolves raw input for the player.
    #[must_use]
    pub fn resolve(&self, input: &str, world: &World, pronouns: &PronounState) -> MatchResult {
        let mut tokens = InputTokenizer::tokenize(input);
        tokens.retain(|t| !matches!(t, InputToken::End));
        if tokens.is_empty() {
            return MatchResult::Failed(ParseError::EmptyInput);
        }

        if let Some((npc, rest)) = self.split_addressee(&tokens, world) {
            trace!("input addressed to {}", world.name_of(npc));
            if let Some(result) = self.match_tokens(&rest, npc, world, pronouns) {
                return result;
            }
        }
        self.match_tokens(&tokens, world.player(), world, pronouns)
            .unwrap_or(MatchResult::Failed(ParseError::NotUnderstood))
    }

    /// Recognises "NAME, COMMAND" and "tell|ask|order NAME to COMMAND" where
    /// NAME is exactly one visible character.
    fn split_addressee(
        &self,
        tokens: &[InputToken],
        world: &World,
    ) -> Option<(ObjectId, Vec<InputToken>)> {
        let (name, rest) = if let Some(comma) = tokens.iter().position(|t| *t == InputToken::Joiner)
        {
            (&tokens[..comma], &tokens[comma + 1..])
        } else if matches!(tokens.first().and_then(InputToken::word), Some("tell" | "ask" | "order"))
        {
            let to = tokens.iter().position(|t| t.word() == Some("to"))?;
            (&tokens[1..to], &tokens[to + 1..])
        } else {
            return None;
        };
        if name.is_empty() || rest.is_empty() {
            return None;
        }
        let phrase = NounPhrase::new(
            name.iter()
                .filter_map(InputToken::word)
                .filter(|w| !self.vocabulary.is_ignored(w)),
        );
        let scope = ScopeResolver::for_player(world);
        let npcs: Vec<ObjectId> = scope
            .visible_objects()
            .into_iter()
            .filter(|id| world.get(*id).is_some_and(|o| o.is_npc()))
            .collect();
        match NounResolver::resolve(world, &phrase, &npcs) {
            NounResolution::Unique(npc) => Some((npc, rest.to_vec())),
            _ => None,
        }
    }

    /// Finds the first structurally matching entry and binds its slots.
    fn match_tokens(
        &self,
        tokens: &[InputToken],
        actor: ObjectId,
        world: &World,
        pronouns: &PronounState,
    ) -> Option<MatchResult> {
        for (index, entry) in self.entries.iter().enumerate() {
            for pattern in &entry.patterns {
                let Some(captures) = pattern.matches(tokens) else {
                    continue;
                };
                let fillable = captures.iter().all(|c| match c {
                    Capture::Tokens(SlotKind::Object, toks) => {
                        SlotPhrase::parse(toks, &self.vocabulary).is_some()
                    }
                    _ => true,
                });
                if !fillable {
                    continue;
                }
                debug!("input matched `{}` via \"{pattern}\"", entry.name);
                let pending = PendingMatch {
                    entry: index,
                    actor,
                    captures,
                    bound: Vec::new(),
                    partial: Vec::new(),
                    item: 0,
                    candidates: Vec::new(),
                    phrase: String::new(),
                };
                return Some(self.bind(pending, world, pronouns));
            }
        }
        None
    }

    /// Binds remaining slots, suspending on the first ambiguity.
    fn bind(&self, mut state: PendingMatch, world: &World, pronouns: &PronounState) -> MatchResult {
        let Some(entry) = self.entries.get(state.entry) else {
            return MatchResult::Failed(ParseError::NotUnderstood);
        };
        let actor_scope = ScopeResolver::new(world, state.actor);
        let universe = self.universe(world, state.actor);

        while state.bound.len() < state.captures.len() {
            let index = state.bound.len();
            let binding = match &state.captures[index] {
                Capture::Direction(dir) => SlotBinding::Direction(*dir),
                Capture::Tokens(SlotKind::Text, toks) => SlotBinding::Text(tokens_to_text(toks)),
                Capture::Tokens(_, toks) => {
                    let object_slot = state.captures[..index]
                        .iter()
                        .filter(|c| matches!(c, Capture::Tokens(SlotKind::Object, _)))
                        .count();
                    let spec = entry.slot(object_slot);
                    let Some(phrase) = SlotPhrase::parse(toks, &self.vocabulary) else {
                        return MatchResult::Failed(ParseError::NotUnderstood);
                    };
                    if phrase.is_multiple() && !spec.multiple {
                        return MatchResult::Failed(ParseError::NoMultiples);
                    }
                    match phrase {
                        SlotPhrase::All { except } => {
                            let ids = self.expand_all(&actor_scope, &spec, &except);
                            if ids.is_empty() {
                                return MatchResult::Failed(ParseError::Nothing);
                            }
                            SlotBinding::Objects {
                                ids,
                                multiple: true,
                            }
                        }
                        SlotPhrase::List(references) => {
                            for (item, reference) in
                                references.iter().enumerate().skip(state.item)
                            {
                                match reference {
                                    Reference::Pronoun(word) => {
                                        let ids = pronouns.resolve(*word);
                                        if ids.is_empty() {
                                            return MatchResult::Failed(ParseError::NoReferent(
                                                word.as_str().to_string(),
                                            ));
                                        }
                                        if ids.iter().any(|id| !universe.contains(id)) {
                                            return MatchResult::Failed(
                                                ParseError::ObjectNotFound(
                                                    word.as_str().to_string(),
                                                ),
                                            );
                                        }
                                        if ids.len() > 1 && !spec.multiple {
                                            return MatchResult::Failed(ParseError::NoMultiples);
                                        }
                                        state.partial.extend(ids);
                                    }
                                    Reference::Named(np) => {
                                        let found = NounResolver::matches(world, np, &universe);
                                        let in_scope: Vec<ObjectId> = found
                                            .iter()
                                            .copied()
                                            .filter(|id| spec.scope.test(&actor_scope, *id))
                                            .collect();
                                        let found = if in_scope.is_empty() { found } else { in_scope };
                                        match found.as_slice() {
                                            [] => {
                                                return MatchResult::Failed(
                                                    ParseError::ObjectNotFound(np.text()),
                                                );
                                            }
                                            [one] => state.partial.push(*one),
                                            _ => {
                                                state.item = item;
                                                state.phrase = np.text();
                                                state.candidates = found;
                                                return self.ask(state, world);
                                            }
                                        }
                                    }
                                }
                            }
                            state.item = 0;
                            let ids = std::mem::take(&mut state.partial);
                            SlotBinding::Objects {
                                multiple: references.len() > 1 || ids.len() > 1,
                                ids,
                            }
                        }
                    }
                }
            };
            state.bound.push(binding);
        }

        MatchResult::Matched(CommandMatch {
            command: entry.command,
            name: entry.name.clone(),
            actor: state.actor,
            slots: state.bound,
        })
    }

    fn ask(&self, pending: PendingMatch, world: &World) -> MatchResult {
        trace!(
            "'{}' is ambiguous between {} candidates",
            pending.phrase,
            pending.candidates.len()
        );
        let options = pending
            .candidates
            .iter()
            .map(|id| (NounResolver::describe(world, *id), *id))
            .collect();
        MatchResult::Disambiguate(DisambiguationRequest {
            question: DISAMBIGUATION_QUESTION.to_string(),
            options,
            pending,
        })
    }

    /// Continues matching with the player's answer to a disambiguation
    /// question. The answer is a 1-based option number or text naming one
    /// of the candidates; it is never treated as a fresh command.
    #[must_use]
    pub fn disambiguate(
        &self,
        choice: &str,
        mut pending: PendingMatch,
        world: &World,
        pronouns: &PronounState,
    ) -> MatchResult {
        let choice = choice.trim();
        let chosen = if let Some(n) = choice
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=pending.candidates.len()).contains(n))
        {
            pending.candidates[n - 1]
        } else {
            let phrase = NounPhrase::from_text(choice, &self.vocabulary);
            match NounResolver::resolve(world, &phrase, &pending.candidates) {
                NounResolution::Unique(id) => id,
                NounResolution::Ambiguous(narrowed) => {
                    pending.candidates = narrowed;
                    return self.ask(pending, world);
                }
                NounResolution::NotFound => {
                    return MatchResult::Failed(ParseError::ObjectNotFound(choice.to_string()));
                }
            }
        };
        trace!("disambiguated '{}' to {}", pending.phrase, world.name_of(chosen));
        pending.partial.push(chosen);
        pending.item += 1;
        pending.candidates.clear();
        self.bind(pending, world, pronouns)
    }

    /// Objects a named phrase may refer to: whatever the player or the
    /// actor can see, plus the player and the actor themselves.
    fn universe(&self, world: &World, actor: ObjectId) -> Vec<ObjectId> {
        let player = ScopeResolver::for_player(world);
        let acting = ScopeResolver::new(world, actor);
        world
            .objects()
            .map(taleforge_storage::WorldObject::id)
            .filter(|id| {
                *id == world.player()
                    || *id == actor
                    || player.is_visible(*id)
                    || acting.is_visible(*id)
            })
            .collect()
    }

    /// Expands "all" (minus exclusions) over the slot's "all" scope, or its
    /// full scope when it has none. Characters,
    /// rooms and anything below inventory-listing visibility are never
    /// included.
    fn expand_all(
        &self,
        scope: &ScopeResolver<'_>,
        spec: &SlotSpec,
        except: &[NounPhrase],
    ) -> Vec<ObjectId> {
        let world = scope.world();
        let candidates = spec.all_scope.as_ref().unwrap_or(&spec.scope);
        world
            .objects()
            .filter(|o| {
                o.id() != scope.actor()
                    && !o.is_character()
                    && !o.is_room()
                    && o.display >= DisplayLevel::InventoryExcluded
                    && spec.scope.test(scope, o.id())
                    && candidates.test(scope, o.id())
                    && !except
                        .iter()
                        .any(|p| NounResolver::quality(o, p).is_some())
            })
            .map(taleforge_storage::WorldObject::id)
            .collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Names of commands whose first object slot accepts `object` for the
    /// player right now.
    #[must_use]
    pub fn commands_for(&self, world: &World, object: ObjectId) -> Vec<String> {
        let scope = ScopeResolver::for_player(world);
        self.entries
            .iter()
            .filter(|e| e.patterns.iter().any(|p| p.object_slots() > 0))
            .filter(|e| e.slot(0).scope.test(&scope, object))
            .map(|e| e.name.clone())
            .collect()
    }
}
