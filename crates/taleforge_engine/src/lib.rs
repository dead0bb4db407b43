//! Commands, rules, behaviour hooks and the turn engine for Taleforge.
//!
//! The engine takes one line of input through a full turn: match it against
//! the registered commands, check each item's preconditions, ask a
//! delegated character for agreement, run the effect (letting object
//! behaviour hooks take over), then advance the clock and run turnscripts.
//!
//! # Architecture
//!
//! ```text
//! "kyle, take all"
//!        │
//!        ▼
//! ┌──────────────┐   Disambiguate ──► prompt, wait for the answer
//! │   MATCHER    │
//! └──────────────┘
//!        │ CommandMatch
//!        ▼
//! ┌──────────────┐   rules ─► agreement ─► hook or default (per item, or once)
//! │   EFFECTS    │   "Apple: Kyle takes the apple."
//! └──────────────┘
//!        │ TurnOutcome
//!        ▼
//! ┌──────────────┐
//! │   ADVANCE    │   turn counter, turnscripts, undo snapshot
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`command`] - Command definitions and the registry
//! - [`config`] - Engine configuration
//! - [`context`] - The mutable state handed to effects and hooks
//! - [`delegation`] - Asking characters to act
//! - [`hooks`] - Per-object behaviour hooks, accessors and turnscripts
//! - [`lang`] - English narration for the standard commands
//! - [`narration`] - Where narration goes
//! - [`outcome`] - Turn and item outcomes
//! - [`rules`] - Precondition rules
//! - [`stdlib`] - The standard command library
//! - [`turn`] - The turn engine

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod config;
pub mod context;
pub mod delegation;
pub mod hooks;
pub mod lang;
pub mod narration;
pub mod outcome;
pub mod rules;
pub mod stdlib;
pub mod turn;

pub use command::{CommandDef, CommandEffect, CommandRegistry, Effect, ItemEffect, ItemRequest};
pub use config::EngineConfig;
pub use context::TurnContext;
pub use delegation::{
    ActionFamily, AgreementHook, AgreementRequest, AgreementSource, seek_agreement,
};
pub use hooks::{
    Accessor, Action, ActionHook, BehaviourHooks, Capability, HookArgs, HookSource, Turnscript,
};
pub use narration::{NarrationBuffer, Narrator};
pub use outcome::{ItemOutcome, TurnOutcome};
pub use rules::{PreconditionResult, Rule, RuleCheck, RuleContext, check_all};
pub use stdlib::{describe_room, standard_registry};
pub use turn::{TurnEngine, TurnState};
