//! Scope resolution and command matching for Taleforge.
//!
//! This crate turns player input like "take knife" or "put all but the coin
//! in the box" into a matched command with bound object slots.
//!
//! # Architecture
//!
//! ```text
//! "kyle, put apple and knife in box"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → [kyle , put apple and knife in box]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ADDRESSEE       │  → actor = kyle, rest = [put apple and knife in box]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ TRIGGER         │  → PutIn: "put <obj> in <obj>" (first match wins)
//! │ PATTERNS        │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SLOT            │  → [apple, knife], box (or DISAMBIGUATE)
//! │ BINDING         │
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`scope`] - Held/worn/here/reachable/visible predicates
//! - [`tokenizer`] - Convert raw input to token stream
//! - [`vocabulary`] - Filler, joiner, "all" and pronoun words
//! - [`noun_phrase`] - Slot phrase splitting and alias matching
//! - [`pronouns`] - Pronoun tracking state
//! - [`syntax`] - Trigger pattern compilation and matching
//! - [`parser`] - The command matcher and disambiguation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod noun_phrase;
pub mod parser;
pub mod pronouns;
pub mod scope;
pub mod syntax;
pub mod tokenizer;
pub mod vocabulary;

pub use noun_phrase::{NounPhrase, NounResolution, NounResolver, SlotPhrase};
pub use parser::{
    CommandId, CommandMatch, CommandMatcher, DisambiguationRequest, MatchResult, ParseError,
    PendingMatch, ScopePredicate, SlotBinding, SlotSpec,
};
pub use pronouns::PronounState;
pub use scope::{Scope, ScopeReport, ScopeResolver};
pub use syntax::Pattern;
pub use vocabulary::Vocabulary;
