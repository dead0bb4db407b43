//! Text directive processing and English helpers for Taleforge.
//!
//! Narration templates carry `{name:arg:arg}` tokens that are expanded
//! innermost-first before text reaches the player:
//!
//! ```text
//! "The lamp is {if:lamp:on:{b:lit}:dark}."
//!          │
//!          ▼  innermost token first: {b:lit}
//! "The lamp is {if:lamp:on:<b>lit</b>:dark}."
//!          │
//!          ▼
//! "The lamp is <b>lit</b>."
//! ```
//!
//! This crate provides:
//! - [`TextProcessor`] - The expansion loop, directive registry and bug reports
//! - [`Directive`] - Handler type for author-registered directives
//! - [`StyleMode`] - How style directives are rendered (HTML, ANSI or plain)
//! - [`english`] - Articles, list formatting and verb conjugation
//! - [`escape_log`] - Single-line escaping for log records

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod directive;
pub mod english;
pub mod logutil;
pub mod processor;
pub mod style;

pub use directive::{
    Directive, DirectiveContext, DirectiveError, FieldAccessors, NoAccessors, TextParams,
};
pub use logutil::escape_log;
pub use processor::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS, TextProcessor};
pub use style::{Style, StyleMode};
