//! Game sessions, the REPL, and the bundled demo world for Taleforge.
//!
//! This crate provides:
//! - [`Session`] - One game in progress: world, engine and narration
//! - [`Repl`] - Interactive play loop with meta commands
//! - [`demo`] - A small house to explore
//! - The `taleforge` CLI binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod demo;
pub mod editor;
pub mod repl;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor, ScriptEditor};
pub use repl::{Repl, Reply};
pub use session::{Session, Turn};
