//! Taleforge - Interactive-fiction runtime
//!
//! This crate re-exports all layers of the Taleforge system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: taleforge_runtime    - Sessions, REPL, CLI, demo world
//! Layer 3: taleforge_engine     - Commands, rules, hooks, delegation, turns
//! Layer 2: taleforge_parser     - Scope resolution, command matching
//!          taleforge_text       - Text directives, English helpers
//! Layer 1: taleforge_storage    - World objects, capabilities, world builder
//! Layer 0: taleforge_foundation - Core types (ObjectId, Location, Value, Error)
//! ```

pub use taleforge_engine as engine;
pub use taleforge_foundation as foundation;
pub use taleforge_parser as parser;
pub use taleforge_runtime as runtime;
pub use taleforge_storage as storage;
pub use taleforge_text as text;
