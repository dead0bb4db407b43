//! Integration tests for Layer 4: Runtime
//!
//! The demo game played end to end through a session and the REPL.

mod repl;
mod walkthrough;
