//! Integration tests for Layer 2: Parser
//!
//! Tests for command matching against the standard command library,
//! addressing characters, pronouns and disambiguation.

mod disambiguation;
mod matching;
