//! Integration tests for Layer 3: Engine
//!
//! Tests for turn outcomes and turnscripts, the standard command library,
//! behaviour hooks and delegation to other characters.

mod behaviour;
mod delegation;
mod standard;
mod turns;
