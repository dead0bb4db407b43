//! Integration tests for Layer 2: Text
//!
//! Tests for directive expansion against a built world, styling modes,
//! `once:` memory and build-time validation.

mod directives;
mod properties;
