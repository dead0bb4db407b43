//! Integration tests for Layer 1: Storage
//!
//! Tests for the world builder, containment and build-time validation.

mod builder;
mod containment;
