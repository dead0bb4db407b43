//! Core identifiers, display levels, values and errors for Taleforge.
//!
//! This crate provides:
//! - [`ObjectId`] - Stable arena index of a world object
//! - [`Location`] - Where an object is: inside another object, nowhere yet, or everywhere
//! - [`DisplayLevel`] - Ordered visibility/existence state of an object
//! - [`Value`] - Free-form per-object field values
//! - [`Pronouns`] - Grammatical pronoun sets used by narration
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod display;
pub mod error;
pub mod id;
pub mod pronoun;
pub mod value;

pub use display::DisplayLevel;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::{Location, ObjectId};
pub use pronoun::Pronouns;
pub use value::Value;
