//! Object store, capability records and world building for Taleforge.
//!
//! This crate provides:
//! - [`WorldObject`] - A room, item or character as one record with optional
//!   capability sub-records ([`Container`], [`Openable`], [`Wearable`], ...)
//! - [`World`] - The object store every other layer queries, with cheap
//!   persistent snapshots
//! - [`WorldBuilder`] / [`ObjectDecl`] - By-name world declaration and the
//!   build-time validation that keeps the object graph sound

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod capability;
pub mod exit;
pub mod object;
pub mod world;

pub use builder::{ObjectDecl, WorldBuilder};
pub use capability::{
    Container, Furniture, Lock, Npc, Openable, Room, Switchable, Takeable, Topic, Wearable,
};
pub use exit::{Direction, Exit};
pub use object::WorldObject;
pub use world::World;
