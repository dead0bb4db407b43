//! Game session state.
//!
//! A session owns one world, the turn engine that plays it and the buffer
//! narration collects in. It is created once per game and passed to
//! whatever drives it (the REPL, a batch script, a test).

use log::info;
use taleforge_engine::{EngineConfig, NarrationBuffer, TurnEngine, TurnOutcome};
use taleforge_foundation::{Error, ErrorKind, Result};
use taleforge_parser::ScopeResolver;
use taleforge_storage::World;

use crate::demo;

/// The result of playing one line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// How the turn ended.
    pub outcome: TurnOutcome,
    /// Narration emitted during the turn, in order.
    pub lines: Vec<String>,
}

/// One game in progress.
pub struct Session {
    /// The current world state.
    world: World,

    /// The turn engine (commands, hooks, text processor, undo history).
    engine: TurnEngine,

    /// Narration not yet handed to the caller.
    output: NarrationBuffer,
}

impl Session {
    /// Creates a session after validating the world and every template the
    /// engine will narrate.
    ///
    /// # Errors
    ///
    /// Returns the first authoring error found.
    pub fn new(world: World, engine: TurnEngine) -> Result<Self> {
        engine.validate(&world)?;
        info!(
            "session ready: {} objects, {} commands",
            world.len(),
            engine.registry().len()
        );
        Ok(Self {
            world,
            engine,
            output: NarrationBuffer::new(),
        })
    }

    /// Creates a session playing the bundled demo world.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo fails to build.
    pub fn demo(config: EngineConfig) -> Result<Self> {
        let (world, engine) = demo::build(config)?;
        Self::new(world, engine)
    }

    /// Returns the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns the world mutably.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Returns the turn engine.
    #[must_use]
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Returns the turn engine mutably.
    pub fn engine_mut(&mut self) -> &mut TurnEngine {
        &mut self.engine
    }

    /// Plays one line of input.
    pub fn play(&mut self, input: &str) -> Turn {
        let outcome = self.engine.handle(input, &mut self.world, &mut self.output);
        Turn {
            outcome,
            lines: self.output.take(),
        }
    }

    /// Plays each line in turn, collecting all narration.
    pub fn play_all<'a>(&mut self, inputs: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        inputs
            .into_iter()
            .flat_map(|input| self.play(input).lines)
            .collect()
    }

    /// Narration for the start of the game: the opening room.
    pub fn opening(&mut self) -> Vec<String> {
        self.play("look").lines
    }

    /// Every scope predicate for the named object, from the player's point
    /// of view.
    ///
    /// # Errors
    ///
    /// Returns `UnknownObject` if no object has that name.
    pub fn scope_report(&self, name: &str) -> Result<String> {
        let id = self.world.resolve(name)?;
        Ok(ScopeResolver::for_player(&self.world)
            .report(id)
            .to_string())
    }

    /// The commands the named object currently supports.
    ///
    /// # Errors
    ///
    /// Returns `UnknownObject` if no object has that name.
    pub fn commands_for(&self, name: &str) -> Result<Vec<String>> {
        let id = self.world.resolve(name)?;
        Ok(self.engine.commands_for(&self.world, id))
    }

    /// Every reachable object with the commands it supports, by name.
    #[must_use]
    pub fn valid_commands(&self) -> Vec<(String, Vec<String>)> {
        self.engine
            .valid_commands(&self.world)
            .into_iter()
            .map(|(id, commands)| (self.world.name_of(id).to_string(), commands))
            .collect()
    }

    /// Directive bug reports recorded so far.
    #[must_use]
    pub fn bug_reports(&self) -> &[String] {
        self.engine.text().bug_reports()
    }

    /// The number of turns taken.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.world.turn()
    }
}

/// Wraps a non-authoring failure raised while driving a session.
pub(crate) fn internal(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Internal(message.into()))
}
