//! Configuration for the turn engine.

use taleforge_text::{DEFAULT_MAX_DEPTH, StyleMode};

use crate::delegation::AgreementSource;

/// Configuration for the turn engine.
///
/// Controls delegation precedence, text rendering and undo history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Order in which agreement sources are consulted when a character is
    /// asked to act. The first source that has a hook decides.
    pub agreement_order: Vec<AgreementSource>,

    /// Bound on how deeply directives may nest in a narrated template.
    pub max_directive_depth: usize,

    /// How style directives are rendered.
    pub style: StyleMode,

    /// Seed for `{random:}` choices.
    pub rng_seed: u64,

    /// Number of pre-turn world snapshots kept for `undo`.
    pub undo_depth: usize,

    /// Echo each command ("> take lamp") before its narration.
    pub echo_commands: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            agreement_order: AgreementSource::DEFAULT_ORDER.to_vec(),
            max_directive_depth: DEFAULT_MAX_DEPTH,
            style: StyleMode::Html,
            rng_seed: 0,
            undo_depth: 10,
            echo_commands: false,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration for an interactive terminal: ANSI styling and
    /// echoed commands.
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            style: StyleMode::Ansi,
            echo_commands: true,
            ..Self::default()
        }
    }

    /// Creates a configuration for tests and scripted runs: plain text, no
    /// echo, a fixed seed.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            style: StyleMode::Plain,
            echo_commands: false,
            rng_seed: 0,
            ..Self::default()
        }
    }

    /// Builder method to set the agreement precedence.
    #[must_use]
    pub fn with_agreement_order(mut self, order: Vec<AgreementSource>) -> Self {
        self.agreement_order = order;
        self
    }

    /// Builder method to set the directive nesting bound.
    #[must_use]
    pub fn with_max_directive_depth(mut self, depth: usize) -> Self {
        self.max_directive_depth = depth;
        self
    }

    /// Builder method to set the style mode.
    #[must_use]
    pub fn with_style(mut self, style: StyleMode) -> Self {
        self.style = style;
        self
    }

    /// Builder method to set the random seed.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Builder method to set the undo depth.
    #[must_use]
    pub fn with_undo_depth(mut self, depth: usize) -> Self {
        self.undo_depth = depth;
        self
    }

    /// Builder method to enable/disable command echo.
    #[must_use]
    pub fn with_echo_commands(mut self, echo: bool) -> Self {
        self.echo_commands = echo;
        self
    }
}
