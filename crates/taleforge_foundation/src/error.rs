//! Error types for the Taleforge system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every variant here is an authoring or engine error; player-facing parse
//! failures live in the parser crate and are narrated, not propagated.

use std::fmt;

use thiserror::Error;

use crate::id::ObjectId;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Taleforge operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a duplicate object name error.
    #[must_use]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateName(name.into()))
    }

    /// Creates a disallowed object name error.
    #[must_use]
    pub fn disallowed_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DisallowedName(name.into()))
    }

    /// Creates an unknown object error.
    #[must_use]
    pub fn unknown_object(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownObject(name.into()))
    }

    /// Creates an object not found error for a raw id.
    #[must_use]
    pub fn object_not_found(id: ObjectId) -> Self {
        Self::new(ErrorKind::ObjectNotFound(id))
    }

    /// Creates a containment cycle error.
    #[must_use]
    pub fn containment_cycle(object: impl Into<String>, container: impl Into<String>) -> Self {
        Self::new(ErrorKind::ContainmentCycle {
            object: object.into(),
            container: container.into(),
        })
    }

    /// Creates an unknown text directive error.
    #[must_use]
    pub fn unknown_directive(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDirective {
            name: name.into(),
            template: template.into(),
        })
    }

    /// Returns true if this error is an authoring (content) error that must
    /// stop the world from starting.
    #[must_use]
    pub fn is_authoring(&self) -> bool {
        !matches!(
            self.kind,
            ErrorKind::ObjectNotFound(_) | ErrorKind::Internal(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Two objects were declared with the same name.
    #[error("an object named `{0}` already exists in the world")]
    DuplicateName(String),

    /// A name contains characters other than letters, digits and `_`.
    #[error("disallowed object name `{0}`: names may only contain letters, digits and `_`")]
    DisallowedName(String),

    /// An object refers to another object by a name nobody declared.
    #[error("unknown object `{0}`")]
    UnknownObject(String),

    /// An object is placed in a location that does not exist.
    #[error("object `{object}` is in an unknown location `{location}`")]
    UnknownLocation {
        /// The misplaced object.
        object: String,
        /// The location name that could not be resolved.
        location: String,
    },

    /// An exit leads to a room that does not exist.
    #[error("exit `{direction}` in room `{room}` leads to an unknown location `{destination}`")]
    UnknownExit {
        /// The room holding the exit.
        room: String,
        /// The exit direction.
        direction: String,
        /// The unresolved destination name.
        destination: String,
    },

    /// Placing an object would make it (indirectly) contain itself.
    #[error("placing `{object}` in `{container}` would create a containment cycle")]
    ContainmentCycle {
        /// The object being placed.
        object: String,
        /// The intended container.
        container: String,
    },

    /// A text template uses a directive nobody registered.
    #[error("unknown text directive `{name}` in template \"{template}\"")]
    UnknownDirective {
        /// The directive name.
        name: String,
        /// The offending template.
        template: String,
    },

    /// A command trigger pattern could not be compiled.
    #[error("invalid trigger pattern \"{pattern}\" for command `{command}`: {reason}")]
    InvalidPattern {
        /// The command being registered.
        command: String,
        /// The pattern source.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A command was registered twice.
    #[error("a command named `{0}` is already registered")]
    DuplicateCommand(String),

    /// The world has no player object.
    #[error("no player object was declared")]
    MissingPlayer,

    /// An object id does not refer to anything in the store.
    #[error("object not found: {0:?}")]
    ObjectNotFound(ObjectId),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file, object or command name.
    pub source: Option<String>,
    /// Stack of declarations being processed.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
