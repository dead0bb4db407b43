//! Syntax pattern matching.
//!
//! Matches token streams against command trigger patterns. A pattern is a
//! space-separated sequence of elements:
//!
//! - `take|get|pick_up` - literal alternatives; `_` joins a multi-word
//!   alternative
//! - `<obj>` - an object slot (a phrase, list, "all" or pronoun)
//! - `<text>` - a free-text slot
//! - `<dir>` - a single direction word
//!
//! ```
//! use taleforge_parser::syntax::Pattern;
//!
//! let pattern = Pattern::compile("put|place <obj> in|into|inside <obj>").unwrap();
//! assert_eq!(pattern.object_slots(), 2);
//! ```

use std::fmt;

use taleforge_storage::Direction;
use thiserror::Error;

use crate::tokenizer::InputToken;

/// Why a pattern failed to compile.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern has no elements.
    #[error("pattern is empty")]
    Empty,
    /// A `<...>` slot with an unknown kind.
    #[error("unknown slot kind `{0}`")]
    UnknownSlot(String),
    /// A literal with an empty alternative (`take||get`).
    #[error("empty alternative in `{0}`")]
    EmptyAlternative(String),
    /// Two open-ended slots in a row cannot be split.
    #[error("slot `{0}` directly follows another open-ended slot")]
    AdjacentSlots(String),
    /// More than two object slots.
    #[error("at most two object slots are supported")]
    TooManyObjectSlots,
}

/// The kind of a pattern slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SlotKind {
    /// `<obj>`
    Object,
    /// `<text>`
    Text,
    /// `<dir>`
    Direction,
}

/// A compiled pattern element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternElement {
    /// One of several literal word sequences.
    Literal(Vec<Vec<String>>),
    /// A slot.
    Slot(SlotKind),
}

/// What one slot captured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capture {
    /// The tokens of an object or text slot.
    Tokens(SlotKind, Vec<InputToken>),
    /// A direction word.
    Direction(Direction),
}

/// A compiled trigger pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    elements: Vec<PatternElement>,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] for empty patterns, unknown slot kinds,
    /// empty alternatives, adjacent open-ended slots or more than two
    /// object slots.
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let mut elements = Vec::new();
        let mut previous_open = false;
        let mut object_slots = 0;
        for piece in source.split_whitespace() {
            if let Some(kind) = piece.strip_prefix('<').and_then(|p| p.strip_suffix('>')) {
                let kind = match kind {
                    "obj" => SlotKind::Object,
                    "text" => SlotKind::Text,
                    "dir" => SlotKind::Direction,
                    other => return Err(PatternError::UnknownSlot(other.to_string())),
                };
                if previous_open {
                    return Err(PatternError::AdjacentSlots(piece.to_string()));
                }
                if kind == SlotKind::Object {
                    object_slots += 1;
                }
                previous_open = kind != SlotKind::Direction;
                elements.push(PatternElement::Slot(kind));
            } else {
                let mut alternatives = Vec::new();
                for alt in piece.split('|') {
                    if alt.is_empty() {
                        return Err(PatternError::EmptyAlternative(piece.to_string()));
                    }
                    alternatives.push(
                        alt.split('_')
                            .filter(|w| !w.is_empty())
                            .map(str::to_lowercase)
                            .collect(),
                    );
                }
                previous_open = false;
                elements.push(PatternElement::Literal(alternatives));
            }
        }
        if elements.is_empty() {
            return Err(PatternError::Empty);
        }
        if object_slots > 2 {
            return Err(PatternError::TooManyObjectSlots);
        }
        Ok(Self {
            source: source.to_string(),
            elements,
        })
    }

    /// The pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled elements.
    #[must_use]
    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    /// The slot kinds in order.
    #[must_use]
    pub fn slots(&self) -> Vec<SlotKind> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                PatternElement::Slot(kind) => Some(*kind),
                PatternElement::Literal(_) => None,
            })
            .collect()
    }

    /// Number of object slots.
    #[must_use]
    pub fn object_slots(&self) -> usize {
        self.slots()
            .iter()
            .filter(|k| **k == SlotKind::Object)
            .count()
    }

    /// Matches a whole token sequence (without [`InputToken::End`]).
    ///
    /// Slots capture as few tokens as possible, backtracking when the rest
    /// of the pattern fails, so "put apple in box in cabinet" captures
    /// "apple" and "box in cabinet".
    #[must_use]
    pub fn matches(&self, tokens: &[InputToken]) -> Option<Vec<Capture>> {
        let tokens: Vec<InputToken> = tokens
            .iter()
            .filter(|t| !matches!(t, InputToken::End))
            .cloned()
            .collect();
        let mut captures = Vec::new();
        self.match_from(0, &tokens, 0, &mut captures)
            .then_some(captures)
    }

    fn match_from(
        &self,
        element: usize,
        tokens: &[InputToken],
        pos: usize,
        captures: &mut Vec<Capture>,
    ) -> bool {
        let Some(current) = self.elements.get(element) else {
            return pos == tokens.len();
        };
        match current {
            PatternElement::Literal(alternatives) => alternatives.iter().any(|words| {
                let end = pos + words.len();
                end <= tokens.len()
                    && tokens[pos..end]
                        .iter()
                        .zip(words)
                        .all(|(t, w)| t.word() == Some(w.as_str()))
                    && self.match_from(element + 1, tokens, end, captures)
            }),
            PatternElement::Slot(SlotKind::Direction) => {
                let Some(dir) = tokens.get(pos).and_then(InputToken::word).and_then(Direction::from_word)
                else {
                    return false;
                };
                captures.push(Capture::Direction(dir));
                if self.match_from(element + 1, tokens, pos + 1, captures) {
                    return true;
                }
                captures.pop();
                false
            }
            PatternElement::Slot(kind) => {
                for end in pos + 1..=tokens.len() {
                    captures.push(Capture::Tokens(*kind, tokens[pos..end].to_vec()));
                    if self.match_from(element + 1, tokens, end, captures) {
                        return true;
                    }
                    captures.pop();
                }
                false
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
