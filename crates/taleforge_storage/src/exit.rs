//! Compass directions and room exits.

use std::fmt;

use taleforge_foundation::ObjectId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A direction an exit can lead in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// north
    North,
    /// northeast
    Northeast,
    /// east
    East,
    /// southeast
    Southeast,
    /// south
    South,
    /// southwest
    Southwest,
    /// west
    West,
    /// northwest
    Northwest,
    /// up
    Up,
    /// down
    Down,
    /// in
    In,
    /// out
    Out,
}

impl Direction {
    /// Every direction, in compass order.
    pub const ALL: [Direction; 12] = [
        Self::North,
        Self::Northeast,
        Self::East,
        Self::Southeast,
        Self::South,
        Self::Southwest,
        Self::West,
        Self::Northwest,
        Self::Up,
        Self::Down,
        Self::In,
        Self::Out,
    ];

    /// Canonical name ("northeast").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::East => "east",
            Self::Southeast => "southeast",
            Self::South => "south",
            Self::Southwest => "southwest",
            Self::West => "west",
            Self::Northwest => "northwest",
            Self::Up => "up",
            Self::Down => "down",
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// Short form a player may type ("ne").
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::Northeast => "ne",
            Self::East => "e",
            Self::Southeast => "se",
            Self::South => "s",
            Self::Southwest => "sw",
            Self::West => "w",
            Self::Northwest => "nw",
            Self::Up => "u",
            Self::Down => "d",
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// The direction leading back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::Northeast => Self::Southwest,
            Self::East => Self::West,
            Self::Southeast => Self::Northwest,
            Self::South => Self::North,
            Self::Southwest => Self::Northeast,
            Self::West => Self::East,
            Self::Northwest => Self::Southeast,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }

    /// Parses a typed word (full name, abbreviation or common synonym).
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        if let Some(dir) = Self::ALL
            .iter()
            .find(|d| d.name() == word || d.abbreviation() == word)
        {
            return Some(*dir);
        }
        match word.as_str() {
            "upstairs" | "above" => Some(Self::Up),
            "downstairs" | "below" => Some(Self::Down),
            "inside" | "enter" => Some(Self::In),
            "outside" | "exit" => Some(Self::Out),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A way out of a room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exit {
    /// Which way the exit leads.
    pub direction: Direction,
    /// The room it leads to.
    pub destination: ObjectId,
    /// An openable object (door, trapdoor) that must be open to pass.
    pub door: Option<ObjectId>,
}

impl Exit {
    /// Creates an exit without a door.
    #[must_use]
    pub fn new(direction: Direction, destination: ObjectId) -> Self {
        Self {
            direction,
            destination,
            door: None,
        }
    }

    /// Sets the door guarding this exit.
    #[must_use]
    pub fn through(mut self, door: ObjectId) -> Self {
        self.door = Some(door);
        self
    }
}
