//! Pronoun sets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The grammatical person/gender of an object, used to pick pronouns in
/// narration and to decide which pronoun ("it", "him", "her", "them") refers
/// back to it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pronouns {
    /// it/its
    #[default]
    ThirdPerson,
    /// he/him/his
    Male,
    /// she/her/hers
    Female,
    /// they/them/their
    Plural,
    /// I/me/my
    FirstPerson,
    /// you/you/your (the usual player character)
    SecondPerson,
}

impl Pronouns {
    /// Subjective form ("it", "he", "you").
    #[must_use]
    pub const fn subjective(self) -> &'static str {
        match self {
            Self::ThirdPerson => "it",
            Self::Male => "he",
            Self::Female => "she",
            Self::Plural => "they",
            Self::FirstPerson => "I",
            Self::SecondPerson => "you",
        }
    }

    /// Objective form ("it", "him", "you").
    #[must_use]
    pub const fn objective(self) -> &'static str {
        match self {
            Self::ThirdPerson => "it",
            Self::Male => "him",
            Self::Female => "her",
            Self::Plural => "them",
            Self::FirstPerson => "me",
            Self::SecondPerson => "you",
        }
    }

    /// Possessive pronoun ("its", "his", "hers").
    #[must_use]
    pub const fn possessive(self) -> &'static str {
        match self {
            Self::ThirdPerson => "its",
            Self::Male => "his",
            Self::Female => "hers",
            Self::Plural => "theirs",
            Self::FirstPerson => "mine",
            Self::SecondPerson => "yours",
        }
    }

    /// Possessive adjective ("its", "his", "her").
    #[must_use]
    pub const fn possessive_adjective(self) -> &'static str {
        match self {
            Self::ThirdPerson => "its",
            Self::Male => "his",
            Self::Female => "her",
            Self::Plural => "their",
            Self::FirstPerson => "my",
            Self::SecondPerson => "your",
        }
    }

    /// Reflexive form ("itself", "himself").
    #[must_use]
    pub const fn reflexive(self) -> &'static str {
        match self {
            Self::ThirdPerson => "itself",
            Self::Male => "himself",
            Self::Female => "herself",
            Self::Plural => "themselves",
            Self::FirstPerson => "myself",
            Self::SecondPerson => "yourself",
        }
    }

    /// Returns true if verbs take the plural form ("they are", "you are").
    #[must_use]
    pub const fn is_plural_verb(self) -> bool {
        matches!(self, Self::Plural | Self::SecondPerson)
    }
}
