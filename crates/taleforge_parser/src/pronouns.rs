//! Pronoun tracking state.
//!
//! Tracks referents for pronouns like "it", "him", "her", "them". The
//! engine records the subjects of every successful command; the matcher
//! reads them back when a slot holds a pronoun.

use taleforge_foundation::{ObjectId, Pronouns};
use taleforge_storage::World;

use crate::vocabulary::PronounWord;

/// State for pronoun resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PronounState {
    /// "it" referent (neuter singular)
    it: Option<ObjectId>,
    /// "him" referent (masculine singular)
    him: Option<ObjectId>,
    /// "her" referent (feminine singular)
    her: Option<ObjectId>,
    /// "them" referent (plural, or every subject of a multi-object command)
    them: Vec<ObjectId>,
}

impl PronounState {
    /// Creates a new pronoun state with no referents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the subjects of a successful command.
    ///
    /// Each subject overwrites the pronoun matching its own pronoun set, so
    /// after "put hat and stick in drawer" "it" is the stick. When there are
    /// several subjects, "them" refers to all of them.
    pub fn remember(&mut self, world: &World, subjects: &[ObjectId]) {
        for &id in subjects {
            let Some(obj) = world.get(id) else { continue };
            match obj.pronouns {
                Pronouns::ThirdPerson => self.it = Some(id),
                Pronouns::Male => self.him = Some(id),
                Pronouns::Female => self.her = Some(id),
                Pronouns::Plural => self.them = vec![id],
                Pronouns::FirstPerson | Pronouns::SecondPerson => {}
            }
        }
        if subjects.len() > 1 {
            self.them = subjects.to_vec();
        }
    }

    /// Resolves a pronoun to its referent(s); empty when unset.
    #[must_use]
    pub fn resolve(&self, word: PronounWord) -> Vec<ObjectId> {
        match word {
            PronounWord::It => self.it.into_iter().collect(),
            PronounWord::Him => self.him.into_iter().collect(),
            PronounWord::Her => self.her.into_iter().collect(),
            PronounWord::Them => self.them.clone(),
        }
    }

    /// Forgets every referent.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
