//! Noun phrase representation and resolution.
//!
//! Handles splitting slot text like "the apple and knife" or "all but the
//! sword" and matching phrases against object aliases and synonyms.

use taleforge_foundation::ObjectId;
use taleforge_storage::{World, WorldObject};

use crate::tokenizer::InputToken;
use crate::vocabulary::{PronounWord, Vocabulary};

/// A parsed noun phrase with filler words removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NounPhrase {
    /// The significant words, lowercase.
    pub words: Vec<String>,
}

impl NounPhrase {
    /// Creates a phrase from words.
    #[must_use]
    pub fn new<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses free text (used for disambiguation replies).
    #[must_use]
    pub fn from_text(text: &str, vocab: &Vocabulary) -> Self {
        Self::new(
            text.split_whitespace()
                .map(str::to_lowercase)
                .filter(|w| !vocab.is_ignored(w)),
        )
    }

    /// The phrase as typed, minus filler.
    #[must_use]
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    /// Returns true if no significant words remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// One item of a slot list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    /// A named object ("brass lamp").
    Named(NounPhrase),
    /// A pronoun referring back to an earlier subject.
    Pronoun(PronounWord),
}

impl Reference {
    /// The text of the reference, for messages.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Named(phrase) => phrase.text(),
            Self::Pronoun(word) => word.as_str().to_string(),
        }
    }
}

/// What the player put in one object slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotPhrase {
    /// "all", or "all but X and Y".
    All {
        /// Phrases excluded from the expansion.
        except: Vec<NounPhrase>,
    },
    /// One or more comma/"and"-joined references.
    List(Vec<Reference>),
}

impl SlotPhrase {
    /// Splits captured slot tokens. Returns `None` when nothing but filler
    /// was captured.
    #[must_use]
    pub fn parse(tokens: &[InputToken], vocab: &Vocabulary) -> Option<Self> {
        let mut groups: Vec<Vec<String>> = vec![Vec::new()];
        for token in tokens {
            match token {
                InputToken::Joiner => groups.push(Vec::new()),
                InputToken::Word(w) if vocab.is_joiner(w) => groups.push(Vec::new()),
                InputToken::Word(w) if vocab.is_ignored(w) => {}
                InputToken::Word(w) => push_word(&mut groups, w.clone()),
                InputToken::QuotedString(s) => push_word(&mut groups, s.to_lowercase()),
                InputToken::End => {}
            }
        }
        groups.retain(|g| !g.is_empty());
        let first = groups.first()?;

        if vocab.is_all(&first[0]) {
            if first.len() == 1 && groups.len() == 1 {
                return Some(Self::All { except: Vec::new() });
            }
            if first.len() > 1 && vocab.is_except(&first[1]) {
                let mut except = Vec::new();
                if first.len() > 2 {
                    except.push(NounPhrase::new(first[2..].iter().cloned()));
                }
                except.extend(groups[1..].iter().cloned().map(NounPhrase::new));
                return Some(Self::All { except });
            }
        }

        let references = groups
            .into_iter()
            .map(|g| match (g.len(), vocab.pronoun(&g[0])) {
                (1, Some(word)) => Reference::Pronoun(word),
                _ => Reference::Named(NounPhrase::new(g)),
            })
            .collect();
        Some(Self::List(references))
    }

    /// Returns true for "all" forms and lists of more than one item.
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        match self {
            Self::All { .. } => true,
            Self::List(items) => items.len() > 1,
        }
    }
}

fn push_word(groups: &mut [Vec<String>], word: String) {
    if let Some(last) = groups.last_mut() {
        last.push(word);
    }
}

/// How well a phrase names an object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum MatchQuality {
    /// Every phrase word starts some word of the alias or a synonym.
    Partial,
    /// The phrase is the alias or a synonym.
    Exact,
}

/// Result of noun resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NounResolution {
    /// Uniquely resolved to one object
    Unique(ObjectId),
    /// Multiple equally good matches - disambiguation needed
    Ambiguous(Vec<ObjectId>),
    /// No matching object found
    NotFound,
}

/// Resolves noun phrases against candidate objects.
///
/// Resolution order:
/// 1. Exact alias or synonym match
/// 2. Partial (word-prefix) match on alias or synonyms
///
/// Only the best tier that has any match is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct NounResolver;

impl NounResolver {
    /// Scores one object against a phrase.
    #[must_use]
    pub fn quality(object: &WorldObject, phrase: &NounPhrase) -> Option<MatchQuality> {
        if phrase.is_empty() {
            return None;
        }
        let text = phrase.text();
        let names: Vec<String> = object.words().collect();
        if names.iter().any(|n| *n == text) {
            return Some(MatchQuality::Exact);
        }
        let name_words: Vec<&str> = names.iter().flat_map(|n| n.split_whitespace()).collect();
        let partial = phrase
            .words
            .iter()
            .all(|w| name_words.iter().any(|n| n.starts_with(w.as_str())));
        partial.then_some(MatchQuality::Partial)
    }

    /// Finds the best-matching candidates, in candidate order.
    #[must_use]
    pub fn matches(world: &World, phrase: &NounPhrase, candidates: &[ObjectId]) -> Vec<ObjectId> {
        let scored: Vec<(ObjectId, MatchQuality)> = candidates
            .iter()
            .filter_map(|id| {
                let obj = world.get(*id)?;
                Self::quality(obj, phrase).map(|q| (*id, q))
            })
            .collect();
        let Some(best) = scored.iter().map(|(_, q)| *q).max() else {
            return Vec::new();
        };
        scored
            .into_iter()
            .filter(|(_, q)| *q == best)
            .map(|(id, _)| id)
            .collect()
    }

    /// Resolves a phrase to one object if it can.
    #[must_use]
    pub fn resolve(world: &World, phrase: &NounPhrase, candidates: &[ObjectId]) -> NounResolution {
        let found = Self::matches(world, phrase, candidates);
        match found.as_slice() {
            [] => NounResolution::NotFound,
            [one] => NounResolution::Unique(*one),
            _ => NounResolution::Ambiguous(found),
        }
    }

    /// Gets a description of an object for disambiguation.
    #[must_use]
    pub fn describe(world: &World, id: ObjectId) -> String {
        world.get(id).map_or_else(|| "thing".to_string(), |o| o.alias.clone())
    }
}
