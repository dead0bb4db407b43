//! Function words the matcher treats specially.
//!
//! Articles are ignored inside object phrases, "and" joins list items,
//! "all"/"everything" expand a slot and "but"/"except" start an exclusion
//! list. Pronoun words refer back to earlier subjects.

use std::collections::HashSet;

/// The pronoun words a player can use.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PronounWord {
    /// "it"
    It,
    /// "him"
    Him,
    /// "her"
    Her,
    /// "them"
    Them,
}

impl PronounWord {
    /// The word itself.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::It => "it",
            Self::Him => "him",
            Self::Her => "her",
            Self::Them => "them",
        }
    }
}

/// Word classes used while splitting and resolving object phrases.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    ignored: HashSet<String>,
    joiners: HashSet<String>,
    all_words: HashSet<String>,
    except_words: HashSet<String>,
}

fn set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::english()
    }
}

impl Vocabulary {
    /// The English word lists.
    #[must_use]
    pub fn english() -> Self {
        Self {
            ignored: set(&["the", "a", "an"]),
            joiners: set(&["and"]),
            all_words: set(&["all", "everything"]),
            except_words: set(&["but", "except"]),
        }
    }

    /// Adds a filler word to ignore.
    #[must_use]
    pub fn with_ignored(mut self, word: &str) -> Self {
        self.ignored.insert(word.to_lowercase());
        self
    }

    /// Articles and other filler.
    #[must_use]
    pub fn is_ignored(&self, word: &str) -> bool {
        self.ignored.contains(word)
    }

    /// List joiners ("and"); commas arrive as joiner tokens.
    #[must_use]
    pub fn is_joiner(&self, word: &str) -> bool {
        self.joiners.contains(word)
    }

    /// "all" / "everything".
    #[must_use]
    pub fn is_all(&self, word: &str) -> bool {
        self.all_words.contains(word)
    }

    /// "but" / "except".
    #[must_use]
    pub fn is_except(&self, word: &str) -> bool {
        self.except_words.contains(word)
    }

    /// Recognises a pronoun.
    #[must_use]
    pub fn pronoun(&self, word: &str) -> Option<PronounWord> {
        match word {
            "it" => Some(PronounWord::It),
            "him" => Some(PronounWord::Him),
            "her" => Some(PronounWord::Her),
            "them" => Some(PronounWord::Them),
            _ => None,
        }
    }
}
