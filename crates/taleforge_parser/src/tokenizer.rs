//! Input tokenization.
//!
//! Converts raw player input into a stream of tokens.

use std::fmt;

/// A token from player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputToken {
    /// A lowercase word
    Word(String),
    /// A quoted string (preserved as-is)
    QuotedString(String),
    /// A comma separating list items or an addressee from a command
    Joiner,
    /// End of input
    End,
}

impl InputToken {
    /// Returns the word, if this is a word.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            _ => None,
        }
    }
}

impl fmt::Display for InputToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => f.write_str(w),
            Self::QuotedString(s) => write!(f, "\"{s}\""),
            Self::Joiner => f.write_str(","),
            Self::End => Ok(()),
        }
    }
}

/// Joins tokens back into text ("apple, knife").
#[must_use]
pub fn tokens_to_text(tokens: &[InputToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            InputToken::End => {}
            InputToken::Joiner => out.push(','),
            other => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&other.to_string());
            }
        }
    }
    out
}

/// Tokenizes player input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Tokenizes a raw input string into tokens.
    ///
    /// - Converts words to lowercase
    /// - Turns commas into [`InputToken::Joiner`]
    /// - Strips other punctuation (except within quotes)
    /// - Preserves quoted strings as atomic units
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<InputToken> {
        let mut tokens = Vec::new();
        let mut chars = input.chars().peekable();
        let mut current_word = String::new();

        let flush = |word: &mut String, tokens: &mut Vec<InputToken>| {
            if !word.is_empty() {
                tokens.push(InputToken::Word(word.to_lowercase()));
                word.clear();
            }
        };

        while let Some(ch) = chars.next() {
            match ch {
                '"' => {
                    flush(&mut current_word, &mut tokens);
                    let mut quoted = String::new();
                    for c in chars.by_ref() {
                        if c == '"' {
                            break;
                        }
                        quoted.push(c);
                    }
                    tokens.push(InputToken::QuotedString(quoted));
                }
                ',' => {
                    flush(&mut current_word, &mut tokens);
                    tokens.push(InputToken::Joiner);
                }
                c if c.is_whitespace() => flush(&mut current_word, &mut tokens),
                '.' | '!' | '?' | ';' | ':' => {}
                _ => current_word.push(ch),
            }
        }

        flush(&mut current_word, &mut tokens);
        tokens.push(InputToken::End);
        tokens
    }
}
