//! English helpers for narration.
//!
//! Articles honour proper names and plural pronouns, lists are joined with
//! "and", and verbs are conjugated for the subject's pronoun set:
//!
//! ```
//! use taleforge_foundation::Pronouns;
//! use taleforge_text::english::{conjugate, format_list};
//!
//! assert_eq!(conjugate(Pronouns::ThirdPerson, "carry"), "carries");
//! assert_eq!(conjugate(Pronouns::SecondPerson, "carry"), "carry");
//! assert_eq!(format_list(&["apple", "knife", "coin"]), "apple, knife and coin");
//! ```

use taleforge_foundation::{Pronouns, Value};
use taleforge_storage::WorldObject;

/// Field that overrides the indefinite article ("some", "a pair of").
pub const ARTICLE_FIELD: &str = "article";

/// Conjugation rules, tried in order.
///
/// An exact entry wins first. Otherwise a `*suffix` entry replaces the
/// suffix, and an `@suffix` entry conjugates the stem and re-appends the
/// value ("don't" becomes "doesn't").
const FIRST_PERSON: &[(&str, &str)] = &[("be", "am"), ("'be", "'m")];
const PLURAL: &[(&str, &str)] = &[("be", "are"), ("'be", "'re")];
const THIRD_PERSON: &[(&str, &str)] = &[
    ("be", "is"),
    ("have", "has"),
    ("can", "can"),
    ("mould", "moulds"),
    ("*ould", "ould"),
    ("must", "must"),
    ("can't", "can't"),
    ("won't", "won't"),
    ("cannot", "cannot"),
    ("@n't", "n't"),
    ("'ve", "'s"),
    ("'be", "'s"),
    ("*ay", "ays"),
    ("*oy", "oys"),
    ("*ey", "eys"),
    ("*y", "ies"),
    ("*ss", "sses"),
    ("*s", "ses"),
    ("*sh", "shes"),
    ("*ch", "ches"),
    ("*o", "oes"),
    ("*x", "xes"),
    ("*z", "zes"),
    ("*", "s"),
];

fn conjugations(pronouns: Pronouns) -> &'static [(&'static str, &'static str)] {
    match pronouns {
        Pronouns::FirstPerson => FIRST_PERSON,
        Pronouns::SecondPerson | Pronouns::Plural => PLURAL,
        Pronouns::ThirdPerson | Pronouns::Male | Pronouns::Female => THIRD_PERSON,
    }
}

/// Conjugates a verb (given in its plural form) for a subject.
#[must_use]
pub fn conjugate(pronouns: Pronouns, verb: &str) -> String {
    let table = conjugations(pronouns);
    if let Some((_, value)) = table.iter().find(|(name, _)| *name == verb) {
        return (*value).to_string();
    }
    for (name, value) in table {
        if let Some(suffix) = name.strip_prefix('@') {
            if let Some(stem) = verb.strip_suffix(suffix).filter(|s| !s.is_empty()) {
                return conjugate(pronouns, stem) + value;
            }
        } else if let Some(suffix) = name.strip_prefix('*') {
            if let Some(stem) = verb.strip_suffix(suffix) {
                return format!("{stem}{value}");
            }
        }
    }
    verb.to_string()
}

/// "the lamp", or just the alias for proper names.
#[must_use]
pub fn the(object: &WorldObject) -> String {
    if object.proper_name {
        object.alias.clone()
    } else {
        format!("the {}", object.alias)
    }
}

/// "a lamp", "an apple", "some boots", or just the alias for proper names.
#[must_use]
pub fn a(object: &WorldObject) -> String {
    if let Some(article) = object.field(ARTICLE_FIELD).and_then(Value::as_text) {
        return format!("{article} {}", object.alias);
    }
    if object.proper_name {
        return object.alias.clone();
    }
    if object.pronouns == Pronouns::Plural {
        return format!("some {}", object.alias);
    }
    let vowel = object
        .alias
        .chars()
        .next()
        .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'));
    if vowel {
        format!("an {}", object.alias)
    } else {
        format!("a {}", object.alias)
    }
}

/// Capitalises the first ASCII letter and trims surrounding whitespace.
#[must_use]
pub fn sentence_case(text: &str) -> String {
    let text = text.trim();
    match text.find(|c: char| c.is_ascii_alphabetic()) {
        Some(at) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..at]);
            out.push_str(&text[at..=at].to_ascii_uppercase());
            out.push_str(&text[at + 1..]);
            out
        }
        None => text.to_string(),
    }
}

/// Joins items as "a, b and c".
#[must_use]
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    format_list_with(items, "and")
}

/// Joins items as "a, b JOINER c".
#[must_use]
pub fn format_list_with<S: AsRef<str>>(items: &[S], joiner: &str) -> String {
    match items {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} {joiner} {}", head.join(", "), last.as_ref())
        }
    }
}

/// "it is", "you are", "she's" (for `'be`).
#[must_use]
pub fn pronoun_verb(object: &WorldObject, verb: &str, capitalise: bool) -> String {
    let text = format!(
        "{} {}",
        object.pronouns.subjective(),
        conjugate(object.pronouns, verb)
    )
    .replacen(" '", "'", 1);
    if capitalise { sentence_case(&text) } else { text }
}

/// "the lamp is", "Kyle pushes".
#[must_use]
pub fn noun_verb(object: &WorldObject, verb: &str, capitalise: bool) -> String {
    let text = format!("{} {}", the(object), conjugate(object.pronouns, verb));
    if capitalise { sentence_case(&text) } else { text }
}

/// The prefix for one line of a multi-object command ("Apple: ").
#[must_use]
pub fn multiple_prefix(object: &WorldObject, multiple: bool) -> String {
    if multiple {
        format!("{}: ", sentence_case(&object.alias))
    } else {
        String::new()
    }
}
