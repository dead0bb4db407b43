//! English narration for the standard commands.
//!
//! Messages take the acting character so the same text works for the
//! player ("You take the lamp.") and for a character acting on request
//! ("Kyle takes the lamp.").

use taleforge_storage::WorldObject;
use taleforge_text::english::{
    a, conjugate, format_list, format_list_with, pronoun_verb, sentence_case, the,
};

/// The item lacks the attribute a command needs.
pub const NO_ATTRIBUTE: &str = "It does not work like that.";
/// No exit that way.
pub const NOT_THAT_WAY: &str = "You can't go that way.";
/// The exit's door is locked.
pub const LOCKED_EXIT: &str = "That way is locked.";
/// Description of an object without one.
pub const DEFAULT_DESCRIPTION: &str = "It's just scenery.";
/// `wait`
pub const WAIT: &str = "Time passes...";
/// Successful undo.
pub const UNDONE: &str = "Undone.";
/// Nothing left to undo.
pub const NOTHING_TO_UNDO: &str = "There is nothing to undo.";
/// `help`
pub const HELP: &str = "Type commands to interact with the world. To move, use the compass \
directions (or just 'n', 'ne', etc.); up/down and in/out may be options too. You can also LOOK, \
WAIT or UNDO. Other commands are generally of the form GET HAT or PUT THE RING IN THE BOX. You \
can use ALL and ALL BUT with some commands, for example TAKE ALL, and pronouns, so LOOK AT LARA, \
then TALK TO HER. Ask another character to do something with KYLE, TAKE THE BOOK.";

/// "You take" / "Kyle takes".
#[must_use]
pub fn subject_verb(actor: &WorldObject, verb: &str) -> String {
    if actor.player {
        pronoun_verb(actor, verb, true)
    } else {
        let text = format!("{} {}", the(actor), conjugate(actor.pronouns, verb));
        sentence_case(&text.replacen(" '", "'", 1))
    }
}

/// "The box is" / "The boots are".
fn noun_is(item: &WorldObject) -> String {
    sentence_case(&format!("{} {}", the(item), conjugate(item.pronouns, "be")))
}

/// "You" / "Kyle".
#[must_use]
pub fn subject(actor: &WorldObject) -> String {
    if actor.player {
        sentence_case(actor.pronouns.subjective())
    } else {
        sentence_case(&the(actor))
    }
}

// =============================================================================
// Refusals
// =============================================================================

/// "The book is not a container."
#[must_use]
pub fn not_container(item: &WorldObject) -> String {
    format!("{} is not a container.", sentence_case(&the(item)))
}

/// "You're not carrying it."
#[must_use]
pub fn not_carrying(actor: &WorldObject, item: &WorldObject) -> String {
    format!(
        "{} not carrying {}.",
        subject_verb(actor, "'be"),
        item.pronouns.objective()
    )
}

/// "You're wearing it."
#[must_use]
pub fn wearing(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} wearing {}.", subject_verb(actor, "'be"), item.pronouns.objective())
}

/// "You're not wearing it."
#[must_use]
pub fn not_wearing(actor: &WorldObject, item: &WorldObject) -> String {
    format!(
        "{} not wearing {}.",
        subject_verb(actor, "'be"),
        item.pronouns.objective()
    )
}

/// "It's not here."
#[must_use]
pub fn not_here(item: &WorldObject) -> String {
    format!("{} not here.", pronoun_verb(item, "'be", true))
}

/// "You can't take it."
#[must_use]
pub fn cannot(actor: &WorldObject, verb: &str, item: &WorldObject) -> String {
    format!(
        "{} {verb} {}.",
        subject_verb(actor, "can't"),
        item.pronouns.objective()
    )
}

/// "You already have it."
#[must_use]
pub fn already_have(actor: &WorldObject, item: &WorldObject) -> String {
    format!(
        "{} already {} {}.",
        subject(actor),
        conjugate(actor.pronouns, "have"),
        item.pronouns.objective()
    )
}

/// "You're already wearing it."
#[must_use]
pub fn already_wearing(actor: &WorldObject, item: &WorldObject) -> String {
    format!(
        "{} already wearing {}.",
        subject_verb(actor, "'be"),
        item.pronouns.objective()
    )
}

/// "It's already open."
#[must_use]
pub fn already(item: &WorldObject, state: &str) -> String {
    format!("{} already {state}.", pronoun_verb(item, "'be", true))
}

/// "It's locked."
#[must_use]
pub fn locked(item: &WorldObject) -> String {
    format!("{} locked.", pronoun_verb(item, "'be", true))
}

/// "It's not locked."
#[must_use]
pub fn not_locked(item: &WorldObject) -> String {
    format!("{} not locked.", pronoun_verb(item, "'be", true))
}

/// "You do not have the right key."
#[must_use]
pub fn no_key(actor: &WorldObject) -> String {
    format!("{} not have the right key.", subject_verb(actor, "do"))
}

/// "The jewellery box is closed."
#[must_use]
pub fn is_closed(item: &WorldObject) -> String {
    format!("{} closed.", noun_is(item))
}

/// "You can't put something inside itself."
#[must_use]
pub fn inside_itself(actor: &WorldObject) -> String {
    format!("{} put something inside itself.", subject_verb(actor, "can't"))
}

/// "You need to close it first."
#[must_use]
pub fn close_first(actor: &WorldObject, item: &WorldObject) -> String {
    format!(
        "{} to close {} first.",
        subject_verb(actor, "need"),
        item.pronouns.objective()
    )
}

/// "You're already sitting on the chair."
#[must_use]
pub fn already_sitting(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} already sitting on {}.", subject_verb(actor, "'be"), the(item))
}

/// "You can't do that with Kyle."
#[must_use]
pub fn not_able(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} do that with {}.", subject_verb(actor, "can't"), the(item))
}

/// "You can't tell Kyle to do that."
#[must_use]
pub fn cannot_delegate(character: &WorldObject) -> String {
    format!("You can't tell {} to do that.", the(character))
}

// =============================================================================
// Successes
// =============================================================================

/// "You take the lamp."
#[must_use]
pub fn take_successful(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} {}.", subject_verb(actor, "take"), the(item))
}

/// "You drop the lamp."
#[must_use]
pub fn drop_successful(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} {}.", subject_verb(actor, "drop"), the(item))
}

/// "You put on the boots."
#[must_use]
pub fn wear_successful(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} on {}.", subject_verb(actor, "put"), the(item))
}

/// "You take the boots off."
#[must_use]
pub fn remove_successful(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} {} off.", subject_verb(actor, "take"), the(item))
}

/// "You open the trapdoor."
#[must_use]
pub fn open_successful(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} {}.", subject_verb(actor, "open"), the(item))
}

/// "You close the trapdoor."
#[must_use]
pub fn close_successful(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} {}.", subject_verb(actor, "close"), the(item))
}

/// "You unlock the glass cabinet."
#[must_use]
pub fn unlock_successful(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} {}.", subject_verb(actor, "unlock"), the(item))
}

/// "You lock the glass cabinet."
#[must_use]
pub fn lock_successful(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} {}.", subject_verb(actor, "lock"), the(item))
}

/// "You switch the flashlight on."
#[must_use]
pub fn switch_successful(actor: &WorldObject, item: &WorldObject, on: bool) -> String {
    let state = if on { "on" } else { "off" };
    format!("{} {} {state}.", subject_verb(actor, "switch"), the(item))
}

/// "You put the ring in the jewellery box."
#[must_use]
pub fn put_in_successful(
    actor: &WorldObject,
    item: &WorldObject,
    container: &WorldObject,
) -> String {
    format!(
        "{} {} in {}.",
        subject_verb(actor, "put"),
        the(item),
        the(container)
    )
}

/// "You give the ring to Lara."
#[must_use]
pub fn give_successful(actor: &WorldObject, item: &WorldObject, recipient: &WorldObject) -> String {
    format!(
        "{} {} to {}.",
        subject_verb(actor, "give"),
        the(item),
        the(recipient)
    )
}

/// "Lara doesn't want the knife."
#[must_use]
pub fn unwanted(recipient: &WorldObject, item: &WorldObject) -> String {
    format!(
        "{} want {}.",
        sentence_case(&format!("{} {}", the(recipient), conjugate(recipient.pronouns, "don't"))),
        the(item)
    )
}

/// "You sit on the chair."
#[must_use]
pub fn sit_on_successful(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} on {}.", subject_verb(actor, "sit"), the(item))
}

/// "You push the crates, but nothing happens."
#[must_use]
pub fn push_nothing(actor: &WorldObject, item: &WorldObject) -> String {
    format!("{} {}, but nothing happens.", subject_verb(actor, "push"), the(item))
}

/// "You chat to the book for a moment, but it does not respond."
#[must_use]
pub fn talk_to_object(actor: &WorldObject, item: &WorldObject) -> String {
    format!(
        "{} to {} for a moment, but {} not respond.",
        subject_verb(actor, "chat"),
        the(item),
        pronoun_verb(item, "do", false)
    )
}

/// "You could ask Kyle about: the weather or the garden."
#[must_use]
pub fn topics(character: &WorldObject, topics: &[String]) -> String {
    format!(
        "You could ask {} about: {}.",
        the(character),
        format_list_with(topics, "or")
    )
}

/// "You have nothing to talk to Kyle about."
#[must_use]
pub fn no_topics(character: &WorldObject) -> String {
    format!("You have nothing to talk to {} about.", the(character))
}

/// "Kyle has nothing to say about that."
#[must_use]
pub fn no_answer(character: &WorldObject) -> String {
    format!(
        "{} nothing to say about that.",
        sentence_case(&format!("{} {}", the(character), conjugate(character.pronouns, "have")))
    )
}

/// "Kyle heads north." (seen by the player)
#[must_use]
pub fn leaves(actor: &WorldObject, direction: &str) -> String {
    format!("{} {direction}.", subject_verb(actor, "head"))
}

/// "Kyle arrives."
#[must_use]
pub fn arrives(actor: &WorldObject) -> String {
    format!("{}.", subject_verb(actor, "arrive"))
}

// =============================================================================
// Listings
// =============================================================================

/// "You can see a lamp and Kyle here."
#[must_use]
pub fn you_can_see(items: &[&WorldObject]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let names: Vec<String> = items.iter().map(|o| a(o)).collect();
    Some(format!("You can see {} here.", format_list(&names)))
}

/// "You can go east, west or up."
#[must_use]
pub fn you_can_go(directions: &[&str]) -> Option<String> {
    if directions.is_empty() {
        return None;
    }
    Some(format!("You can go {}.", format_list_with(directions, "or")))
}

/// "You are carrying a knife and some boots (worn)."
#[must_use]
pub fn carrying(actor: &WorldObject, items: &[&WorldObject]) -> String {
    if items.is_empty() {
        return format!("{} carrying nothing.", subject_verb(actor, "be"));
    }
    let names: Vec<String> = items
        .iter()
        .map(|o| if o.is_worn() { format!("{} (worn)", a(o)) } else { a(o) })
        .collect();
    format!("{} carrying {}.", subject_verb(actor, "be"), format_list(&names))
}

/// "Inside the box you can see a ring."
#[must_use]
pub fn contents(container: &WorldObject, items: &[&WorldObject]) -> String {
    if items.is_empty() {
        return format!("{} empty.", noun_is(container));
    }
    let names: Vec<String> = items.iter().map(|o| a(o)).collect();
    format!(
        "Inside {} you can see {}.",
        the(container),
        format_list(&names)
    )
}
