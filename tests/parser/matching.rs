//! Matching player input against the standard commands

use proptest::prelude::*;
use taleforge_engine::{CommandRegistry, standard_registry};
use taleforge_foundation::Pronouns;
use taleforge_parser::{CommandMatch, MatchResult, ParseError, PronounState, Scope, ScopeResolver};
use taleforge_storage::{Direction, ObjectDecl, World, WorldBuilder};

fn world() -> World {
    WorldBuilder::new()
        .object(
            ObjectDecl::room("lounge")
                .exit(Direction::East, "kitchen")
                .exit(Direction::West, "dining_room"),
        )
        .object(ObjectDecl::room("kitchen").exit(Direction::West, "lounge"))
        .object(ObjectDecl::room("dining_room").exit(Direction::East, "lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("apple").at("lounge").takeable())
        .object(ObjectDecl::item("top_hat").at("me").wearable())
        .object(ObjectDecl::item("straw_hat").at("lounge").takeable().wearable())
        .object(ObjectDecl::item("boots").at("me").worn().pronouns(Pronouns::Plural))
        .object(ObjectDecl::item("box").at("lounge").container(false).openable(false))
        .object(ObjectDecl::item("flashlight").at("lounge").takeable().synonyms(&["torch"]))
        .object(ObjectDecl::npc("kyle", Pronouns::Male).at("lounge"))
        .object(ObjectDecl::npc("lara", Pronouns::Female).at("dining_room"))
        .build()
        .unwrap()
}

fn registry() -> CommandRegistry {
    standard_registry().unwrap()
}

fn matched(result: MatchResult) -> CommandMatch {
    match result {
        MatchResult::Matched(m) => m,
        other => panic!("expected a match, got {other:?}"),
    }
}

fn resolve(input: &str) -> MatchResult {
    registry().matcher().resolve(input, &world(), &PronounState::new())
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn wearing_and_removing_win_over_taking_and_dropping() {
    assert_eq!(matched(resolve("put hat on")).name, "Wear");
    assert_eq!(matched(resolve("put on hat")).name, "Wear");
    assert_eq!(matched(resolve("take boots off")).name, "Remove");
    assert_eq!(matched(resolve("take off boots")).name, "Remove");
    assert_eq!(matched(resolve("take apple")).name, "Take");
    assert_eq!(matched(resolve("pick apple up")).name, "Take");
    assert_eq!(matched(resolve("put hat down")).name, "Drop");
    assert_eq!(matched(resolve("put hat in box")).name, "PutIn");
}

#[test]
fn movement_forms() {
    let m = matched(resolve("e"));
    assert_eq!(m.name, "Go");
    assert_eq!(m.direction(), Some(Direction::East));
    assert_eq!(matched(resolve("walk west")).direction(), Some(Direction::West));

    let m = matched(resolve("go to the kitchen"));
    assert_eq!(m.name, "GoTo");
    assert_eq!(m.text(), Some("the kitchen"));
}

#[test]
fn synonyms_and_filler_words() {
    let w = world();
    let m = matched(resolve("examine the torch"));
    assert_eq!(m.name, "Examine");
    assert_eq!(m.object(0), w.lookup("flashlight"));
}

#[test]
fn slot_scope_is_a_preference() {
    let w = world();
    // Both hats are visible, but only one is held.
    let m = matched(resolve("wear hat"));
    assert_eq!(m.object(0), w.lookup("top_hat"));
    assert!(matches!(resolve("take hat"), MatchResult::Disambiguate(_)));

    // Out of scope but visible: matched, and left to the command's rules.
    let m = matched(resolve("wear apple"));
    assert_eq!(m.name, "Wear");
    assert_eq!(m.object(0), w.lookup("apple"));

    // Lara is in another room.
    assert_eq!(
        resolve("talk to lara"),
        MatchResult::Failed(ParseError::ObjectNotFound("lara".into()))
    );
}

#[test]
fn take_all_skips_people_and_the_actor() {
    let w = world();
    let m = matched(resolve("take all"));
    let names: Vec<&str> = m.objects(0).iter().map(|id| w.name_of(*id)).collect();
    assert!(names.contains(&"apple"));
    assert!(names.contains(&"flashlight"));
    assert!(!names.contains(&"kyle"));
    assert!(!names.contains(&"me"));
    assert!(!names.contains(&"top_hat"));
    assert!(!names.contains(&"boots"));
    assert!(m.is_multiple());
}

#[test]
fn single_object_commands_refuse_lists() {
    assert_eq!(
        resolve("unlock box and apple"),
        MatchResult::Failed(ParseError::NoMultiples)
    );
}

#[test]
fn unknown_input() {
    assert_eq!(resolve(""), MatchResult::Failed(ParseError::EmptyInput));
    assert_eq!(resolve("xyzzy plugh"), MatchResult::Failed(ParseError::NotUnderstood));
}

// =============================================================================
// Characters and pronouns
// =============================================================================

#[test]
fn addressing_a_character() {
    let w = world();
    let kyle = w.lookup("kyle").unwrap();

    let m = matched(resolve("kyle, take the apple"));
    assert_eq!(m.actor, kyle);
    assert_eq!(m.name, "Take");

    let m = matched(resolve("tell kyle to go east"));
    assert_eq!(m.actor, kyle);
    assert_eq!(m.direction(), Some(Direction::East));

    // Lara is not visible, so the comma form falls back to the player.
    assert_eq!(
        resolve("lara, take apple"),
        MatchResult::Failed(ParseError::NotUnderstood)
    );
}

#[test]
fn pronouns_bind_by_gender_and_number() {
    let w = world();
    let registry = registry();
    let mut pronouns = PronounState::new();
    pronouns.remember(&w, &[w.lookup("kyle").unwrap()]);
    pronouns.remember(&w, &[w.lookup("boots").unwrap()]);

    let m = matched(registry.matcher().resolve("talk to him", &w, &pronouns));
    assert_eq!(m.object(0), w.lookup("kyle"));
    let m = matched(registry.matcher().resolve("take them off", &w, &pronouns));
    assert_eq!(m.object(0), w.lookup("boots"));
    assert_eq!(
        registry.matcher().resolve("talk to her", &w, &pronouns),
        MatchResult::Failed(ParseError::NoReferent("her".into()))
    );
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn commands_for_follow_first_slot_scope() {
    let w = world();
    let registry = registry();
    let hat = registry.commands_for(&w, w.lookup("top_hat").unwrap());
    assert!(hat.contains(&"Wear".to_string()));
    assert!(hat.contains(&"Drop".to_string()));
    assert!(!hat.contains(&"Remove".to_string()));

    let boots = registry.commands_for(&w, w.lookup("boots").unwrap());
    assert!(boots.contains(&"Remove".to_string()));
    assert!(!boots.contains(&"Wear".to_string()));
}

#[test]
fn scope_report_covers_every_scope() {
    let w = world();
    let boots = w.lookup("boots").unwrap();
    let report = ScopeResolver::for_player(&w).report(boots);
    assert!(report.get(Scope::Worn));
    assert!(report.get(Scope::HeldOrWorn));
    assert!(!report.get(Scope::Held));
    assert!(!report.get(Scope::Here));
    assert!(report.get(Scope::Visible));
}

proptest! {
    #[test]
    fn arbitrary_input_never_panics(input in "\\PC{0,60}") {
        let w = world();
        let registry = registry();
        let _ = registry.matcher().resolve(&input, &w, &PronounState::new());
    }

    #[test]
    fn case_and_punctuation_do_not_matter(upper in any::<bool>(), bang in any::<bool>()) {
        let mut input = String::from("take the apple");
        if upper {
            input = input.to_uppercase();
        }
        if bang {
            input.push('!');
        }
        let w = world();
        let m = matched(registry().matcher().resolve(&input, &w, &PronounState::new()));
        prop_assert_eq!(m.name.as_str(), "Take");
        prop_assert_eq!(m.object(0), w.lookup("apple"));
    }
}
