//! Disambiguation round trips through the matcher

use proptest::prelude::*;
use taleforge_engine::standard_registry;
use taleforge_parser::{MatchResult, ParseError, PronounState};
use taleforge_storage::{ObjectDecl, World, WorldBuilder};

const COLOURS: [&str; 6] = ["red", "blue", "green", "striped", "tiny", "heavy"];

fn two_balls(first: &str, second: &str) -> World {
    WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item(&format!("{first}_ball")).at("lounge").takeable())
        .object(ObjectDecl::item(&format!("{second}_ball")).at("lounge").takeable())
        .build()
        .unwrap()
}

fn distinct_pair() -> impl Strategy<Value = (usize, usize)> {
    (0..COLOURS.len(), 0..COLOURS.len()).prop_filter("distinct colours", |(a, b)| a != b)
}

proptest! {
    #[test]
    fn answer_picks_exactly_the_named_ball((a, b) in distinct_pair(), pick_first in any::<bool>()) {
        let (first, second) = (COLOURS[a], COLOURS[b]);
        let world = two_balls(first, second);
        let registry = standard_registry().unwrap();
        let matcher = registry.matcher();
        let pronouns = PronounState::new();

        let MatchResult::Disambiguate(request) = matcher.resolve("take ball", &world, &pronouns) else {
            return Err(TestCaseError::fail("expected a disambiguation question"));
        };
        let prompt = request.prompt();
        let first_label = format!("{first} ball");
        let second_label = format!("{second} ball");
        prop_assert!(prompt.contains(&first_label));
        prop_assert!(prompt.contains(&second_label));

        let (answer, wanted, unwanted) = if pick_first {
            (first, format!("{first}_ball"), format!("{second}_ball"))
        } else {
            (second, format!("{second}_ball"), format!("{first}_ball"))
        };
        let MatchResult::Matched(m) = matcher.disambiguate(answer, request.pending, &world, &pronouns) else {
            return Err(TestCaseError::fail("answer did not resolve"));
        };
        prop_assert_eq!(m.objects(0), &[world.resolve(&wanted).unwrap()][..]);
        prop_assert!(!m.objects(0).contains(&world.resolve(&unwanted).unwrap()));
    }

    #[test]
    fn numbered_answers_follow_the_option_order((a, b) in distinct_pair(), pick in 1usize..=2) {
        let world = two_balls(COLOURS[a], COLOURS[b]);
        let registry = standard_registry().unwrap();
        let matcher = registry.matcher();
        let pronouns = PronounState::new();

        let MatchResult::Disambiguate(request) = matcher.resolve("take ball", &world, &pronouns) else {
            return Err(TestCaseError::fail("expected a disambiguation question"));
        };
        let expected = request.options[pick - 1].1;
        let MatchResult::Matched(m) = matcher.disambiguate(&pick.to_string(), request.pending, &world, &pronouns) else {
            return Err(TestCaseError::fail("number did not resolve"));
        };
        prop_assert_eq!(m.object(0), Some(expected));
    }
}

#[test]
fn answers_outside_the_options_fail() {
    let world = two_balls("red", "blue");
    let registry = standard_registry().unwrap();
    let matcher = registry.matcher();
    let pronouns = PronounState::new();
    let MatchResult::Disambiguate(request) = matcher.resolve("take ball", &world, &pronouns) else {
        panic!("expected a disambiguation question");
    };
    assert_eq!(request.options.len(), 2);
    let result = matcher.disambiguate("green", request.pending, &world, &pronouns);
    assert_eq!(result, MatchResult::Failed(ParseError::ObjectNotFound("green".into())));
}

#[test]
fn exact_alias_beats_partial_match() {
    let world = WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("box").at("lounge").takeable())
        .object(ObjectDecl::item("cardboard_box").at("lounge").takeable())
        .build()
        .unwrap();
    let registry = standard_registry().unwrap();
    let MatchResult::Matched(m) = registry.matcher().resolve("take box", &world, &PronounState::new())
    else {
        panic!("expected a match");
    };
    assert_eq!(m.object(0), world.lookup("box"));
}
