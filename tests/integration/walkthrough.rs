//! The bundled demo played from start to finish

use taleforge_engine::{EngineConfig, TurnOutcome};
use taleforge_foundation::{Location, Value};
use taleforge_runtime::{Repl, ScriptEditor, Session};
use taleforge_runtime::demo::POWER_FIELD;

const WALKTHROUGH: &str = include_str!("../../demos/walkthrough.txt");

fn session() -> Session {
    Session::demo(EngineConfig::plain()).unwrap()
}

fn parent(session: &Session, name: &str) -> String {
    let world = session.world();
    match world.location_of(world.resolve(name).unwrap()) {
        Location::In(parent) => world.name_of(parent).to_string(),
        other => other.to_string(),
    }
}

fn commands() -> Vec<&'static str> {
    WALKTHROUGH
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect()
}

#[test]
fn every_walkthrough_step_succeeds() {
    let mut session = session();
    for input in commands() {
        let turn = session.play(input);
        assert_ne!(turn.outcome, TurnOutcome::Failed, "`{input}` failed: {:?}", turn.lines);
    }

    assert_eq!(parent(&session, "ring"), "lara");
    assert_eq!(parent(&session, "garage_key"), "me");
    assert_eq!(parent(&session, "flashlight"), "me");
    assert_eq!(parent(&session, "me"), "garage");

    let torch = session.world().by_name("flashlight").unwrap();
    assert!(torch.is_on());
    // Charged to 20, then one turn of use.
    assert_eq!(torch.field(POWER_FIELD).and_then(Value::as_int), Some(19));
    assert!(session.bug_reports().is_empty());
}

#[test]
fn key_moments_are_narrated() {
    let mut session = session();
    let transcript = session.play_all(commands());
    for expected in [
        "You take the flashlight.",
        "You unlock the glass cabinet.",
        "'Oh, my,' says Lara. 'How delightful.' She slips the ring on her finger, then hands \
         you a key.",
        "A clean room. A fresh smell here!",
        "You unlock the garage door.",
        "An empty garage.",
        "You put the flashlight in the compartment.",
        "You push the button. There is a brief hum of power, and a flash.",
        "You switch the flashlight on.",
    ] {
        assert!(
            transcript.iter().any(|l| l == expected),
            "missing {expected:?} in {transcript:#?}"
        );
    }
}

#[test]
fn first_visit_text_appears_once() {
    let mut session = session();
    let first = session.play("e").lines;
    assert_eq!(first[0], "A clean room. A fresh smell here!");
    session.play("w");
    let second = session.play("e").lines;
    assert_eq!(second[0], "A clean room.");
}

#[test]
fn the_script_runner_matches_playing_by_hand() {
    let mut by_hand = session();
    let mut expected = by_hand.opening();
    expected.extend(by_hand.play_all(commands()));

    let mut repl = Repl::with_editor(ScriptEditor::default(), session()).without_banner();
    let transcript = repl.run_script(WALKTHROUGH);
    assert_eq!(transcript, expected);
    assert_eq!(repl.session().turn(), by_hand.turn());
}

#[test]
fn same_seed_same_transcript() {
    let play = |seed| {
        let mut session = Session::demo(EngineConfig::plain().with_rng_seed(seed)).unwrap();
        session.play_all(commands())
    };
    assert_eq!(play(7), play(7));
}

#[test]
fn undo_steps_back_through_the_walkthrough() {
    let mut session = session();
    session.play_all(["take small key", "unlock cabinet", "look"]);
    assert!(!session.world().by_name("glass_cabinet").unwrap().is_locked());

    let turn = session.play("undo");
    assert_eq!(turn.outcome, TurnOutcome::SuccessNoTurnscripts);
    assert!(session.world().by_name("glass_cabinet").unwrap().is_locked());
    assert_eq!(parent(&session, "cabinet_key"), "me");

    session.play("undo");
    assert_eq!(parent(&session, "cabinet_key"), "lounge");
    assert_eq!(session.turn(), 0);
}
