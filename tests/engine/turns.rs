//! Turn outcomes, the clock, turnscripts and undo

use proptest::prelude::*;
use taleforge_engine::{
    BehaviourHooks, EngineConfig, NarrationBuffer, TurnContext, TurnEngine, TurnOutcome,
};
use taleforge_foundation::Value;
use taleforge_storage::{ObjectDecl, World, WorldBuilder};

const POWER: &str = "power";
const LOG: &str = "log";

fn world() -> World {
    WorldBuilder::new()
        .object(ObjectDecl::room("lounge").description("A lounge."))
        .object(ObjectDecl::player("me").at("lounge").field(LOG, ""))
        .object(ObjectDecl::item("apple").at("lounge").takeable())
        .object(ObjectDecl::item("torch").at("me").field(POWER, 100_i64))
        .build()
        .unwrap()
}

fn append(ctx: &mut TurnContext<'_>, tag: &str) {
    let me = ctx.player();
    if let Some(player) = ctx.world.get_mut(me) {
        let log = player.field(LOG).and_then(Value::as_text).unwrap_or_default().to_string();
        player.set_field(LOG, format!("{log}{tag}"));
    }
}

/// Two turnscripts: the first drains the torch and logs "a", the second
/// logs "b". A third never runs because its check is false.
fn engine() -> TurnEngine {
    let mut hooks = BehaviourHooks::new();
    hooks.turnscript(
        "drain",
        |_w: &World| true,
        |ctx: &mut TurnContext<'_>| {
            if let Some(torch) = ctx.world.lookup("torch").and_then(|t| ctx.world.get_mut(t)) {
                let power = torch.field(POWER).and_then(Value::as_int).unwrap_or(0);
                torch.set_field(POWER, power - 1);
            }
            append(ctx, "a");
        },
    );
    hooks.turnscript("second", |_w: &World| true, |ctx: &mut TurnContext<'_>| append(ctx, "b"));
    hooks.turnscript("never", |_w: &World| false, |ctx: &mut TurnContext<'_>| append(ctx, "x"));
    TurnEngine::standard(hooks, EngineConfig::plain()).unwrap()
}

fn power(w: &World) -> i64 {
    w.by_name("torch").and_then(|t| t.field(POWER)).and_then(Value::as_int).unwrap()
}

fn log(w: &World) -> String {
    w.get(w.player())
        .and_then(|p| p.field(LOG))
        .and_then(Value::as_text)
        .unwrap()
        .to_string()
}

fn command() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "look", "inventory", "help", "wait", "z", "take apple", "drop apple", "dance", "x torch",
        "north",
    ])
}

proptest! {
    #[test]
    fn turnscripts_run_once_per_advancing_turn(commands in prop::collection::vec(command(), 1..20)) {
        let mut w = world();
        let mut engine = engine();
        let mut out = NarrationBuffer::new();
        let mut expected_log = String::new();

        for input in commands {
            let before_power = power(&w);
            let before_turn = w.turn();
            let outcome = engine.handle(input, &mut w, &mut out);
            match outcome {
                TurnOutcome::Success => {
                    expected_log.push_str("ab");
                    prop_assert_eq!(power(&w), before_power - 1, "{}", input);
                    prop_assert_eq!(w.turn(), before_turn + 1);
                }
                TurnOutcome::SuccessNoTurnscripts | TurnOutcome::Failed => {
                    prop_assert_eq!(power(&w), before_power, "{}", input);
                    prop_assert_eq!(w.turn(), before_turn);
                }
            }
            prop_assert_eq!(log(&w), expected_log.clone());
        }
    }
}

#[test]
fn outcomes_of_standard_commands() {
    let mut w = world();
    let mut engine = engine();
    let mut out = NarrationBuffer::new();
    assert_eq!(engine.handle("look", &mut w, &mut out), TurnOutcome::SuccessNoTurnscripts);
    assert_eq!(engine.handle("i", &mut w, &mut out), TurnOutcome::SuccessNoTurnscripts);
    assert_eq!(engine.handle("x apple", &mut w, &mut out), TurnOutcome::Success);
    assert_eq!(engine.handle("wait", &mut w, &mut out), TurnOutcome::Success);
    assert_eq!(engine.handle("take torch", &mut w, &mut out), TurnOutcome::Failed);
    assert_eq!(engine.handle("sing loudly", &mut w, &mut out), TurnOutcome::Failed);
    assert_eq!(power(&w), 98);
}

#[test]
fn parse_failures_are_narrated() {
    let mut w = world();
    let mut engine = engine();
    let mut out = NarrationBuffer::new();
    engine.handle("take spoon", &mut w, &mut out);
    assert_eq!(out.take(), vec!["Not finding any object 'spoon'.".to_string()]);
    engine.handle("", &mut w, &mut out);
    assert_eq!(out.take(), vec!["I don't even know where to begin with that.".to_string()]);
    // Braces typed by the player never reach the directive scanner.
    engine.handle("take {b:spoon}", &mut w, &mut out);
    assert!(engine.text().bug_reports().is_empty());
}

#[test]
fn undo_walks_back_through_changing_turns() {
    let mut w = world();
    let mut engine = engine();
    let mut out = NarrationBuffer::new();

    engine.handle("take apple", &mut w, &mut out);
    engine.handle("look", &mut w, &mut out);
    engine.handle("drop apple", &mut w, &mut out);
    // Look changed nothing, so only two snapshots were kept.
    assert_eq!(engine.history_len(), 2);

    let apple = w.resolve("apple").unwrap();
    let lounge = w.resolve("lounge").unwrap();
    assert!(w.location_of(apple).is_in(lounge));

    assert_eq!(engine.handle("undo", &mut w, &mut out), TurnOutcome::SuccessNoTurnscripts);
    assert!(w.location_of(apple).is_in(w.player()));
    assert_eq!(engine.handle("undo", &mut w, &mut out), TurnOutcome::SuccessNoTurnscripts);
    assert!(w.location_of(apple).is_in(lounge));
    assert_eq!(power(&w), 100);
    assert_eq!(w.turn(), 0);
    assert_eq!(engine.handle("undo", &mut w, &mut out), TurnOutcome::Failed);
}

#[test]
fn undo_depth_bounds_history() {
    let mut w = world();
    let mut engine =
        TurnEngine::standard(BehaviourHooks::new(), EngineConfig::plain().with_undo_depth(1))
            .unwrap();
    let mut out = NarrationBuffer::new();
    engine.handle("take apple", &mut w, &mut out);
    engine.handle("drop apple", &mut w, &mut out);
    engine.handle("take apple", &mut w, &mut out);
    assert_eq!(engine.history_len(), 1);

    let mut engine =
        TurnEngine::standard(BehaviourHooks::new(), EngineConfig::plain().with_undo_depth(0))
            .unwrap();
    engine.handle("drop apple", &mut w, &mut out);
    assert_eq!(engine.history_len(), 0);
    out.clear();
    assert_eq!(engine.handle("undo", &mut w, &mut out), TurnOutcome::Failed);
}

#[test]
fn echo_prefixes_the_command() {
    let mut w = world();
    let mut engine = TurnEngine::standard(
        BehaviourHooks::new(),
        EngineConfig::plain().with_echo_commands(true),
    )
    .unwrap();
    let mut out = NarrationBuffer::new();
    engine.handle("take apple", &mut w, &mut out);
    assert_eq!(out.lines(), &["> take apple".to_string(), "You take the apple.".to_string()]);
}
