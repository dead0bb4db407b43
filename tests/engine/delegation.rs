//! Asking other characters to act

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use taleforge_engine::{
    ActionFamily, AgreementRequest, AgreementSource, BehaviourHooks, EngineConfig,
    NarrationBuffer, TurnContext, TurnEngine, TurnOutcome,
};
use taleforge_foundation::{ObjectId, Pronouns};
use taleforge_storage::{Direction, ObjectDecl, World, WorldBuilder};

fn world() -> World {
    WorldBuilder::new()
        .object(ObjectDecl::room("lounge").exit(Direction::North, "garden"))
        .object(ObjectDecl::room("garden").exit(Direction::South, "lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("apple").at("lounge").takeable())
        .object(ObjectDecl::item("chair").at("lounge").furniture())
        .object(ObjectDecl::npc("kyle", Pronouns::Male).alias("Kyle").at("lounge"))
        .object(ObjectDecl::npc("lara", Pronouns::Female).alias("Lara").at("lounge"))
        .build()
        .unwrap()
}

fn id(w: &World, name: &str) -> ObjectId {
    w.resolve(name).unwrap()
}

fn refuse_taking(ctx: &mut TurnContext<'_>, _request: &AgreementRequest) -> bool {
    ctx.msg("'Get it yourself.'");
    false
}

fn agree(_ctx: &mut TurnContext<'_>, _request: &AgreementRequest) -> bool {
    true
}

fn play(
    hooks: BehaviourHooks,
    config: EngineConfig,
    commands: &[&str],
) -> (World, Vec<(TurnOutcome, Vec<String>)>) {
    let mut w = world();
    let mut engine = TurnEngine::standard(hooks, config).unwrap();
    let mut out = NarrationBuffer::new();
    let results = commands
        .iter()
        .map(|input| {
            let outcome = engine.handle(input, &mut w, &mut out);
            (outcome, out.take())
        })
        .collect();
    (w, results)
}

#[test]
fn characters_consent_by_default() {
    let (w, results) = play(
        BehaviourHooks::new(),
        EngineConfig::plain(),
        &["kyle, take apple", "tell kyle to drop apple"],
    );
    assert_eq!(results[0], (TurnOutcome::Success, vec!["Kyle takes the apple.".to_string()]));
    assert_eq!(results[1], (TurnOutcome::Success, vec!["Kyle drops the apple.".to_string()]));
    assert!(w.location_of(id(&w, "apple")).is_in(id(&w, "lounge")));
}

#[test]
fn a_refusal_leaves_the_world_alone() {
    let w = world();
    let mut hooks = BehaviourHooks::new();
    hooks.on_agreement(id(&w, "lara"), ActionFamily::Take, refuse_taking);

    let (w, results) = play(hooks, EngineConfig::plain(), &["lara, take apple", "kyle, take apple"]);
    assert_eq!(results[0], (TurnOutcome::Failed, vec!["'Get it yourself.'".to_string()]));
    assert_eq!(results[1].0, TurnOutcome::Success);
    assert!(w.location_of(id(&w, "apple")).is_in(id(&w, "kyle")));
}

#[test]
fn agreement_order_is_configurable() {
    let w = world();
    let lara = id(&w, "lara");
    let hooks = || {
        let mut hooks = BehaviourHooks::new();
        hooks.on_agreement(lara, ActionFamily::Take, refuse_taking);
        hooks.on_any_agreement(lara, agree);
        hooks
    };

    let (_, results) = play(hooks(), EngineConfig::plain(), &["lara, take apple"]);
    assert_eq!(results[0].0, TurnOutcome::Failed);

    let generic_first = EngineConfig::plain()
        .with_agreement_order(vec![AgreementSource::Generic, AgreementSource::Specific]);
    let (w, results) = play(hooks(), generic_first, &["lara, take apple"]);
    assert_eq!(results[0], (TurnOutcome::Success, vec!["Lara takes the apple.".to_string()]));
    assert!(w.location_of(id(&w, "apple")).is_in(lara));
}

#[test]
fn the_shared_default_covers_every_character() {
    let mut hooks = BehaviourHooks::new();
    hooks.on_npc_agreement(ActionFamily::Go, |ctx: &mut TurnContext<'_>, _r: &AgreementRequest| {
        ctx.msg("'I'd rather stay.'");
        false
    });
    let (w, results) = play(
        hooks,
        EngineConfig::plain(),
        &["kyle, go north", "lara, north", "kyle, take apple"],
    );
    assert_eq!(results[0], (TurnOutcome::Failed, vec!["'I'd rather stay.'".to_string()]));
    assert_eq!(results[1].0, TurnOutcome::Failed);
    assert_eq!(results[2].0, TurnOutcome::Success);
    assert!(w.location_of(id(&w, "kyle")).is_in(id(&w, "lounge")));
}

#[test]
fn the_player_watches_characters_leave() {
    let (w, results) = play(BehaviourHooks::new(), EngineConfig::plain(), &["kyle, go north"]);
    assert_eq!(results[0], (TurnOutcome::Success, vec!["Kyle heads north.".to_string()]));
    assert!(w.location_of(id(&w, "kyle")).is_in(id(&w, "garden")));
    assert_eq!(w.turn(), 1);
}

#[test]
fn some_commands_cannot_be_delegated() {
    let (w, results) = play(
        BehaviourHooks::new(),
        EngineConfig::plain(),
        &["kyle, look", "kyle, x apple", "kyle, talk to lara", "kyle, undo"],
    );
    for (outcome, said) in &results {
        assert_eq!(*outcome, TurnOutcome::Failed);
        assert_eq!(said, &vec!["You can't tell Kyle to do that.".to_string()]);
    }
    assert_eq!(w.turn(), 0);
}

#[test]
fn per_item_commands_ask_once_per_item() {
    let w = world();
    let asked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&asked);
    let mut hooks = BehaviourHooks::new();
    hooks.on_agreement(
        id(&w, "kyle"),
        ActionFamily::Take,
        move |_ctx: &mut TurnContext<'_>, _r: &AgreementRequest| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        },
    );

    // Apple and chair: people and rooms are never part of "all".
    let (w, results) = play(hooks, EngineConfig::plain(), &["kyle, take all"]);
    assert_eq!(asked.load(Ordering::SeqCst), 2);
    assert_eq!(results[0].0, TurnOutcome::Success);
    assert_eq!(results[0].1[0], "Apple: Kyle takes the apple.");
    assert!(w.location_of(id(&w, "apple")).is_in(id(&w, "kyle")));
}
