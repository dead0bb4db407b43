//! Behaviour hooks driven through player commands

use taleforge_engine::{
    Action, BehaviourHooks, Capability, EngineConfig, HookArgs, ItemOutcome, NarrationBuffer,
    TurnContext, TurnEngine, TurnOutcome,
};
use taleforge_foundation::{Location, Pronouns, Value};
use taleforge_storage::{ObjectDecl, World, WorldBuilder};

const POWER: &str = "power";

fn world() -> World {
    WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("apple").at("lounge").takeable())
        .object(ObjectDecl::item("hat").at("lounge").takeable().wearable())
        .object(ObjectDecl::item("stone").at("lounge"))
        .object(
            ObjectDecl::item("torch")
                .at("me")
                .switchable(false)
                .field(POWER, 0_i64),
        )
        .object(ObjectDecl::item("ring").at("me").takeable())
        .object(ObjectDecl::item("knife").at("me").takeable())
        .object(ObjectDecl::npc("lara", Pronouns::Female).alias("Lara").at("lounge"))
        .build()
        .unwrap()
}

fn id(w: &World, name: &str) -> taleforge_foundation::ObjectId {
    w.resolve(name).unwrap()
}

fn say(text: &'static str) -> impl Fn(&mut TurnContext<'_>, &HookArgs) -> ItemOutcome {
    move |ctx: &mut TurnContext<'_>, _args: &HookArgs| {
        ctx.msg(text);
        ItemOutcome::Succeeded
    }
}

fn hooks(w: &World) -> BehaviourHooks {
    let mut hooks = BehaviourHooks::new();

    hooks.on(id(w, "apple"), Action::Examine, say("A shiny apple."));
    hooks.on_capability(Capability::Wearable, Action::Examine, say("It looks comfortable."));
    hooks.on_any(Action::Examine, say("Nothing remarkable."));

    // Hook messages are templates too, so they can read accessors.
    hooks.on(
        id(w, "torch"),
        Action::Examine,
        say("{if:torch:dead:It is out of power.:It has power.}"),
    );

    hooks.on(id(w, "stone"), Action::Push, |_ctx: &mut TurnContext<'_>, _args: &HookArgs| {
        ItemOutcome::NotApplicable
    });

    hooks.on(id(w, "apple"), Action::Take, |ctx: &mut TurnContext<'_>, _args: &HookArgs| {
        ctx.msg("The apple is glued to the table.");
        ItemOutcome::Failed
    });

    hooks.on_capability(
        Capability::Switchable,
        Action::CanSwitchOn,
        |ctx: &mut TurnContext<'_>, args: &HookArgs| {
            let power = ctx
                .get(args.object)
                .and_then(|o| o.field(POWER))
                .and_then(Value::as_int)
                .unwrap_or(0);
            if power < 1 {
                ctx.msg("The battery is dead.");
                ItemOutcome::Failed
            } else {
                ItemOutcome::Succeeded
            }
        },
    );
    hooks.accessor(id(w, "torch"), "dead", |w: &World, torch| {
        let power = w.get(torch).and_then(|o| o.field(POWER)).and_then(Value::as_int);
        Value::from(power.unwrap_or(0) < 1)
    });

    let ring = id(w, "ring");
    hooks.on(id(w, "lara"), Action::Give, move |ctx: &mut TurnContext<'_>, args: &HookArgs| {
        match args.other {
            Some(item) if item == ring => {
                if ctx.world.move_to(item, Location::In(args.object)).is_err() {
                    return ItemOutcome::Failed;
                }
                ctx.msg("'Oh, thank you!' says Lara.");
                ItemOutcome::Succeeded
            }
            _ => {
                ctx.msg("'No thanks.'");
                ItemOutcome::Failed
            }
        }
    });
    hooks
}

fn setup() -> (World, TurnEngine, NarrationBuffer) {
    let w = world();
    let engine = TurnEngine::standard(hooks(&w), EngineConfig::plain()).unwrap();
    (w, engine, NarrationBuffer::new())
}

#[test]
fn examine_falls_back_from_instance_to_capability_to_generic() {
    let (mut w, mut engine, mut out) = setup();
    for input in ["x apple", "x hat", "x stone"] {
        assert_eq!(engine.handle(input, &mut w, &mut out), TurnOutcome::Success);
    }
    assert_eq!(
        out.take(),
        vec!["A shiny apple.", "It looks comfortable.", "Nothing remarkable."]
    );
}

#[test]
fn not_applicable_uses_the_command_failure() {
    let (mut w, mut engine, mut out) = setup();
    assert_eq!(engine.handle("push stone", &mut w, &mut out), TurnOutcome::Failed);
    assert_eq!(out.take(), vec!["It does not work like that."]);
}

#[test]
fn instance_hook_replaces_the_built_in_take() {
    let (mut w, mut engine, mut out) = setup();
    assert_eq!(engine.handle("take apple", &mut w, &mut out), TurnOutcome::Failed);
    assert_eq!(out.take(), vec!["The apple is glued to the table."]);
    let apple = id(&w, "apple");
    assert!(w.location_of(apple).is_in(id(&w, "lounge")));

    // Other takeable things keep the built-in behaviour.
    assert_eq!(engine.handle("take hat", &mut w, &mut out), TurnOutcome::Success);
    assert_eq!(out.take(), vec!["You take the hat."]);
}

#[test]
fn permission_hook_guards_switching_on() {
    let (mut w, mut engine, mut out) = setup();
    engine.handle("x torch", &mut w, &mut out);
    assert_eq!(out.take(), vec!["It is out of power."]);

    assert_eq!(engine.handle("turn on torch", &mut w, &mut out), TurnOutcome::Failed);
    assert_eq!(out.take(), vec!["The battery is dead."]);
    assert!(!w.by_name("torch").unwrap().is_on());

    let torch = id(&w, "torch");
    w.get_mut(torch).unwrap().set_field(POWER, 5_i64);
    engine.handle("x torch", &mut w, &mut out);
    assert_eq!(out.take(), vec!["It has power."]);
    assert_eq!(engine.handle("turn torch on", &mut w, &mut out), TurnOutcome::Success);
    assert_eq!(out.take(), vec!["You switch the torch on."]);
    assert!(w.by_name("torch").unwrap().is_on());
}

#[test]
fn characters_decide_what_they_accept() {
    let (mut w, mut engine, mut out) = setup();
    assert_eq!(engine.handle("give knife to lara", &mut w, &mut out), TurnOutcome::Failed);
    assert_eq!(out.take(), vec!["'No thanks.'"]);

    assert_eq!(engine.handle("give ring to lara", &mut w, &mut out), TurnOutcome::Success);
    assert_eq!(out.take(), vec!["'Oh, thank you!' says Lara."]);
    assert!(w.location_of(id(&w, "ring")).is_in(id(&w, "lara")));
}

#[test]
fn giving_to_a_thing_is_refused() {
    let (mut w, mut engine, mut out) = setup();
    assert_eq!(engine.handle("give knife to stone", &mut w, &mut out), TurnOutcome::Failed);
    assert_eq!(out.take(), vec!["You can't do that with the stone."]);
}
