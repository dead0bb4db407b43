//! The bundled demo world.
//!
//! A small house that exercises every part of the runtime: containers you
//! can see into but not reach, a locked door, a torch that runs down and a
//! charger to fix it, and two characters. Kyle does whatever he is told;
//! Lara has opinions.

use log::warn;
use taleforge_engine::{
    Action, ActionFamily, BehaviourHooks, CommandDef, EngineConfig, HookArgs, ItemOutcome,
    ItemRequest, Rule, TurnContext, TurnEngine, lang,
};
use taleforge_foundation::{DisplayLevel, Location, ObjectId, Pronouns, Result, Value};
use taleforge_parser::{Scope, SlotSpec};
use taleforge_storage::{Direction, ObjectDecl, World, WorldBuilder, WorldObject};

/// Field counting the torch's remaining charge.
pub const POWER_FIELD: &str = "power";
/// Field set once the crates have been pushed aside.
pub const MOVED_FIELD: &str = "moved";
/// Field set once Lara has been complimented.
pub const HAPPY_FIELD: &str = "happy";
/// Field holding the text `read` shows.
pub const TEXT_FIELD: &str = "text";

/// Builds the demo world and an engine with its behaviour wired in.
///
/// # Errors
///
/// Returns an authoring error if the world is malformed.
pub fn build(config: EngineConfig) -> Result<(World, TurnEngine)> {
    let world = world()?;
    let hooks = hooks(&world)?;
    let mut engine = TurnEngine::standard(hooks, config)?;
    engine.registry_mut().register(read_command())?;

    let compartment = world.resolve("charger_compartment")?;
    engine.text_mut().register("charger_state", move |_args, ctx| {
        let closed = ctx.world.get(compartment).is_some_and(WorldObject::is_closed);
        Ok(if closed {
            "The compartment is closed".to_string()
        } else {
            "The compartment is open".to_string()
        })
    });
    Ok((world, engine))
}

// =============================================================================
// World
// =============================================================================

/// Declares the demo world.
///
/// # Errors
///
/// Returns an authoring error if a declaration is malformed.
#[allow(clippy::too_many_lines)]
pub fn world() -> Result<World> {
    WorldBuilder::new()
        // Lounge
        .object(
            ObjectDecl::room("lounge")
                .description("A smelly room with an old settee and a tv.")
                .exit(Direction::East, "kitchen")
                .exit(Direction::West, "dining_room")
                .exit(Direction::Up, "bedroom")
                .field(
                    "hint",
                    "There is a lot in this room! The book can be read. The coin is stuck to \
                     the floor. There are containers too. Kyle is an NPC; you can tell him to do \
                     nearly anything the player character can do (everything except looking and \
                     talking).",
                ),
        )
        .object(
            ObjectDecl::player("me")
                .at("lounge")
                .examine("Someone who really should be doing something else."),
        )
        .object(
            ObjectDecl::item("knife")
                .at("me")
                .takeable()
                .field("sharp", false)
                .examine("{if:knife:sharp:A really sharp knife.:A blunt knife.}"),
        )
        .object(
            ObjectDecl::item("settee")
                .at("lounge")
                .scenery()
                .synonyms(&["couch", "sofa"])
                .examine("It has seen better days."),
        )
        .object(
            ObjectDecl::item("tv")
                .at("lounge")
                .scenery()
                .synonyms(&["telly"])
                .examine("An old-fashioned set with a dial."),
        )
        .object(
            ObjectDecl::item("book")
                .at("lounge")
                .takeable()
                .examine("A leather-bound book.")
                .field(TEXT_FIELD, "It is not in a language you understand."),
        )
        .object(
            ObjectDecl::item("boots")
                .at("lounge")
                .wearable()
                .pronouns(Pronouns::Plural)
                .examine("Some old boots."),
        )
        .object(
            ObjectDecl::item("glass_cabinet")
                .alias("glass cabinet")
                .at("lounge")
                .container(true)
                .locked_with("cabinet_key")
                .examine("A cabinet with a glass front."),
        )
        .object(
            ObjectDecl::item("jewellery_box")
                .alias("jewellery box")
                .at("glass_cabinet")
                .takeable()
                .container(false)
                .openable(false)
                .examine("A nice box."),
        )
        .object(
            ObjectDecl::item("ring")
                .at("jewellery_box")
                .wearable()
                .examine("A ring."),
        )
        .object(
            ObjectDecl::item("ornate_doll")
                .alias("ornate doll")
                .at("glass_cabinet")
                .takeable()
                .examine("A fancy doll, eighteenth century."),
        )
        .object(
            ObjectDecl::item("cardboard_box")
                .alias("cardboard box")
                .at("lounge")
                .container(false)
                .openable(false)
                .examine("A big cardboard box."),
        )
        .object(
            ObjectDecl::item("coin")
                .at("lounge")
                .takeable()
                .examine("A gold coin."),
        )
        .object(
            ObjectDecl::item("cabinet_key")
                .alias("small key")
                .at("lounge")
                .takeable()
                .examine("A small key."),
        )
        .object(
            ObjectDecl::item("flashlight")
                .at("lounge")
                .takeable()
                .switchable(false)
                .synonyms(&["torch"])
                .field(POWER_FIELD, 2_i64)
                .examine("A small black torch.{if:flashlight:dead: It seems to be dead.}"),
        )
        .object(
            ObjectDecl::npc("kyle", Pronouns::Male)
                .alias("Kyle")
                .at("lounge")
                .examine("A grizzly bear. But cute."),
        )
        .object(
            ObjectDecl::item("straw_boater")
                .alias("straw boater")
                .at("kyle")
                .worn()
                .examine("A straw boater."),
        )
        .object(
            ObjectDecl::topic("kyle_garden", "kyle", true)
                .alias("What's the deal with the garden?")
                .reveals("kyle_garden_again")
                .examine("You ask Kyle about the garden, but he's not talking."),
        )
        .object(
            ObjectDecl::topic("kyle_garden_again", "kyle", false)
                .alias("Seriously, what's the deal with the garden?")
                .examine("You ask Kyle about the garden, but he's STILL not talking."),
        )
        .object(
            ObjectDecl::topic("kyle_weather", "kyle", true)
                .alias("The weather")
                .examine("You talk to Kyle about the weather."),
        )
        // Dining room
        .object(
            ObjectDecl::room("dining_room")
                .alias("dining room")
                .description("An old-fashioned room.")
                .exit(Direction::East, "lounge")
                .field(
                    "hint",
                    "This room features an NPC who will sometimes do as you ask. Compliment \
                     her, and she will go to another room, and will then pick things up and \
                     drop them (but not bricks).",
                ),
        )
        .object(
            ObjectDecl::item("chair")
                .at("dining_room")
                .furniture()
                .examine("A wooden chair."),
        )
        .object(
            ObjectDecl::item("brick")
                .at("dining_room")
                .takeable()
                .examine("A brick is a brick."),
        )
        .object(
            ObjectDecl::npc("lara", Pronouns::Female)
                .alias("Lara")
                .at("dining_room")
                .field(HAPPY_FIELD, false)
                .examine("A normal-sized bunny."),
        )
        .object(
            ObjectDecl::topic("lara_garage_key", "lara", true)
                .alias("Can I have the garage key?")
                .examine(
                    "You ask Lara about the garage key; she agrees to give it to you if you \
                     give her a ring. Perhaps there is one in the glass cabinet?",
                ),
        )
        .object(ObjectDecl::topic("lara_attractive", "lara", true).alias("You're very attractive"))
        .object(
            ObjectDecl::item("garage_key")
                .alias("garage key")
                .takeable()
                .examine("A big key."),
        )
        // Kitchen and basement
        .object(
            ObjectDecl::room("kitchen")
                .description("A clean room.{once: A fresh smell here!}")
                .exit(Direction::West, "lounge")
                .exit_through(Direction::Down, "basement", "trapdoor")
                .exit_through(Direction::North, "garage", "garage_door")
                .field(
                    "hint",
                    "This room features two doors that open and close. The garage door needs \
                     a key.",
                ),
        )
        .object(
            ObjectDecl::item("trapdoor")
                .at("kitchen")
                .openable(true)
                .examine("A small trapdoor in the floor."),
        )
        .object(
            ObjectDecl::item("camera")
                .at("kitchen")
                .takeable()
                .synonyms(&["picture box"])
                .examine("A cheap digital camera."),
        )
        .object(
            ObjectDecl::item("big_kitchen_table")
                .alias("kitchen table")
                .at("kitchen")
                .container(false)
                .examine("A Formica table."),
        )
        .object(
            ObjectDecl::item("garage_door")
                .alias("garage door")
                .at("kitchen")
                .locked_with("garage_key")
                .examine("The door to the garage."),
        )
        .object(
            ObjectDecl::room("basement")
                .description("A dank room, with piles of crates everywhere.")
                .exit(Direction::Up, "kitchen")
                .field(
                    "hint",
                    "The crates look like they could be moved. There is a torch in the lounge \
                     that may be useful.",
                ),
        )
        .object(
            ObjectDecl::item("light_switch")
                .alias("light switch")
                .at("basement")
                .switchable(false)
                .examine("A switch, presumably for the light."),
        )
        .object(
            ObjectDecl::item("crates")
                .at("basement")
                .pronouns(Pronouns::Plural)
                .field(MOVED_FIELD, false)
                .examine("A bunch of old crates."),
        )
        // Garage
        .object(
            ObjectDecl::room("garage")
                .description("An empty garage.")
                .exit_through(Direction::South, "kitchen", "garage_door")
                .field("hint", "The garage features a complex mechanism, with two components."),
        )
        .object(ObjectDecl::item("charger").at("garage").examine(
            "A device bigger than a washing machine to charge a torch? It has a compartment and \
             a button. {charger_state}.",
        ))
        .object(
            ObjectDecl::item("charger_compartment")
                .alias("compartment")
                .at("garage")
                .container(false)
                .openable(true)
                .examine(
                    "The compartment is just the right size for the torch. It is \
                     {if:charger_compartment:closed:closed:open}.",
                ),
        )
        .object(
            ObjectDecl::item("charger_button")
                .alias("button")
                .at("garage")
                .examine("A big red button."),
        )
        // Upstairs
        .object(
            ObjectDecl::room("bedroom")
                .description("A large room, with a big bed and a wardrobe.")
                .exit(Direction::Down, "lounge")
                .exit(Direction::In, "wardrobe")
                .field("hint", "The bedroom has a variety of garments that can be put on."),
        )
        .object(
            ObjectDecl::item("bed")
                .at("bedroom")
                .scenery()
                .furniture()
                .examine("Big and soft."),
        )
        .object(
            ObjectDecl::room("wardrobe")
                .at("bedroom")
                .description("Oddly empty of fantasy worlds.")
                .exit(Direction::Out, "bedroom")
                .examine("It is so big you could probably get inside it."),
        )
        .object(
            ObjectDecl::item("jeans")
                .at("bedroom")
                .wearable()
                .pronouns(Pronouns::Plural)
                .examine("Clean!"),
        )
        .object(ObjectDecl::item("shirt").at("bedroom").wearable().examine("Clean!"))
        .object(ObjectDecl::item("coat").at("bedroom").wearable().examine("Clean!"))
        // Everywhere
        .object(
            ObjectDecl::item("walls")
                .ubiquitous()
                .scenery()
                .pronouns(Pronouns::Plural)
                .synonyms(&["wall"])
                .examine("They're walls, what are you expecting?"),
        )
        .build()
}

// =============================================================================
// Behaviour
// =============================================================================

fn power(ctx: &TurnContext<'_>, torch: ObjectId) -> i64 {
    ctx.get(torch)
        .and_then(|o| o.field(POWER_FIELD))
        .and_then(Value::as_int)
        .unwrap_or(0)
}

fn flag(ctx: &TurnContext<'_>, id: ObjectId, field: &str) -> bool {
    ctx.get(id)
        .and_then(|o| o.field(field))
        .is_some_and(Value::is_truthy)
}

fn set_field(ctx: &mut TurnContext<'_>, id: ObjectId, field: &str, value: impl Into<Value>) {
    if let Some(obj) = ctx.world.get_mut(id) {
        obj.set_field(field, value);
    }
}

/// "You push" / "Kyle pushes".
fn acts(ctx: &TurnContext<'_>, actor: ObjectId, verb: &str) -> String {
    ctx.get(actor)
        .map_or_else(|| "Someone".to_string(), |a| lang::subject_verb(a, verb))
}

/// Wires per-object behaviour for the demo world.
///
/// # Errors
///
/// Returns `UnknownObject` if the world lacks an object the demo needs.
#[allow(clippy::too_many_lines)]
pub fn hooks(world: &World) -> Result<BehaviourHooks> {
    let mut hooks = BehaviourHooks::new();
    let coin = world.resolve("coin")?;
    let knife = world.resolve("knife")?;
    let flashlight = world.resolve("flashlight")?;
    let crates = world.resolve("crates")?;
    let light_switch = world.resolve("light_switch")?;
    let compartment = world.resolve("charger_compartment")?;
    let button = world.resolve("charger_button")?;
    let kyle = world.resolve("kyle")?;
    let lara = world.resolve("lara")?;
    let lara_attractive = world.resolve("lara_attractive")?;
    let ring = world.resolve("ring")?;
    let garage_key = world.resolve("garage_key")?;
    let brick = world.resolve("brick")?;

    hooks.on(coin, Action::Take, |ctx, args| {
        let tries = acts(ctx, args.actor, "try");
        ctx.msg(&format!("{tries} to pick up the coin, but it just will not budge."));
        ItemOutcome::Failed
    });

    // The torch and its charger
    hooks.accessor(flashlight, "dead", |world, id| {
        let power = world
            .get(id)
            .and_then(|o| o.field(POWER_FIELD))
            .and_then(Value::as_int)
            .unwrap_or(0);
        Value::Bool(power < 0)
    });
    hooks.on(flashlight, Action::CanSwitchOn, move |ctx, _args| {
        if power(ctx, flashlight) < 0 {
            ctx.msg("The torch is dead.");
            ItemOutcome::Failed
        } else {
            ItemOutcome::Succeeded
        }
    });
    hooks.turnscript(
        "flashlight",
        move |world| world.get(flashlight).is_some_and(WorldObject::is_on),
        move |ctx| {
            let remaining = power(ctx, flashlight) - 1;
            set_field(ctx, flashlight, POWER_FIELD, remaining);
            if remaining == 2 {
                ctx.msg("The torch flickers.");
            }
            if remaining < 0 {
                ctx.msg("The torch flickers and dies.{once: Perhaps there is a charger in the garage?}");
                if let Some(switch) = ctx.world.get_mut(flashlight).and_then(|o| o.switchable.as_mut()) {
                    switch.on = false;
                }
            }
        },
    );
    hooks.on(flashlight, Action::Charge, move |ctx, args| {
        let pushes = acts(ctx, args.actor, "push");
        ctx.msg(&format!("{pushes} the button. There is a brief hum of power, and a flash."));
        set_field(ctx, flashlight, POWER_FIELD, 20_i64);
        ItemOutcome::Succeeded
    });
    hooks.on(knife, Action::Charge, move |ctx, _args| {
        ctx.msg("There is a loud bang, and the knife is destroyed.");
        if let Err(err) = ctx.world.set_display(knife, DisplayLevel::Deleted) {
            warn!("could not remove the knife: {err}");
        }
        ItemOutcome::Failed
    });
    hooks.on(button, Action::Push, move |ctx, args| {
        let pushes = acts(ctx, args.actor, "push");
        let closed = ctx.get(compartment).is_some_and(WorldObject::is_closed);
        let Some(content) = ctx.world.contents(compartment).first().copied().filter(|_| closed)
        else {
            ctx.msg(&format!("{pushes} the button, but nothing happens."));
            return ItemOutcome::Failed;
        };
        let charge = HookArgs::new(content, args.actor).with_other(args.object);
        match ctx.run_hook(Action::Charge, &charge) {
            Some(outcome) => outcome,
            None => {
                ctx.msg(&format!(
                    "{pushes} the button. There is a brief hum of power, but nothing happens."
                ));
                ItemOutcome::Failed
            }
        }
    });

    // The basement
    hooks.on(crates, Action::Push, move |ctx, args| {
        let moves = acts(ctx, args.actor, "move");
        ctx.msg(&format!("{moves} the crates, so the light switch is accessible."));
        set_field(ctx, crates, MOVED_FIELD, true);
        ItemOutcome::Succeeded
    });
    hooks.on(light_switch, Action::CanSwitchOn, move |ctx, _args| {
        if flag(ctx, crates, MOVED_FIELD) {
            ItemOutcome::Succeeded
        } else {
            ctx.msg("You cannot reach the light switch, without first moving the crates.");
            ItemOutcome::Failed
        }
    });

    // Kyle
    hooks.on(kyle, Action::Talk, |ctx, args| {
        let talked = ctx
            .get(args.object)
            .and_then(|o| o.npc.as_ref())
            .map_or(0, |npc| npc.talked);
        match talked {
            0 => ctx.msg("You say 'Hello,' to Kyle, and he replies in kind."),
            1 => ctx.msg("You ask Kyle how to get upstairs. 'You know,' he replies, 'I have no idea.'"),
            2 => {
                ctx.msg("'Where do you sleep?' you ask Kyle.");
                ctx.msg("'What's \"sleep\"?'");
            }
            _ => ctx.msg("You wonder what you can talk to Kyle about."),
        }
        ItemOutcome::Succeeded
    });

    // Lara
    hooks.on(lara, Action::Give, move |ctx, args| {
        if args.other != Some(ring) {
            ctx.msg("'Why would I want {i:that}?'");
            return ItemOutcome::Failed;
        }
        ctx.msg(
            "'Oh, my,' says Lara. 'How delightful.' She slips the ring on her finger, then hands \
             you a key.",
        );
        let moved = ctx
            .world
            .move_to(ring, Location::In(lara))
            .and_then(|()| ctx.world.move_to(garage_key, Location::In(args.actor)));
        if let Err(err) = moved {
            warn!("Lara's exchange failed: {err}");
            return ItemOutcome::Failed;
        }
        if let Some(wearable) = ctx.world.get_mut(ring).and_then(|o| o.wearable.as_mut()) {
            wearable.worn = true;
        }
        ItemOutcome::Succeeded
    });
    hooks.on(lara_attractive, Action::Topic, move |ctx, _args| {
        ctx.msg(
            "You tell Lara she looks very attractive. 'Why thank you!' she replies, smiling at \
             last.",
        );
        set_field(ctx, lara, HAPPY_FIELD, true);
        ItemOutcome::Succeeded
    });
    hooks.on_agreement(lara, ActionFamily::Take, move |ctx, request| {
        if request.object == Some(brick) {
            ctx.msg("'I'm not picking up any bricks,' says Lara indignantly.");
            return false;
        }
        true
    });
    hooks.on_agreement(lara, ActionFamily::Go, move |ctx, request| {
        if flag(ctx, lara, HAPPY_FIELD) {
            return true;
        }
        let way = request.direction.map_or("that way", Direction::name);
        ctx.msg(&format!(
            "'I'm not going {way},' says Lara indignantly. 'I don't like that room.'"
        ));
        false
    });
    hooks.on_agreement(lara, ActionFamily::Drop, |_ctx, _request| true);
    hooks.on_agreement(lara, ActionFamily::SitOn, move |ctx, _request| {
        if flag(ctx, lara, HAPPY_FIELD) {
            return true;
        }
        ctx.msg("'I don't think so!' says Lara indignantly.");
        false
    });
    hooks.on_any_agreement(lara, |ctx, _request| {
        ctx.msg("'I'm not doing that!' says Lara indignantly.");
        false
    });

    Ok(hooks)
}

// =============================================================================
// Extra commands
// =============================================================================

fn read(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let text = ctx
        .get(request.item)
        .and_then(|o| o.field(TEXT_FIELD))
        .and_then(Value::as_text)
        .map(str::to_string);
    match text {
        Some(text) => {
            ctx.msg(&text);
            ItemOutcome::Succeeded
        }
        None => ItemOutcome::NotApplicable,
    }
}

/// `read BOOK`: shows a held object's text.
#[must_use]
pub fn read_command() -> CommandDef {
    CommandDef::per_item("Read", read)
        .pattern("read <obj>")
        .slot(SlotSpec::new(Scope::Held))
        .rule(Rule::held())
        .failure("There is nothing written on {nm:item:the}.")
}
