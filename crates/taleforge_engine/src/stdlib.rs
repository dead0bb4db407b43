//! The standard command library.
//!
//! Registration order is match precedence: the first command whose pattern
//! fits the input wins, so "take boots off" must reach `Remove` before
//! `Take` sees it, and "put boots on" must reach `Wear` before `PutIn`.
//!
//! Every per-item effect gives the object's behaviour hook the first word;
//! the built-in behaviour only runs when no hook resolves.

use log::warn;
use taleforge_foundation::{Location, ObjectId, Result, Value};
use taleforge_parser::{
    CommandMatch, NounPhrase, NounResolver, Scope, ScopeResolver, SlotSpec, Vocabulary,
};
use taleforge_storage::{Exit, WorldObject};

use crate::command::{CommandDef, CommandRegistry, ItemRequest};
use crate::context::TurnContext;
use crate::delegation::ActionFamily;
use crate::hooks::{Action, HookArgs};
use crate::lang;
use crate::outcome::{ItemOutcome, TurnOutcome};
use crate::rules::Rule;

/// Field holding a character's posture ("sitting").
pub const POSTURE_FIELD: &str = "posture";
/// Field holding the furniture a character is on.
pub const POSTURE_FURNITURE_FIELD: &str = "posture_furniture";
/// Room field shown by `help`.
pub const HINT_FIELD: &str = "hint";

/// Builds a registry holding the standard commands.
///
/// # Errors
///
/// Returns an error if a pattern fails to compile.
pub fn standard_registry() -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    register_standard(&mut registry)?;
    Ok(registry)
}

/// Registers the standard commands in precedence order.
///
/// # Errors
///
/// Returns `DuplicateCommand` if a standard name is already taken.
pub fn register_standard(registry: &mut CommandRegistry) -> Result<()> {
    for def in standard_commands() {
        registry.register(def)?;
    }
    Ok(())
}

fn standard_commands() -> Vec<CommandDef> {
    vec![
        // Meta and whole-room commands
        CommandDef::command("Look", look)
            .pattern("look|l")
            .not_delegable(),
        CommandDef::command("Inventory", inventory).pattern("inventory|inv|i"),
        CommandDef::command("Wait", wait).pattern("wait|z"),
        CommandDef::command("Help", help)
            .pattern("help|hint")
            .not_delegable(),
        CommandDef::command("Undo", undo).pattern("undo").not_delegable(),
        // Object commands
        CommandDef::per_item("Examine", examine)
            .pattern("examine|x|look_at <obj>")
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::visible())
            .not_delegable(),
        CommandDef::per_item("Wear", wear)
            .pattern("wear|don|put_on <obj>")
            .pattern("put <obj> on")
            .slot(SlotSpec::new(Scope::Held).multiple())
            .rule(Rule::held()),
        CommandDef::per_item("Remove", remove)
            .pattern("remove|doff|take_off <obj>")
            .pattern("take <obj> off")
            .slot(SlotSpec::new(Scope::Worn).multiple())
            .rule(Rule::worn()),
        CommandDef::per_item("Take", take)
            .pattern("take|get|pick_up <obj>")
            .pattern("pick <obj> up")
            .slot(
                SlotSpec::new(Scope::Visible)
                    .multiple_from(|s, id| s.is_reachable(id) && !s.is_held_or_worn(id)),
            )
            .rule(Rule::not_self())
            .rule(Rule::not_held())
            .rule(Rule::reachable())
            .family(ActionFamily::Take),
        CommandDef::per_item("Drop", drop_item)
            .pattern("drop|put_down <obj>")
            .pattern("put <obj> down")
            .slot(SlotSpec::new(Scope::HeldOrWorn).multiple())
            .rule(Rule::held_not_worn())
            .family(ActionFamily::Drop),
        CommandDef::per_item("Open", open)
            .pattern("open <obj>")
            .slot(SlotSpec::new(Scope::Visible).multiple())
            .rule(Rule::reachable()),
        CommandDef::per_item("Close", close)
            .pattern("close|shut <obj>")
            .slot(SlotSpec::new(Scope::Visible).multiple())
            .rule(Rule::reachable()),
        CommandDef::per_item("Unlock", unlock)
            .pattern("unlock <obj>")
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::reachable()),
        CommandDef::per_item("Lock", lock)
            .pattern("lock <obj>")
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::reachable()),
        CommandDef::per_item("PutIn", put_in)
            .pattern("put|place <obj> in|into|inside <obj>")
            .slot(SlotSpec::new(Scope::HeldOrWorn).multiple())
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::held_not_worn()),
        CommandDef::per_item("Give", give)
            .pattern("give <obj> to <obj>")
            .slot(SlotSpec::new(Scope::HeldOrWorn).multiple())
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::held_not_worn()),
        CommandDef::per_item("SwitchOn", switch_on)
            .pattern("switch_on|turn_on <obj>")
            .pattern("switch|turn <obj> on")
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::reachable()),
        CommandDef::per_item("SwitchOff", switch_off)
            .pattern("switch_off|turn_off <obj>")
            .pattern("switch|turn <obj> off")
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::reachable()),
        CommandDef::per_item("Push", push)
            .pattern("push|press|move|shift <obj>")
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::reachable()),
        CommandDef::per_item("SitOn", sit_on)
            .pattern("sit_on|sit_in <obj>")
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::reachable())
            .family(ActionFamily::SitOn),
        // Conversation
        CommandDef::per_item("TalkTo", talk_to)
            .pattern("talk_to|speak_to <obj>")
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::visible())
            .not_delegable(),
        CommandDef::command("AskAbout", ask_about)
            .pattern("ask <obj> about <text>")
            .slot(SlotSpec::new(Scope::Visible))
            .rule(Rule::visible())
            .not_delegable(),
        // Movement
        CommandDef::command("GoTo", go_to)
            .pattern("go_to|goto|head_to <text>")
            .family(ActionFamily::Go),
        CommandDef::command("Go", go)
            .pattern("go|walk|head <dir>")
            .pattern("<dir>")
            .family(ActionFamily::Go),
    ]
}

// =============================================================================
// Helpers
// =============================================================================

fn pair(ctx: &TurnContext<'_>, request: &ItemRequest<'_>) -> Option<(WorldObject, WorldObject)> {
    Some((ctx.snapshot(request.actor)?, ctx.snapshot(request.item)?))
}

fn hook_args(request: &ItemRequest<'_>) -> HookArgs {
    HookArgs::new(request.item, request.actor).with_multiple(request.multiple)
}

/// Narrates `message` and fails the item.
fn refuse(ctx: &mut TurnContext<'_>, message: &str) -> ItemOutcome {
    ctx.msg(message);
    ItemOutcome::Failed
}

fn move_item(ctx: &mut TurnContext<'_>, actor: &WorldObject, item: ObjectId, to: Location) -> bool {
    match ctx.world.move_to(item, to) {
        Ok(()) => true,
        Err(err) => {
            warn!("move of {} refused: {err}", ctx.world.name_of(item));
            ctx.msg(&lang::inside_itself(actor));
            false
        }
    }
}

/// Things listed inside an open or transparent container.
fn visible_contents(ctx: &TurnContext<'_>, container: ObjectId) -> Vec<WorldObject> {
    ctx.world
        .contents(container)
        .into_iter()
        .filter_map(|id| ctx.get(id))
        .filter(|o| o.display.in_room_listing() || o.display.in_inventory_listing())
        .cloned()
        .collect()
}

/// Describes the room `actor` is in: description, listed objects, exits.
pub fn describe_room(ctx: &mut TurnContext<'_>, actor: ObjectId) {
    let Some(room) = ctx.world.room_of(actor).and_then(|r| ctx.snapshot(r)) else {
        return;
    };
    if let Some(description) = &room.description {
        ctx.msg(description);
    }

    let scope = ScopeResolver::new(&*ctx.world, actor);
    let listed: Vec<WorldObject> = ctx
        .world
        .contents(room.id())
        .into_iter()
        .filter(|id| scope.is_here_listed(*id))
        .filter_map(|id| ctx.get(id).cloned())
        .collect();
    let refs: Vec<&WorldObject> = listed.iter().collect();
    if let Some(line) = lang::you_can_see(&refs) {
        ctx.msg(&line);
    }

    let directions: Vec<&str> = ctx
        .world
        .exits(room.id())
        .iter()
        .map(|e| e.direction.name())
        .collect();
    if let Some(line) = lang::you_can_go(&directions) {
        ctx.msg(&line);
    }
}

// =============================================================================
// Meta and room commands
// =============================================================================

fn look(ctx: &mut TurnContext<'_>, matched: &CommandMatch) -> TurnOutcome {
    describe_room(ctx, matched.actor);
    TurnOutcome::SuccessNoTurnscripts
}

fn inventory(ctx: &mut TurnContext<'_>, matched: &CommandMatch) -> TurnOutcome {
    let Some(actor) = ctx.snapshot(matched.actor) else {
        return TurnOutcome::Failed;
    };
    let carried: Vec<WorldObject> = ctx
        .world
        .contents(actor.id())
        .into_iter()
        .filter_map(|id| ctx.get(id).cloned())
        .filter(|o| o.display.in_inventory_listing())
        .collect();
    let refs: Vec<&WorldObject> = carried.iter().collect();
    ctx.msg(&lang::carrying(&actor, &refs));
    TurnOutcome::SuccessNoTurnscripts
}

fn wait(ctx: &mut TurnContext<'_>, _matched: &CommandMatch) -> TurnOutcome {
    ctx.msg(lang::WAIT);
    TurnOutcome::Success
}

fn help(ctx: &mut TurnContext<'_>, matched: &CommandMatch) -> TurnOutcome {
    ctx.msg(lang::HELP);
    let hint = ctx
        .world
        .room_of(matched.actor)
        .and_then(|r| ctx.get(r))
        .and_then(|room| room.field(HINT_FIELD))
        .and_then(Value::as_text)
        .map(str::to_string);
    if let Some(hint) = hint {
        ctx.msg(&hint);
    }
    TurnOutcome::SuccessNoTurnscripts
}

fn undo(ctx: &mut TurnContext<'_>, _matched: &CommandMatch) -> TurnOutcome {
    ctx.request_undo();
    TurnOutcome::SuccessNoTurnscripts
}

// =============================================================================
// Object commands
// =============================================================================

fn examine(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    if let Some(outcome) = ctx.run_hook(Action::Examine, &hook_args(request)) {
        return outcome;
    }
    let Some(item) = ctx.snapshot(request.item) else {
        return ItemOutcome::Failed;
    };
    let text = item
        .examine
        .clone()
        .unwrap_or_else(|| lang::DEFAULT_DESCRIPTION.to_string());
    ctx.msg(&text);
    if item.container.is_some() && (!item.is_closed() || item.is_transparent()) {
        let inside = visible_contents(ctx, item.id());
        if !inside.is_empty() {
            let refs: Vec<&WorldObject> = inside.iter().collect();
            ctx.msg(&lang::contents(&item, &refs));
        }
    }
    ItemOutcome::Succeeded
}

fn wear(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if item.wearable.is_none() {
        return refuse(ctx, &lang::cannot(&actor, "wear", &item));
    }
    if item.is_worn() {
        return refuse(ctx, &lang::already_wearing(&actor, &item));
    }
    if let Some(outcome) = ctx.run_hook(Action::Wear, &hook_args(request)) {
        return outcome;
    }
    if let Some(wearable) = ctx.world.get_mut(item.id()).and_then(|o| o.wearable.as_mut()) {
        wearable.worn = true;
    }
    ctx.msg(&lang::wear_successful(&actor, &item));
    ItemOutcome::Succeeded
}

fn remove(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if let Some(outcome) = ctx.run_hook(Action::Remove, &hook_args(request)) {
        return outcome;
    }
    if let Some(wearable) = ctx.world.get_mut(item.id()).and_then(|o| o.wearable.as_mut()) {
        wearable.worn = false;
    }
    ctx.msg(&lang::remove_successful(&actor, &item));
    ItemOutcome::Succeeded
}

fn take(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    if let Some(outcome) = ctx.run_hook(Action::Take, &hook_args(request)) {
        return outcome;
    }
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if item.takeable.is_none() || item.is_character() {
        return refuse(ctx, &lang::cannot(&actor, "take", &item));
    }
    if !move_item(ctx, &actor, item.id(), Location::In(actor.id())) {
        return ItemOutcome::Failed;
    }
    ctx.msg(&lang::take_successful(&actor, &item));
    ItemOutcome::Succeeded
}

fn drop_item(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    if let Some(outcome) = ctx.run_hook(Action::Drop, &hook_args(request)) {
        return outcome;
    }
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if !move_item(ctx, &actor, item.id(), actor.location) {
        return ItemOutcome::Failed;
    }
    ctx.msg(&lang::drop_successful(&actor, &item));
    ItemOutcome::Succeeded
}

fn open(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if item.openable.is_none() {
        return refuse(ctx, &lang::cannot(&actor, "open", &item));
    }
    if !item.is_closed() {
        return refuse(ctx, &lang::already(&item, "open"));
    }
    if item.is_locked() {
        return refuse(ctx, &lang::locked(&item));
    }
    if let Some(outcome) = ctx.run_hook(Action::Open, &hook_args(request)) {
        return outcome;
    }
    if let Some(openable) = ctx.world.get_mut(item.id()).and_then(|o| o.openable.as_mut()) {
        openable.closed = false;
    }
    ctx.msg(&lang::open_successful(&actor, &item));
    if item.container.is_some() && !item.is_transparent() {
        let inside = visible_contents(ctx, item.id());
        if !inside.is_empty() {
            let refs: Vec<&WorldObject> = inside.iter().collect();
            ctx.msg(&lang::contents(&item, &refs));
        }
    }
    ItemOutcome::Succeeded
}

fn close(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if item.openable.is_none() {
        return refuse(ctx, &lang::cannot(&actor, "close", &item));
    }
    if item.is_closed() {
        return refuse(ctx, &lang::already(&item, "closed"));
    }
    if let Some(outcome) = ctx.run_hook(Action::Close, &hook_args(request)) {
        return outcome;
    }
    if let Some(openable) = ctx.world.get_mut(item.id()).and_then(|o| o.openable.as_mut()) {
        openable.closed = true;
    }
    ctx.msg(&lang::close_successful(&actor, &item));
    ItemOutcome::Succeeded
}

/// Shared checks for `lock` and `unlock`: the item has a lock and the actor
/// holds its key.
fn key_check(
    ctx: &mut TurnContext<'_>,
    actor: &WorldObject,
    item: &WorldObject,
    verb: &str,
) -> Option<ObjectId> {
    let Some(key) = item.openable.as_ref().and_then(|o| o.lock.as_ref()).map(|l| l.key) else {
        ctx.msg(&lang::cannot(actor, verb, item));
        return None;
    };
    if !ctx.scope(actor.id()).is_held_or_worn(key) {
        ctx.msg(&lang::no_key(actor));
        return None;
    }
    Some(key)
}

fn set_locked(ctx: &mut TurnContext<'_>, item: ObjectId, locked: bool) {
    if let Some(lock) = ctx
        .world
        .get_mut(item)
        .and_then(|o| o.openable.as_mut())
        .and_then(|o| o.lock.as_mut())
    {
        lock.locked = locked;
    }
}

fn unlock(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if item.openable.as_ref().is_some_and(|o| o.lock.is_some()) && !item.is_locked() {
        return refuse(ctx, &lang::not_locked(&item));
    }
    if key_check(ctx, &actor, &item, "unlock").is_none() {
        return ItemOutcome::Failed;
    }
    set_locked(ctx, item.id(), false);
    ctx.msg(&lang::unlock_successful(&actor, &item));
    ItemOutcome::Succeeded
}

fn lock(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if item.is_locked() {
        return refuse(ctx, &lang::already(&item, "locked"));
    }
    if item.openable.is_some() && !item.is_closed() {
        return refuse(ctx, &lang::close_first(&actor, &item));
    }
    if key_check(ctx, &actor, &item, "lock").is_none() {
        return ItemOutcome::Failed;
    }
    set_locked(ctx, item.id(), true);
    ctx.msg(&lang::lock_successful(&actor, &item));
    ItemOutcome::Succeeded
}

fn put_in(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    let Some(container) = request.other.and_then(|c| ctx.snapshot(c)) else {
        return ItemOutcome::Failed;
    };
    if container.container.is_none() {
        return refuse(ctx, &lang::not_container(&container));
    }
    if container.id() == item.id() || ctx.world.is_ancestor(item.id(), container.id()) {
        return refuse(ctx, &lang::inside_itself(&actor));
    }
    if container.is_closed() {
        return refuse(ctx, &lang::is_closed(&container));
    }
    if !ctx.scope(actor.id()).is_reachable(container.id()) {
        return refuse(ctx, &lang::not_here(&container));
    }
    if !move_item(ctx, &actor, item.id(), Location::In(container.id())) {
        return ItemOutcome::Failed;
    }
    ctx.msg(&lang::put_in_successful(&actor, &item, &container));
    ItemOutcome::Succeeded
}

fn give(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    let Some(recipient) = request.other.and_then(|c| ctx.snapshot(c)) else {
        return ItemOutcome::Failed;
    };
    if !recipient.is_character() || recipient.id() == actor.id() {
        return refuse(ctx, &lang::not_able(&actor, &recipient));
    }
    if recipient.player {
        if !move_item(ctx, &actor, item.id(), Location::In(recipient.id())) {
            return ItemOutcome::Failed;
        }
        ctx.msg(&lang::give_successful(&actor, &item, &recipient));
        return ItemOutcome::Succeeded;
    }
    let args = HookArgs::new(recipient.id(), actor.id())
        .with_other(item.id())
        .with_multiple(request.multiple);
    match ctx.run_hook(Action::Give, &args) {
        Some(outcome) => outcome,
        None => refuse(ctx, &lang::unwanted(&recipient, &item)),
    }
}

fn switch(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>, on: bool) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    let verb = if on { "switch on" } else { "switch off" };
    if item.switchable.is_none() {
        return refuse(ctx, &lang::cannot(&actor, verb, &item));
    }
    if item.is_on() == on {
        return refuse(ctx, &lang::already(&item, if on { "on" } else { "off" }));
    }
    let args = hook_args(request);
    if on {
        match ctx.run_hook(Action::CanSwitchOn, &args) {
            Some(ItemOutcome::Succeeded) | None => {}
            Some(_) => return ItemOutcome::Failed,
        }
    }
    let action = if on { Action::SwitchOn } else { Action::SwitchOff };
    if let Some(outcome) = ctx.run_hook(action, &args) {
        return outcome;
    }
    if let Some(switchable) = ctx.world.get_mut(item.id()).and_then(|o| o.switchable.as_mut()) {
        switchable.on = on;
    }
    ctx.msg(&lang::switch_successful(&actor, &item, on));
    ItemOutcome::Succeeded
}

fn switch_on(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    switch(ctx, request, true)
}

fn switch_off(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    switch(ctx, request, false)
}

fn push(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    if let Some(outcome) = ctx.run_hook(Action::Push, &hook_args(request)) {
        return outcome;
    }
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    refuse(ctx, &lang::push_nothing(&actor, &item))
}

fn sit_on(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if item.furniture.is_none() {
        return refuse(ctx, &lang::cannot(&actor, "sit on", &item));
    }
    let on_it = actor
        .field(POSTURE_FURNITURE_FIELD)
        .and_then(Value::as_object)
        == Some(item.id());
    if on_it {
        return refuse(ctx, &lang::already_sitting(&actor, &item));
    }
    if let Some(outcome) = ctx.run_hook(Action::SitOn, &hook_args(request)) {
        return outcome;
    }
    if let Some(character) = ctx.world.get_mut(actor.id()) {
        character.set_field(POSTURE_FIELD, "sitting");
        character.set_field(POSTURE_FURNITURE_FIELD, item.id());
    }
    ctx.msg(&lang::sit_on_successful(&actor, &item));
    ItemOutcome::Succeeded
}

// =============================================================================
// Conversation
// =============================================================================

/// Topics a character currently offers, in declaration order.
fn shown_topics(ctx: &TurnContext<'_>, character: ObjectId) -> Vec<WorldObject> {
    ctx.world
        .contents(character)
        .into_iter()
        .filter_map(|id| ctx.get(id))
        .filter(|o| o.topic.as_ref().is_some_and(|t| t.shown))
        .cloned()
        .collect()
}

fn talk_to(ctx: &mut TurnContext<'_>, request: &ItemRequest<'_>) -> ItemOutcome {
    let Some((actor, item)) = pair(ctx, request) else {
        return ItemOutcome::Failed;
    };
    if !item.is_npc() {
        return refuse(ctx, &lang::talk_to_object(&actor, &item));
    }
    let hooked = ctx.run_hook(Action::Talk, &hook_args(request));
    if let Some(npc) = ctx.world.get_mut(item.id()).and_then(|o| o.npc.as_mut()) {
        npc.talked += 1;
    }
    let topics: Vec<String> = shown_topics(ctx, item.id())
        .into_iter()
        .map(|t| t.alias)
        .collect();
    if !topics.is_empty() {
        ctx.msg(&lang::topics(&item, &topics));
    } else if hooked.is_none() {
        return refuse(ctx, &lang::no_topics(&item));
    }
    hooked.unwrap_or(ItemOutcome::Succeeded)
}

fn ask_about(ctx: &mut TurnContext<'_>, matched: &CommandMatch) -> TurnOutcome {
    let (Some(actor), Some(character)) = (
        ctx.snapshot(matched.actor),
        matched.object(0).and_then(|c| ctx.snapshot(c)),
    ) else {
        return TurnOutcome::Failed;
    };
    if !character.is_npc() {
        ctx.msg(&lang::talk_to_object(&actor, &character));
        return TurnOutcome::Failed;
    }

    let phrase = NounPhrase::from_text(matched.text().unwrap_or_default(), &Vocabulary::english());
    let topics = shown_topics(ctx, character.id());
    let ids: Vec<ObjectId> = topics.iter().map(WorldObject::id).collect();
    let Some(topic) = NounResolver::matches(&*ctx.world, &phrase, &ids)
        .first()
        .and_then(|id| topics.iter().find(|t| t.id() == *id))
        .cloned()
    else {
        ctx.msg(&lang::no_answer(&character));
        return TurnOutcome::Failed;
    };

    let args = HookArgs::new(topic.id(), actor.id()).with_other(character.id());
    let outcome = ctx.run_hook(Action::Topic, &args);
    if outcome.is_none() {
        let text = topic
            .examine
            .clone()
            .unwrap_or_else(|| lang::no_answer(&character));
        ctx.msg(&text);
    }

    let reveals = topic.topic.as_ref().map(|t| t.reveals.clone()).unwrap_or_default();
    if let Some(state) = ctx.world.get_mut(topic.id()).and_then(|o| o.topic.as_mut()) {
        state.shown = false;
    }
    for id in reveals {
        if let Some(state) = ctx.world.get_mut(id).and_then(|o| o.topic.as_mut()) {
            state.shown = true;
        }
    }
    match outcome {
        Some(ItemOutcome::Failed | ItemOutcome::NotApplicable) => TurnOutcome::Failed,
        _ => TurnOutcome::Success,
    }
}

// =============================================================================
// Movement
// =============================================================================

fn go(ctx: &mut TurnContext<'_>, matched: &CommandMatch) -> TurnOutcome {
    let exit = matched.direction().and_then(|dir| {
        ctx.world
            .room_of(matched.actor)
            .and_then(|room| ctx.world.exit(room, dir))
            .cloned()
    });
    match exit {
        Some(exit) => travel(ctx, matched.actor, &exit),
        None => {
            ctx.msg(lang::NOT_THAT_WAY);
            TurnOutcome::Failed
        }
    }
}

fn go_to(ctx: &mut TurnContext<'_>, matched: &CommandMatch) -> TurnOutcome {
    let phrase = NounPhrase::from_text(matched.text().unwrap_or_default(), &Vocabulary::english());
    let exits: Vec<Exit> = ctx
        .world
        .room_of(matched.actor)
        .map(|room| ctx.world.exits(room).to_vec())
        .unwrap_or_default();
    let destinations: Vec<ObjectId> = exits.iter().map(|e| e.destination).collect();
    let chosen = NounResolver::matches(&*ctx.world, &phrase, &destinations)
        .first()
        .and_then(|dest| exits.iter().find(|e| e.destination == *dest))
        .cloned();
    match chosen {
        Some(exit) => travel(ctx, matched.actor, &exit),
        None => {
            ctx.msg(lang::NOT_THAT_WAY);
            TurnOutcome::Failed
        }
    }
}

/// Moves `actor` through `exit`, checking its door.
fn travel(ctx: &mut TurnContext<'_>, actor: ObjectId, exit: &Exit) -> TurnOutcome {
    if let Some(door) = exit.door.and_then(|d| ctx.snapshot(d)) {
        if door.is_locked() {
            ctx.msg(lang::LOCKED_EXIT);
            return TurnOutcome::Failed;
        }
        if door.is_closed() {
            ctx.msg(&lang::is_closed(&door));
            return TurnOutcome::Failed;
        }
    }
    let Some(traveller) = ctx.snapshot(actor) else {
        return TurnOutcome::Failed;
    };
    let player = ctx.player();
    let seen_leaving = actor != player && ctx.scope(player).is_visible(actor);
    if !move_item(ctx, &traveller, actor, Location::In(exit.destination)) {
        return TurnOutcome::Failed;
    }
    if let Some(character) = ctx.world.get_mut(actor) {
        character.fields.remove(POSTURE_FIELD);
        character.fields.remove(POSTURE_FURNITURE_FIELD);
    }

    if actor == player {
        describe_room(ctx, actor);
    } else if seen_leaving {
        ctx.msg(&lang::leaves(&traveller, exit.direction.name()));
    } else if ctx.scope(player).is_visible(actor) {
        ctx.msg(&lang::arrives(&traveller));
    }
    TurnOutcome::Success
}
