//! Directive expansion against a small world

use taleforge_foundation::{ErrorKind, ObjectId, Pronouns, Value};
use taleforge_storage::{ObjectDecl, World, WorldBuilder};
use taleforge_text::{
    DirectiveContext, DirectiveError, FieldAccessors, NoAccessors, StyleMode, TextParams,
    TextProcessor,
};

fn world() -> World {
    WorldBuilder::new()
        .object(ObjectDecl::room("lounge").description("A {b:cosy} lounge."))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("lamp").at("lounge").switchable(true))
        .object(ObjectDecl::item("torch").at("me").switchable(false).field("power", 3_i64))
        .object(ObjectDecl::item("boots").at("me").worn().pronouns(Pronouns::Plural))
        .object(ObjectDecl::npc("lara", Pronouns::Female).at("lounge").alias("Lara"))
        .build()
        .unwrap()
}

struct Battery;

impl FieldAccessors for Battery {
    fn call(&self, world: &World, object: ObjectId, name: &str) -> Option<Value> {
        if name != "dead" {
            return None;
        }
        let power = world.get(object)?.field("power")?.as_int()?;
        Some(Value::Bool(power < 1))
    }
}

#[test]
fn conditionals_read_capability_state() {
    let w = world();
    let mut tp = TextProcessor::new().with_style(StyleMode::Plain);
    assert_eq!(tp.process_plain("{if:lamp:on:Lit.:Dark.}", &w), "Lit.");
    assert_eq!(tp.process_plain("{if:torch:on:Lit.:Dark.}", &w), "Dark.");
    assert_eq!(tp.process_plain("{if:boots:worn:Worn.}", &w), "Worn.");
    // A missing field is false, and a missing else branch is empty.
    assert_eq!(tp.process_plain("[{if:lamp:sharp:Sharp.}]", &w), "[]");
    assert!(tp.bug_reports().is_empty());
}

#[test]
fn accessors_shadow_stored_fields() {
    let w = world();
    let mut tp = TextProcessor::new();
    let torch = w.lookup("torch").unwrap();
    let params = TextParams::new().with("item", torch);
    assert_eq!(
        tp.process("{if:item:dead:Dead.:Power {show:item:power}.}", &w, &Battery, &params),
        "Power 3."
    );
    assert_eq!(
        tp.process("{show:lamp:dead}", &w, &Battery, &TextParams::new()),
        ""
    );
    assert_eq!(tp.bug_reports().len(), 1);
}

#[test]
fn names_and_verbs_follow_pronouns() {
    let w = world();
    let mut tp = TextProcessor::new();
    assert_eq!(tp.process_plain("{nm:boots:a}", &w), "some boots");
    assert_eq!(tp.process_plain("{nm:lamp:the}", &w), "the lamp");
    assert_eq!(tp.process_plain("{nm:lara:the}", &w), "Lara");
    assert_eq!(tp.process_plain("{pv:lara:try} the door.", &w), "She tries the door.");
    assert_eq!(tp.process_plain("{pv:player:try} the door.", &w), "You try the door.");
    assert_eq!(tp.process_plain("{pv:boots:be} muddy.", &w), "They are muddy.");
}

#[test]
fn style_modes() {
    let w = world();
    let html = TextProcessor::new().process_plain("{b:bold} {colour:red:hot}", &w);
    assert_eq!(html, "<b>bold</b> <span style=\"color:red\">hot</span>");

    let ansi = TextProcessor::new()
        .with_style(StyleMode::Ansi)
        .process_plain("{b:bold} {colour:red:hot}", &w);
    assert_eq!(ansi, "\u{1b}[1mbold\u{1b}[0m \u{1b}[31mhot\u{1b}[0m");

    let plain = TextProcessor::new()
        .with_style(StyleMode::Plain)
        .process_plain("{b:bold} {colour:red:hot}", &w);
    assert_eq!(plain, "bold hot");
}

#[test]
fn once_is_keyed_on_the_whole_template() {
    let w = world();
    let mut tp = TextProcessor::new();
    let kitchen = "A kitchen.{once: A fresh smell here!}";
    let cellar = "A cellar.{once: A fresh smell here!}";
    assert_eq!(tp.process_plain(kitchen, &w), "A kitchen. A fresh smell here!");
    assert_eq!(tp.process_plain(cellar, &w), "A cellar. A fresh smell here!");
    assert_eq!(tp.process_plain(kitchen, &w), "A kitchen.");
    assert_eq!(tp.process_plain(cellar, &w), "A cellar.");
}

#[test]
fn custom_directives_see_the_world() {
    let w = world();
    let mut tp = TextProcessor::new();
    tp.register("count_here", |args: &[&str], ctx: &mut DirectiveContext<'_>| {
        let room = ctx.object(args.first().copied().unwrap_or("lounge"))?;
        Ok(ctx.world.contents(room).len().to_string())
    });
    assert_eq!(tp.process_plain("{count_here:lounge} things.", &w), "3 things.");
    assert_eq!(tp.process_plain("[{count_here:attic}]", &w), "[]");
    assert!(tp.bug_reports()[0].contains("attic"));
}

#[test]
fn directive_errors_name_the_problem() {
    let w = world();
    let mut tp = TextProcessor::new();
    assert_eq!(tp.process_plain("[{show:lamp}]", &w), "[]");
    assert_eq!(tp.process_plain("[{nm:ghost}]", &w), "[]");
    let reports = tp.take_bug_reports();
    assert_eq!(reports.len(), 2);
    assert!(reports[0].contains("show"));
    assert!(reports[1].contains("ghost"));
    assert_eq!(
        DirectiveError::UnknownObject("ghost".into()).to_string(),
        "failed to find object `ghost`"
    );
}

#[test]
fn world_templates_are_validated() {
    let tp = TextProcessor::new();
    assert!(tp.validate_world(&world()).is_ok());

    let bad = WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("lamp").at("lounge").examine("It {glows:softly}."))
        .build()
        .unwrap();
    let err = tp.validate_world(&bad).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownDirective { ref name, .. } if name == "glows"));
    assert!(err.context.unwrap().stack[0].contains("lamp"));
}

#[test]
fn unknown_directives_at_runtime_are_reported_not_fatal() {
    let w = world();
    let mut tp = TextProcessor::new();
    assert_eq!(tp.process("Hello{wave}!", &w, &NoAccessors, &TextParams::new()), "Hello!");
    assert_eq!(tp.bug_reports().len(), 1);
}
