//! Integration tests for world building and authoring errors

use taleforge_foundation::{DisplayLevel, ErrorKind, Location, Pronouns, Value};
use taleforge_storage::{Direction, ObjectDecl, WorldBuilder};

fn lounge() -> WorldBuilder {
    WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
}

// =============================================================================
// Successful builds
// =============================================================================

#[test]
fn names_resolve_to_ids_in_declaration_order() {
    let world = lounge()
        .object(ObjectDecl::item("apple").at("lounge"))
        .build()
        .unwrap();
    assert_eq!(world.len(), 3);
    let apple = world.resolve("apple").unwrap();
    assert_eq!(world.name_of(apple), "apple");
    assert_eq!(world.location_of(apple), Location::In(world.resolve("lounge").unwrap()));
    assert_eq!(world.player(), world.resolve("me").unwrap());
}

#[test]
fn aliases_default_from_names() {
    let world = lounge()
        .object(ObjectDecl::item("glass_cabinet").at("lounge"))
        .object(ObjectDecl::item("flashlight").at("me").synonyms(&["torch"]))
        .build()
        .unwrap();
    let cabinet = world.by_name("glass_cabinet").unwrap();
    assert_eq!(cabinet.alias, "glass cabinet");
    let words: Vec<String> = world.by_name("flashlight").unwrap().words().collect();
    assert_eq!(words, vec!["flashlight", "torch"]);
}

#[test]
fn exits_doors_keys_and_topics_resolve() {
    let world = lounge()
        .object(
            ObjectDecl::room("kitchen")
                .exit(Direction::West, "lounge")
                .exit_through(Direction::Down, "basement", "trapdoor"),
        )
        .object(ObjectDecl::room("basement"))
        .object(ObjectDecl::item("trapdoor").at("kitchen").openable(true))
        .object(ObjectDecl::item("key").at("me").takeable())
        .object(ObjectDecl::item("cabinet").at("lounge").container(true).locked_with("key"))
        .object(ObjectDecl::npc("kyle", Pronouns::Male).at("lounge"))
        .object(ObjectDecl::topic("kyle_garden", "kyle", true).reveals("kyle_weather"))
        .object(ObjectDecl::topic("kyle_weather", "kyle", false))
        .build()
        .unwrap();

    let kitchen = world.resolve("kitchen").unwrap();
    let down = world.exit(kitchen, Direction::Down).unwrap();
    assert_eq!(down.destination, world.resolve("basement").unwrap());
    assert_eq!(down.door, world.lookup("trapdoor"));
    assert!(world.exit(kitchen, Direction::North).is_none());

    let cabinet = world.by_name("cabinet").unwrap();
    assert!(cabinet.is_locked());
    assert!(cabinet.is_closed());
    assert!(cabinet.is_transparent());

    let garden = world.by_name("kyle_garden").unwrap();
    assert_eq!(garden.display, DisplayLevel::Hidden);
    let topic = garden.topic.as_ref().unwrap();
    assert_eq!(topic.reveals, vec![world.resolve("kyle_weather").unwrap()]);
}

#[test]
fn fields_and_properties() {
    let mut world = lounge()
        .object(ObjectDecl::item("torch").at("me").switchable(false).field("power", 3_i64))
        .build()
        .unwrap();
    let torch = world.resolve("torch").unwrap();
    let obj = world.object(torch).unwrap();
    assert_eq!(obj.property("on"), Some(Value::Bool(false)));
    assert_eq!(obj.property("power"), Some(Value::Int(3)));
    assert_eq!(obj.property("alias"), Some(Value::from("torch")));
    assert_eq!(obj.property("weight"), None);

    world.object_mut(torch).unwrap().set_field("power", 2_i64);
    assert_eq!(world.object(torch).unwrap().field("power"), Some(&Value::Int(2)));
}

// =============================================================================
// Authoring errors
// =============================================================================

#[test]
fn duplicate_names_are_rejected() {
    let err = lounge()
        .object(ObjectDecl::item("apple"))
        .object(ObjectDecl::item("apple"))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateName(ref n) if n == "apple"));
}

#[test]
fn disallowed_names_are_rejected() {
    for name in ["", "red ball", "knife!", "café"] {
        let err = lounge().object(ObjectDecl::item(name)).build().unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::DisallowedName(_)),
            "`{name}` gave {err}"
        );
    }
}

#[test]
fn unknown_location_is_rejected() {
    let err = lounge()
        .object(ObjectDecl::item("apple").at("pantry"))
        .build()
        .unwrap_err();
    match err.kind {
        ErrorKind::UnknownLocation { object, location } => {
            assert_eq!(object, "apple");
            assert_eq!(location, "pantry");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_exit_destination_is_rejected() {
    let err = WorldBuilder::new()
        .object(ObjectDecl::room("lounge").exit(Direction::East, "garden"))
        .object(ObjectDecl::player("me").at("lounge"))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownExit { ref destination, .. } if destination == "garden"));
}

#[test]
fn unknown_key_names_the_object() {
    let err = lounge()
        .object(ObjectDecl::item("cabinet").container(false).locked_with("skeleton_key"))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownObject(ref n) if n == "skeleton_key"));
    let context = err.context.unwrap();
    assert!(context.stack.iter().any(|frame| frame.contains("cabinet")));
}

#[test]
fn a_world_needs_a_player() {
    let err = WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingPlayer));
}

#[test]
fn mutual_containment_is_rejected() {
    let err = lounge()
        .object(ObjectDecl::item("box_a").container(false).at("box_b"))
        .object(ObjectDecl::item("box_b").container(false).at("box_a"))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ContainmentCycle { .. }));
}

#[test]
fn self_containment_is_rejected() {
    let err = lounge()
        .object(ObjectDecl::item("bag").container(false).at("bag"))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ContainmentCycle { .. }));
}
