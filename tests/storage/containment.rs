//! Integration tests for containment queries and moves

use proptest::prelude::*;
use taleforge_foundation::{ErrorKind, Location};
use taleforge_parser::ScopeResolver;
use taleforge_storage::{ObjectDecl, World, WorldBuilder};

/// A lounge holding a chain of nested boxes, outermost first, with a gem in
/// the innermost one. Each box is `(closed, transparent)`.
fn nested(boxes: &[(bool, bool)]) -> World {
    let mut builder = WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"));
    let mut parent = "lounge".to_string();
    for (i, (closed, transparent)) in boxes.iter().enumerate() {
        let name = format!("box_{i}");
        builder.push(
            ObjectDecl::item(&name)
                .at(&parent)
                .container(*transparent)
                .openable(*closed),
        );
        parent = name;
    }
    builder.push(ObjectDecl::item("gem").at(&parent).takeable());
    builder.build().unwrap()
}

fn boxes() -> impl Strategy<Value = Vec<(bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>()), 1..6)
}

proptest! {
    #[test]
    fn visibility_follows_the_ancestor_chain(chain in boxes()) {
        let world = nested(&chain);
        let gem = world.resolve("gem").unwrap();
        let scope = ScopeResolver::for_player(&world);

        let see_through = chain.iter().all(|(closed, transparent)| !closed || *transparent);
        let all_open = chain.iter().all(|(closed, _)| !closed);

        prop_assert_eq!(scope.is_visible(gem), see_through);
        prop_assert_eq!(scope.is_reachable(gem), all_open);
        prop_assert!(!scope.is_reachable(gem) || scope.is_visible(gem));
    }

    #[test]
    fn ancestors_list_the_chain_innermost_first(chain in boxes()) {
        let world = nested(&chain);
        let gem = world.resolve("gem").unwrap();
        let names: Vec<&str> = world.ancestors(gem).into_iter().map(|a| world.name_of(a)).collect();

        let mut expected: Vec<String> = (0..chain.len()).rev().map(|i| format!("box_{i}")).collect();
        expected.push("lounge".to_string());
        prop_assert_eq!(names, expected);
        prop_assert_eq!(world.room_of(gem), world.lookup("lounge"));
    }

    #[test]
    fn moving_into_a_descendant_is_refused(chain in boxes(), a in 0usize..6, b in 0usize..6) {
        let depth = chain.len();
        let (outer, inner) = (a % depth, b % depth);
        prop_assume!(outer <= inner);

        let mut world = nested(&chain);
        let before = world.clone();
        let outer_id = world.resolve(&format!("box_{outer}")).unwrap();
        let inner_id = world.resolve(&format!("box_{inner}")).unwrap();

        let err = world.move_to(outer_id, Location::In(inner_id)).unwrap_err();
        prop_assert!(matches!(err.kind, ErrorKind::ContainmentCycle { .. }), "{}", err);
        prop_assert_eq!(world, before);
    }
}

#[test]
fn closed_opaque_box_hides_until_opened() {
    let mut world = WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("box").at("me").takeable().container(false).openable(true))
        .object(ObjectDecl::item("coin").at("box").takeable())
        .build()
        .unwrap();
    let coin = world.resolve("coin").unwrap();
    let bx = world.resolve("box").unwrap();
    {
        let scope = ScopeResolver::for_player(&world);
        assert!(!scope.is_reachable(coin));
        assert!(!scope.is_visible(coin));
    }

    world.object_mut(bx).unwrap().openable.as_mut().unwrap().closed = false;
    let scope = ScopeResolver::for_player(&world);
    assert!(scope.is_reachable(coin));
    assert!(scope.is_visible(coin));
    assert_eq!(world.location_of(coin), Location::In(bx));
}

#[test]
fn moving_clears_worn() {
    let mut world = WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("hat").at("me").worn())
        .build()
        .unwrap();
    let hat = world.resolve("hat").unwrap();
    let lounge = world.resolve("lounge").unwrap();
    assert!(world.object(hat).unwrap().is_worn());
    world.move_to(hat, Location::In(lounge)).unwrap();
    assert!(!world.object(hat).unwrap().is_worn());
    assert_eq!(world.contents(lounge), vec![world.player(), hat]);
}

#[test]
fn ubiquitous_objects_are_everywhere_but_in_nothing() {
    let world = WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("walls").ubiquitous().scenery())
        .build()
        .unwrap();
    let walls = world.resolve("walls").unwrap();
    assert_eq!(world.location_of(walls), Location::Ubiquitous);
    assert!(world.ancestors(walls).is_empty());
    assert!(ScopeResolver::for_player(&world).is_visible(walls));
}
