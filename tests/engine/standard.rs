//! The standard command library played through the turn engine

use taleforge_engine::{BehaviourHooks, EngineConfig, NarrationBuffer, TurnEngine, TurnOutcome};
use taleforge_foundation::Pronouns;
use taleforge_storage::{Direction, ObjectDecl, World, WorldBuilder};

fn house() -> World {
    WorldBuilder::new()
        .object(
            ObjectDecl::room("lounge")
                .description("A cluttered lounge.")
                .exit(Direction::East, "kitchen"),
        )
        .object(
            ObjectDecl::room("kitchen")
                .description("A spotless kitchen.")
                .exit(Direction::West, "lounge"),
        )
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("box").at("lounge").container(false).openable(true))
        .object(ObjectDecl::item("coin").at("box").takeable())
        .object(
            ObjectDecl::item("glass_cabinet")
                .alias("glass cabinet")
                .at("lounge")
                .container(true)
                .openable(true)
                .locked_with("small_key"),
        )
        .object(ObjectDecl::item("ring").at("glass_cabinet").takeable())
        .object(ObjectDecl::item("small_key").alias("small key").at("lounge").takeable())
        .object(
            ObjectDecl::item("boots")
                .at("me")
                .pronouns(Pronouns::Plural)
                .wearable()
                .worn(),
        )
        .build()
        .unwrap()
}

struct Game {
    world: World,
    engine: TurnEngine,
    out: NarrationBuffer,
}

impl Game {
    fn new(world: World) -> Self {
        Self {
            world,
            engine: TurnEngine::standard(BehaviourHooks::new(), EngineConfig::plain()).unwrap(),
            out: NarrationBuffer::new(),
        }
    }

    /// Plays one command and returns what was narrated.
    fn play(&mut self, input: &str) -> (TurnOutcome, Vec<String>) {
        let outcome = self.engine.handle(input, &mut self.world, &mut self.out);
        (outcome, self.out.take())
    }

    fn said(&mut self, input: &str) -> Vec<String> {
        self.play(input).1
    }

    fn holds(&self, name: &str) -> bool {
        let id = self.world.resolve(name).unwrap();
        self.world.location_of(id).is_in(self.world.player())
    }
}

fn lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(ToString::to_string).collect()
}

#[test]
fn take_all_reports_each_item() {
    let world = WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("apple").at("lounge").takeable())
        .object(ObjectDecl::item("knife").at("lounge"))
        .object(ObjectDecl::item("jar").at("lounge").scenery().container(true).openable(true))
        .object(ObjectDecl::item("gem").at("jar").takeable())
        .build()
        .unwrap();
    let mut game = Game::new(world);

    let (outcome, said) = game.play("take all");
    assert_eq!(outcome, TurnOutcome::Success);
    assert_eq!(said, lines(&["Apple: You take the apple.", "Knife: You can't take it."]));
    assert!(game.holds("apple"));
    assert!(!game.holds("knife"));
    assert_eq!(game.world.turn(), 1);

    // Held things and things behind glass are left out of "all".
    let (outcome, said) = game.play("take all");
    assert_eq!(outcome, TurnOutcome::Failed);
    assert_eq!(said, lines(&["Knife: You can't take it."]));
    assert_eq!(game.world.turn(), 1);
    assert!(!game.holds("gem"));

    // Named, they are still found and refused for what they are.
    assert_eq!(game.said("take apple"), lines(&["You already have it."]));
    assert_eq!(game.said("take gem"), lines(&["The jar is closed."]));
}

#[test]
fn closed_boxes_hide_their_contents() {
    let mut game = Game::new(house());
    assert_eq!(game.said("take coin"), lines(&["Not finding any object 'coin'."]));
    assert_eq!(
        game.said("open box"),
        lines(&["You open the box.", "Inside the box you can see a coin."])
    );
    assert_eq!(game.said("take coin"), lines(&["You take the coin."]));
    assert_eq!(game.said("close box"), lines(&["You close the box."]));
    assert_eq!(game.said("close box"), lines(&["It's already closed."]));
}

#[test]
fn the_cabinet_needs_its_key() {
    let mut game = Game::new(house());

    // The ring shows through the glass but cannot be reached.
    assert_eq!(game.said("take ring"), lines(&["The glass cabinet is closed."]));
    assert_eq!(game.said("open glass cabinet"), lines(&["It's locked."]));
    assert_eq!(game.said("unlock glass cabinet"), lines(&["You do not have the right key."]));

    game.said("take small key");
    assert_eq!(game.said("unlock glass cabinet"), lines(&["You unlock the glass cabinet."]));
    assert_eq!(game.said("open glass cabinet"), lines(&["You open the glass cabinet."]));
    assert_eq!(game.said("lock glass cabinet"), lines(&["You need to close it first."]));
    assert_eq!(game.said("take ring"), lines(&["You take the ring."]));
    assert!(game.holds("ring"));
}

#[test]
fn worn_things_come_off_before_dropping() {
    let mut game = Game::new(house());
    assert_eq!(game.said("i"), lines(&["You are carrying some boots (worn)."]));

    let (outcome, said) = game.play("drop boots");
    assert_eq!(outcome, TurnOutcome::Failed);
    assert_eq!(said.len(), 1);
    assert!(game.holds("boots"));

    assert_eq!(game.said("take boots off"), lines(&["You take the boots off."]));
    assert_eq!(game.said("drop them"), lines(&["You drop the boots."]));
    assert!(!game.holds("boots"));
}

#[test]
fn pronouns_follow_the_last_success() {
    let mut game = Game::new(house());
    game.said("take small key");
    assert_eq!(game.said("drop it"), lines(&["You drop the small key."]));
    // A failed command does not move "it".
    game.said("open glass cabinet");
    assert_eq!(game.said("take it"), lines(&["You take the small key."]));
}

#[test]
fn walking_describes_the_new_room() {
    let mut game = Game::new(house());
    let (outcome, said) = game.play("e");
    assert_eq!(outcome, TurnOutcome::Success);
    assert_eq!(said, lines(&["A spotless kitchen.", "You can go west."]));

    assert_eq!(game.said("north"), lines(&["You can't go that way."]));

    let (outcome, said) = game.play("go to the lounge");
    assert_eq!(outcome, TurnOutcome::Success);
    assert_eq!(said[0], "A cluttered lounge.");
    assert_eq!(said.last().map(String::as_str), Some("You can go east."));
}
