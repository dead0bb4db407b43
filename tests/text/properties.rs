//! Property tests for directive expansion

use proptest::prelude::*;
use taleforge_storage::{ObjectDecl, World, WorldBuilder};
use taleforge_text::{StyleMode, TextProcessor};

fn world() -> World {
    WorldBuilder::new()
        .object(ObjectDecl::room("lounge"))
        .object(ObjectDecl::player("me").at("lounge"))
        .object(ObjectDecl::item("lamp").at("lounge").switchable(true))
        .object(ObjectDecl::item("torch").at("me").field("power", 3_i64))
        .build()
        .unwrap()
}

/// Text with no directive syntax in it.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?:'<>]{0,24}"
}

/// One fragment of a template: plain text or a directive.
fn fragment() -> impl Strategy<Value = String> {
    let word = "[a-z]{1,8}";
    prop_oneof![
        plain_text(),
        word.prop_map(|w| format!("{{b:{w}}}")),
        word.prop_map(|w| format!("{{i:{{u:{w}}}}}")),
        Just("{nm:lamp:the}".to_string()),
        Just("{if:lamp:on:lit:dark}".to_string()),
        Just("{show:torch:power}".to_string()),
        (word, word).prop_map(|(a, b)| format!("{{random:{a}:{b}}}")),
    ]
}

fn template() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..8).prop_map(|parts| parts.concat())
}

fn styles() -> impl Strategy<Value = StyleMode> {
    prop_oneof![Just(StyleMode::Html), Just(StyleMode::Ansi), Just(StyleMode::Plain)]
}

proptest! {
    #[test]
    fn expansion_is_idempotent(template in template(), style in styles(), seed in any::<u64>()) {
        let w = world();
        let mut tp = TextProcessor::new().with_style(style).with_seed(seed);
        let once = tp.process_plain(&template, &w);
        prop_assert!(!once.contains('{') && !once.contains('}'), "unexpanded brace in {:?}", once);
        let twice = tp.process_plain(&once, &w);
        prop_assert_eq!(twice, once);
        prop_assert!(tp.bug_reports().is_empty());
    }

    #[test]
    fn plain_text_is_untouched(text in plain_text()) {
        let mut tp = TextProcessor::new();
        prop_assert_eq!(tp.process_plain(&text, &world()), text);
    }

    #[test]
    fn once_shows_only_the_first_time(prefix in plain_text(), guarded in "[a-zA-Z ]{1,16}") {
        let w = world();
        let mut tp = TextProcessor::new();
        let template = format!("{prefix}{{once:{guarded}}}");
        prop_assert_eq!(tp.process_plain(&template, &w), format!("{prefix}{guarded}"));
        prop_assert_eq!(tp.process_plain(&template, &w), prefix.clone());
        prop_assert_eq!(tp.process_plain(&template, &w), prefix);
    }

    #[test]
    fn same_seed_same_story(seed in any::<u64>()) {
        let w = world();
        let template = "{random:north:south:east:west:up:down}";
        let run = |seed| {
            let mut tp = TextProcessor::new().with_seed(seed);
            (0..6).map(|_| tp.process_plain(template, &w)).collect::<Vec<_>>()
        };
        prop_assert_eq!(run(seed), run(seed));
    }

    #[test]
    fn arbitrary_templates_never_panic(template in "\\PC{0,80}") {
        let mut tp = TextProcessor::new().with_max_depth(8).with_max_expansions(64);
        let _ = tp.process_plain(&template, &world());
    }
}
