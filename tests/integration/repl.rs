//! Meta commands and scripted input through the REPL

use taleforge_engine::EngineConfig;
use taleforge_runtime::{Repl, Reply, ScriptEditor, Session};

fn repl(lines: &[&str]) -> Repl<ScriptEditor> {
    let session = Session::demo(EngineConfig::plain()).unwrap();
    Repl::with_editor(ScriptEditor::new(lines.iter().copied()), session).without_banner()
}

fn lines(reply: Reply) -> Vec<String> {
    match reply {
        Reply::Lines(lines) => lines,
        Reply::Quit => panic!("unexpected quit"),
    }
}

#[test]
fn scope_reports_every_predicate() {
    let mut repl = repl(&[]);
    let report = lines(repl.eval("scope ornate_doll"));
    assert_eq!(report[0], "ornate_doll");
    assert!(report.contains(&"  visible: true".to_string()));
    assert!(report.contains(&"  reachable: false".to_string()));
    assert!(report.contains(&"  held: false".to_string()));
}

#[test]
fn commands_follow_the_world() {
    let mut repl = repl(&[]);
    let before = lines(repl.eval("commands knife"));
    assert!(before[0].starts_with("knife: "));
    assert!(before[0].contains("Drop"));

    repl.eval("drop knife");
    let after = lines(repl.eval("commands knife"));
    assert!(after[0].contains("Take"));
    assert!(!after[0].contains("Drop"));

    let everything = lines(repl.eval("commands"));
    assert!(everything.iter().any(|l| l.starts_with("book: ")));
    assert!(!everything.iter().any(|l| l.starts_with("brick: ")));
}

#[test]
fn meta_commands_do_not_take_turns() {
    let mut repl = repl(&[]);
    repl.eval("scope knife");
    repl.eval("commands");
    assert_eq!(lines(repl.eval("bugs")), vec!["No bug reports."]);
    assert_eq!(repl.session().turn(), 0);
}

#[test]
fn quitting_ends_a_script() {
    let mut repl = repl(&[]);
    let transcript = repl.run_script("take book\nexit\ntake knife\n");
    assert!(transcript.iter().any(|l| l == "You take the book."));
    assert_eq!(repl.session().turn(), 1);
}

#[test]
fn run_reads_until_end_of_input() {
    let mut repl = repl(&["take book", "", "x book", "drop book"]);
    repl.run().unwrap();
    assert_eq!(repl.session().turn(), 3);
}

#[test]
fn disambiguation_spans_two_lines() {
    let mut repl = repl(&[]);
    let question = lines(repl.eval("open box"));
    assert_eq!(question.len(), 1);
    assert!(question[0].contains("cardboard box"));
    assert!(question[0].contains("jewellery box"));

    let answer = lines(repl.eval("cardboard"));
    assert_eq!(answer, vec!["You open the cardboard box."]);
    assert!(!repl.session().world().by_name("cardboard_box").unwrap().is_closed());
}
