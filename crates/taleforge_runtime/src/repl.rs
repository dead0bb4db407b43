//! The interactive play loop.
//!
//! Input is either a game command, handed to the session, or one of a few
//! meta commands that inspect the session without taking a turn:
//!
//! - `quit` / `exit` - leave the game
//! - `scope NAME` - every scope predicate for an object
//! - `commands` / `commands NAME` - what can currently be done with objects
//! - `bugs` - text directive bug reports so far

use std::collections::BTreeSet;

use taleforge_foundation::Result;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

/// What one line of input produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Lines to show the player.
    Lines(Vec<String>),
    /// The player asked to leave.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The game being played.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop until the player quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        self.editor.set_keywords(self.keywords());
        if self.show_banner {
            print_banner();
        }
        print_lines(&self.session.opening());

        loop {
            let input = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => {
                    println!();
                    continue;
                }
                ReadResult::Eof => break,
            };
            if input.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&input);
            match self.eval(&input) {
                Reply::Lines(lines) => print_lines(&lines),
                Reply::Quit => break,
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Evaluates one line: a meta command or a game turn.
    pub fn eval(&mut self, input: &str) -> Reply {
        let trimmed = input.trim();
        let (head, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(h, r)| (h, r.trim()));

        match head.to_lowercase().as_str() {
            "quit" | "exit" if rest.is_empty() => Reply::Quit,
            "scope" if !rest.is_empty() => Reply::Lines(match self.session.scope_report(rest) {
                Ok(report) => report.lines().map(str::to_string).collect(),
                Err(e) => vec![e.to_string()],
            }),
            "commands" if rest.is_empty() => Reply::Lines(
                self.session
                    .valid_commands()
                    .into_iter()
                    .map(|(name, commands)| format!("{name}: {}", commands.join(", ")))
                    .collect(),
            ),
            "commands" => Reply::Lines(match self.session.commands_for(rest) {
                Ok(commands) => vec![format!("{rest}: {}", commands.join(", "))],
                Err(e) => vec![e.to_string()],
            }),
            "bugs" if rest.is_empty() => {
                let reports = self.session.bug_reports();
                Reply::Lines(if reports.is_empty() {
                    vec!["No bug reports.".to_string()]
                } else {
                    reports.to_vec()
                })
            }
            _ => Reply::Lines(self.session.play(trimmed).lines),
        }
    }

    /// Plays a script of commands, one per line, returning a transcript.
    /// Blank lines and lines starting with `#` are skipped; `quit` stops
    /// the script.
    pub fn run_script(&mut self, script: &str) -> Vec<String> {
        let mut transcript = self.session.opening();
        for line in script.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.eval(line) {
                Reply::Lines(lines) => transcript.extend(lines),
                Reply::Quit => break,
            }
        }
        transcript
    }

    /// Words offered for completion: command verbs, object words and the
    /// meta commands.
    fn keywords(&self) -> Vec<String> {
        let mut words: BTreeSet<String> = ["quit", "scope", "commands", "bugs"]
            .into_iter()
            .map(str::to_string)
            .collect();

        let registry = self.session.engine().registry();
        for name in registry.names() {
            let Some(def) = registry.by_name(name) else {
                continue;
            };
            for pattern in &def.patterns {
                for token in pattern.split_whitespace().filter(|t| !t.starts_with('<')) {
                    words.extend(token.split('|').map(|w| w.replace('_', " ")));
                }
            }
        }

        for obj in self.session.world().objects() {
            if obj.display.is_targetable() && !obj.is_room() {
                words.extend(obj.words());
            }
        }
        words.into_iter().collect()
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn print_banner() {
    println!(
        "\x1b[1;36mTaleforge\x1b[0m v{}\nType \x1b[1mhelp\x1b[0m for help, \x1b[1mquit\x1b[0m to \
         leave.\n",
        env!("CARGO_PKG_VERSION")
    );
}
