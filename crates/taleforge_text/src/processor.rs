//! The directive expansion loop.
//!
//! # Scanning
//!
//! The processor repeatedly finds the first `}` and the nearest `{` before
//! it, so the innermost token is always expanded first:
//!
//! ```text
//! "{if:lamp:on:{b:lit}:dark}"
//!               ^^^^^^^ first `}` closes this token
//! ```
//!
//! The replacement is spliced in and scanning restarts on the new string
//! until no `}` remains. A `}` with no `{` before it is malformed: the
//! processor logs a bug report and returns what it has so far.
//!
//! Two bounds keep bad content from running away. A token nested deeper
//! than the depth bound stops the scan. A separate expansion budget caps
//! the total number of tokens expanded, since a directive may splice in
//! text that contains more tokens. A long flat template stays well inside
//! both.
//!
//! # First-time text
//!
//! `{once:...}` depends on whether the *template* (the string passed to
//! [`TextProcessor::process`], before any substitution) has been processed
//! before by this processor.
//!
//! The seen set lives on the processor rather than in a process-wide
//! static. Each session owns one processor, so with one session per
//! process this is the same as "first time in the process"; two sessions
//! in one process each show first-time text once.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::error;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use taleforge_foundation::{Error, ErrorContext, Result};
use taleforge_storage::World;

use crate::directive::{self, Directive, DirectiveContext, DirectiveError, FieldAccessors};
use crate::directive::{NoAccessors, TextParams};
use crate::logutil::escape_log;
use crate::style::StyleMode;

/// Default bound on how deeply tokens may nest.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default bound on token expansions per template.
pub const DEFAULT_MAX_EXPANSIONS: usize = 4096;

/// Expands `{name:args}` tokens in narration templates.
pub struct TextProcessor {
    directives: HashMap<String, Directive>,
    seen: HashSet<String>,
    rng: ChaCha8Rng,
    style: StyleMode,
    max_depth: usize,
    max_expansions: usize,
    bug_reports: Vec<String>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.directives.keys().collect();
        names.sort();
        f.debug_struct("TextProcessor")
            .field("directives", &names)
            .field("seen", &self.seen.len())
            .field("style", &self.style)
            .field("max_depth", &self.max_depth)
            .field("max_expansions", &self.max_expansions)
            .field("bug_reports", &self.bug_reports)
            .finish_non_exhaustive()
    }
}

impl TextProcessor {
    /// Creates a processor with the built-in directives, HTML styling and a
    /// zero seed.
    #[must_use]
    pub fn new() -> Self {
        let directives = directive::builtins()
            .into_iter()
            .map(|(name, handler)| (name.to_string(), handler))
            .collect();
        Self {
            directives,
            seen: HashSet::new(),
            rng: ChaCha8Rng::seed_from_u64(0),
            style: StyleMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            bug_reports: Vec::new(),
        }
    }

    /// Seeds the random source used by `{random:}`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Sets how style directives render.
    #[must_use]
    pub fn with_style(mut self, style: StyleMode) -> Self {
        self.style = style;
        self
    }

    /// Bounds how deeply tokens may nest.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Bounds the number of token expansions per template.
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions.max(1);
        self
    }

    /// The current style mode.
    #[must_use]
    pub fn style(&self) -> StyleMode {
        self.style
    }

    /// Registers (or replaces) a directive.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[&str], &mut DirectiveContext<'_>) -> std::result::Result<String, DirectiveError>
            + Send
            + Sync
            + 'static,
    {
        self.directives.insert(name.into(), Arc::new(handler));
    }

    /// Returns true if a directive with this name is registered.
    #[must_use]
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    /// Expands a template with no accessors or bindings.
    pub fn process_plain(&mut self, template: &str, world: &World) -> String {
        self.process(template, world, &NoAccessors, &TextParams::new())
    }

    /// Expands every token in `template`.
    ///
    /// Never fails: unknown directives and directive errors are recorded as
    /// bug reports and replaced by nothing, and malformed nesting stops the
    /// expansion with the text produced so far.
    pub fn process(
        &mut self,
        template: &str,
        world: &World,
        accessors: &dyn FieldAccessors,
        params: &TextParams,
    ) -> String {
        let first_time = self.seen.insert(template.to_string());
        let mut text = template.to_string();

        for _ in 0..self.max_expansions {
            let Some(end) = text.find('}') else {
                return text;
            };
            let Some(start) = text[..end].rfind('{') else {
                self.report(template, "failed to find starting curly brace");
                return text;
            };
            // No `}` comes before `end`, so every earlier `{` is still open.
            let depth = text[..start].matches('{').count() + 1;
            if depth > self.max_depth {
                self.report(template, "too many nested directives");
                return text;
            }

            let token = text[start + 1..end].to_string();
            let mut parts = token.split(':');
            let name = parts.next().unwrap_or_default();
            let args: Vec<&str> = parts.collect();

            let outcome = match self.directives.get(name) {
                Some(handler) => {
                    let mut ctx = DirectiveContext {
                        world,
                        accessors,
                        params,
                        first_time,
                        style: self.style,
                        rng: &mut self.rng,
                    };
                    handler(&args, &mut ctx).map_err(|e| e.to_string())
                }
                None => Err(format!("unknown text directive `{name}`")),
            };
            let replacement = outcome.unwrap_or_else(|message| {
                self.report(template, &message);
                String::new()
            });
            text.replace_range(start..=end, &replacement);
        }

        if text.contains('}') {
            self.report(template, "too many directive expansions");
        }
        text
    }

    fn report(&mut self, template: &str, message: &str) {
        let report = format!("{message} in \"{template}\"");
        error!("text processor: {}", escape_log(&report));
        self.bug_reports.push(report);
    }

    /// Checks that every directive named in `template` is registered.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownDirective`](taleforge_foundation::ErrorKind)
    /// for the first unregistered name.
    pub fn validate(&self, template: &str) -> Result<()> {
        for name in directive_names(template) {
            if !self.has_directive(name) {
                return Err(Error::unknown_directive(name, template));
            }
        }
        Ok(())
    }

    /// Validates the examine and description templates of every object.
    ///
    /// # Errors
    ///
    /// Returns the first unknown directive, with the object name as context.
    pub fn validate_world(&self, world: &World) -> Result<()> {
        for object in world.objects() {
            for template in [&object.examine, &object.description].into_iter().flatten() {
                self.validate(template).map_err(|e| {
                    let frame = format!("object `{}`", object.name());
                    e.with_context(ErrorContext::new().with_frame(frame))
                })?;
            }
        }
        Ok(())
    }

    /// Bug reports recorded so far.
    #[must_use]
    pub fn bug_reports(&self) -> &[String] {
        &self.bug_reports
    }

    /// Removes and returns the recorded bug reports.
    pub fn take_bug_reports(&mut self) -> Vec<String> {
        std::mem::take(&mut self.bug_reports)
    }

    /// Returns true if `template` has been processed in this session.
    #[must_use]
    pub fn has_seen(&self, template: &str) -> bool {
        self.seen.contains(template)
    }

    /// Forgets which templates have been shown.
    pub fn reset_seen(&mut self) {
        self.seen.clear();
    }
}

/// The directive name of every `{` in a template, in order.
fn directive_names(template: &str) -> impl Iterator<Item = &str> {
    template.match_indices('{').map(move |(at, _)| {
        let rest = &template[at + 1..];
        let end = rest.find([':', '}', '{']).unwrap_or(rest.len());
        &rest[..end]
    })
}
