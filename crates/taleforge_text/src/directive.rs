//! Directive handlers and the context they run in.
//!
//! A directive receives the colon-separated arguments of its token and a
//! [`DirectiveContext`] giving read access to the world, the caller's named
//! object bindings and the processor's random source.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use taleforge_foundation::{ObjectId, Value};
use taleforge_storage::World;
use thiserror::Error;

use crate::english;
use crate::style::{self, Style, StyleMode};

/// A directive handler.
///
/// Handlers get the token's arguments (everything after the directive name,
/// split on `:`) and return the replacement text.
pub type Directive =
    Arc<dyn Fn(&[&str], &mut DirectiveContext<'_>) -> Result<String, DirectiveError> + Send + Sync>;

/// Why a directive could not produce text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
    /// The token names an object that does not exist.
    #[error("failed to find object `{0}`")]
    UnknownObject(String),
    /// The object has no such field or accessor.
    #[error("object `{object}` has no field `{field}`")]
    UnknownField {
        /// Object name.
        object: String,
        /// Field name.
        field: String,
    },
    /// A required argument is missing.
    #[error("directive `{directive}` needs at least {expected} argument(s)")]
    MissingArgument {
        /// Directive name.
        directive: String,
        /// Number of arguments required.
        expected: usize,
    },
    /// A custom directive failed.
    #[error("{0}")]
    Failed(String),
}

/// Zero-argument accessors that `{show:}` and `{if:}` may call.
///
/// The engine implements this over its behaviour hooks so an author can
/// attach a computed value ("the charge left in the torch") to one object.
pub trait FieldAccessors {
    /// Calls the accessor `name` on `object`, if one is registered.
    fn call(&self, world: &World, object: ObjectId, name: &str) -> Option<Value>;
}

/// No accessors; only stored fields are visible to directives.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAccessors;

impl FieldAccessors for NoAccessors {
    fn call(&self, _world: &World, _object: ObjectId, _name: &str) -> Option<Value> {
        None
    }
}

/// Named object bindings for one expansion (`{show:item:alias}` where
/// `item` is bound by the caller).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextParams {
    bindings: HashMap<String, ObjectId>,
}

impl TextParams {
    /// Creates empty bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to an object.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, id: ObjectId) -> Self {
        self.bindings.insert(name.into(), id);
        self
    }

    /// Binds `name` to an object in place.
    pub fn bind(&mut self, name: impl Into<String>, id: ObjectId) {
        self.bindings.insert(name.into(), id);
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ObjectId> {
        self.bindings.get(name).copied()
    }
}

/// Everything a directive may consult while expanding one token.
pub struct DirectiveContext<'a> {
    /// The world being narrated.
    pub world: &'a World,
    /// Computed fields.
    pub accessors: &'a dyn FieldAccessors,
    /// Caller-supplied bindings.
    pub params: &'a TextParams,
    /// True the first time this template has been processed.
    pub first_time: bool,
    /// How style directives render.
    pub style: StyleMode,
    /// The processor's seeded random source.
    pub rng: &'a mut ChaCha8Rng,
}

impl DirectiveContext<'_> {
    /// Resolves an object reference: a caller binding, `player`, or an
    /// object name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::UnknownObject`] if nothing matches.
    pub fn object(&self, name: &str) -> Result<ObjectId, DirectiveError> {
        if let Some(id) = self.params.get(name) {
            return Ok(id);
        }
        if name == "player" {
            return Ok(self.world.player());
        }
        self.world
            .lookup(name)
            .ok_or_else(|| DirectiveError::UnknownObject(name.to_string()))
    }

    /// Reads a field: an accessor first, then the object's stored
    /// properties. `None` when neither exists.
    #[must_use]
    pub fn field(&self, object: ObjectId, field: &str) -> Option<Value> {
        self.accessors
            .call(self.world, object, field)
            .or_else(|| self.world.get(object).and_then(|o| o.property(field)))
    }

    /// Picks one option uniformly.
    pub fn choose<'s>(&mut self, options: &[&'s str]) -> Option<&'s str> {
        if options.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..options.len());
        options.get(index).copied()
    }

    /// Renders a value for display; object references show their alias.
    #[must_use]
    pub fn render(&self, value: &Value) -> String {
        match value {
            Value::Object(id) => self
                .world
                .get(*id)
                .map_or_else(|| value.to_string(), |o| o.alias.clone()),
            other => other.to_string(),
        }
    }
}

fn require(name: &str, args: &[&str], expected: usize) -> Result<(), DirectiveError> {
    if args.len() < expected {
        return Err(DirectiveError::MissingArgument {
            directive: name.to_string(),
            expected,
        });
    }
    Ok(())
}

fn styled(style: Style) -> Directive {
    Arc::new(move |args: &[&str], ctx: &mut DirectiveContext<'_>| {
        Ok(style.apply(ctx.style, &args.join(":")))
    })
}

fn coloured(name: &'static str, background: bool) -> Directive {
    Arc::new(move |args: &[&str], ctx: &mut DirectiveContext<'_>| {
        require(name, args, 1)?;
        let colour = args[0].to_string();
        let style = if background {
            Style::Background(colour)
        } else {
            Style::Colour(colour)
        };
        Ok(style.apply(ctx.style, &args[1..].join(":")))
    })
}

fn random() -> Directive {
    Arc::new(|args: &[&str], ctx: &mut DirectiveContext<'_>| {
        Ok(ctx.choose(args).unwrap_or_default().to_string())
    })
}

fn show() -> Directive {
    Arc::new(|args: &[&str], ctx: &mut DirectiveContext<'_>| {
        require("show", args, 2)?;
        let id = ctx.object(args[0])?;
        let value = ctx.field(id, args[1]).ok_or_else(|| DirectiveError::UnknownField {
            object: args[0].to_string(),
            field: args[1].to_string(),
        })?;
        Ok(ctx.render(&value))
    })
}

fn conditional() -> Directive {
    Arc::new(|args: &[&str], ctx: &mut DirectiveContext<'_>| {
        require("if", args, 3)?;
        let id = ctx.object(args[0])?;
        let truthy = ctx.field(id, args[1]).is_some_and(|v| v.is_truthy());
        let chosen = if truthy { args.get(2) } else { args.get(3) };
        Ok(chosen.copied().unwrap_or_default().to_string())
    })
}

fn img() -> Directive {
    Arc::new(|args: &[&str], ctx: &mut DirectiveContext<'_>| {
        require("img", args, 3)?;
        Ok(style::image(ctx.style, args[0], args[1], args[2]))
    })
}

fn once() -> Directive {
    Arc::new(|args: &[&str], ctx: &mut DirectiveContext<'_>| {
        Ok(if ctx.first_time {
            args.join(":")
        } else {
            String::new()
        })
    })
}

/// `{nm:OBJECT:the|a}` - an object's alias with an optional article.
fn name() -> Directive {
    Arc::new(|args: &[&str], ctx: &mut DirectiveContext<'_>| {
        require("nm", args, 1)?;
        let id = ctx.object(args[0])?;
        let obj = ctx
            .world
            .get(id)
            .ok_or_else(|| DirectiveError::UnknownObject(args[0].to_string()))?;
        Ok(match args.get(1).copied() {
            Some("the") => english::the(obj),
            Some("a") => english::a(obj),
            _ => obj.alias.clone(),
        })
    })
}

/// `{pv:OBJECT:VERB}` - pronoun plus conjugated verb, capitalised.
fn pronoun_verb() -> Directive {
    Arc::new(|args: &[&str], ctx: &mut DirectiveContext<'_>| {
        require("pv", args, 2)?;
        let id = ctx.object(args[0])?;
        let obj = ctx
            .world
            .get(id)
            .ok_or_else(|| DirectiveError::UnknownObject(args[0].to_string()))?;
        Ok(english::pronoun_verb(obj, args[1], true))
    })
}

/// The built-in directive table.
pub(crate) fn builtins() -> Vec<(&'static str, Directive)> {
    vec![
        ("i", styled(Style::Italic)),
        ("b", styled(Style::Bold)),
        ("u", styled(Style::Underline)),
        ("s", styled(Style::Strike)),
        ("colour", coloured("colour", false)),
        ("color", coloured("color", false)),
        ("back", coloured("back", true)),
        ("random", random()),
        ("show", show()),
        ("if", conditional()),
        ("img", img()),
        ("once", once()),
        ("nm", name()),
        ("pv", pronoun_verb()),
    ]
}
