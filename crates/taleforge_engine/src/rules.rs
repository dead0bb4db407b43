//! Precondition rules.
//!
//! Rules run in order before a command's effect: once per item for per-item
//! commands, once for the whole command otherwise. The first rule that fails
//! narrates its message and the item (or command) is abandoned; nothing in
//! the world changes.

use std::fmt;
use std::sync::Arc;

use taleforge_foundation::ObjectId;
use taleforge_parser::ScopeResolver;
use taleforge_storage::{World, WorldObject};

use crate::lang;

/// Result of checking a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreconditionResult {
    /// The rule holds.
    Pass,
    /// The rule failed with a message
    Fail {
        /// The failure message to display
        message: String,
    },
}

impl PreconditionResult {
    /// Fails with `message`.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail {
            message: message.into(),
        }
    }

    /// Returns true for [`PreconditionResult::Pass`].
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// What a rule gets to look at.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    /// The world before the effect runs.
    pub world: &'a World,
    /// Who is acting.
    pub actor: &'a WorldObject,
    /// The item being acted on, if the command bound one.
    pub item: Option<&'a WorldObject>,
}

impl<'a> RuleContext<'a> {
    /// Scope predicates for the actor.
    #[must_use]
    pub fn scope(&self) -> ScopeResolver<'a> {
        ScopeResolver::new(self.world, self.actor.id())
    }
}

/// A rule check.
pub type RuleCheck = Arc<dyn Fn(&RuleContext<'_>) -> PreconditionResult + Send + Sync>;

/// A named precondition.
#[derive(Clone)]
pub struct Rule {
    /// Name for logs.
    pub name: String,
    check: RuleCheck,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Rule {
    /// Creates a rule from a check.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&RuleContext<'_>) -> PreconditionResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Creates a rule about the bound item. It passes when the command
    /// bound no item.
    pub fn for_item<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&RuleContext<'_>, &WorldObject) -> PreconditionResult + Send + Sync + 'static,
    {
        Self::new(name, move |ctx: &RuleContext<'_>| match ctx.item {
            Some(item) => check(ctx, item),
            None => PreconditionResult::Pass,
        })
    }

    /// Runs the rule.
    #[must_use]
    pub fn check(&self, ctx: &RuleContext<'_>) -> PreconditionResult {
        (self.check)(ctx)
    }

    // =========================================================================
    // Standard rules
    // =========================================================================

    /// The actor carries the item, worn or not.
    #[must_use]
    pub fn held() -> Self {
        Self::for_item("held", |ctx: &RuleContext<'_>, item: &WorldObject| {
            if ctx.scope().is_held_or_worn(item.id()) {
                PreconditionResult::Pass
            } else {
                PreconditionResult::fail(lang::not_carrying(ctx.actor, item))
            }
        })
    }

    /// The actor carries the item and is not wearing it.
    #[must_use]
    pub fn held_not_worn() -> Self {
        Self::for_item("held not worn", |ctx: &RuleContext<'_>, item: &WorldObject| {
            let scope = ctx.scope();
            if scope.is_worn(item.id()) {
                PreconditionResult::fail(lang::wearing(ctx.actor, item))
            } else if scope.is_held(item.id()) {
                PreconditionResult::Pass
            } else {
                PreconditionResult::fail(lang::not_carrying(ctx.actor, item))
            }
        })
    }

    /// The actor wears the item.
    #[must_use]
    pub fn worn() -> Self {
        Self::for_item("worn", |ctx: &RuleContext<'_>, item: &WorldObject| {
            if ctx.scope().is_worn(item.id()) {
                PreconditionResult::Pass
            } else {
                PreconditionResult::fail(lang::not_wearing(ctx.actor, item))
            }
        })
    }

    /// The actor does not already carry the item.
    #[must_use]
    pub fn not_held() -> Self {
        Self::for_item("not held", |ctx: &RuleContext<'_>, item: &WorldObject| {
            if ctx.scope().is_held_or_worn(item.id()) {
                PreconditionResult::fail(lang::already_have(ctx.actor, item))
            } else {
                PreconditionResult::Pass
            }
        })
    }

    /// The item is not the actor.
    #[must_use]
    pub fn not_self() -> Self {
        Self::for_item("not self", |ctx: &RuleContext<'_>, item: &WorldObject| {
            if item.id() == ctx.actor.id() {
                PreconditionResult::fail(lang::not_able(ctx.actor, item))
            } else {
                PreconditionResult::Pass
            }
        })
    }

    /// The actor can touch the item. Seen through glass but out of reach
    /// names the closed container in the way.
    #[must_use]
    pub fn reachable() -> Self {
        Self::for_item("reachable", |ctx: &RuleContext<'_>, item: &WorldObject| {
            let scope = ctx.scope();
            let id = item.id();
            if scope.is_reachable(id) {
                return PreconditionResult::Pass;
            }
            if scope.is_visible(id) {
                if let Some(blocker) = closed_ancestor(ctx.world, id) {
                    return PreconditionResult::fail(lang::is_closed(blocker));
                }
            }
            PreconditionResult::fail(lang::not_here(item))
        })
    }

    /// The actor can see the item.
    #[must_use]
    pub fn visible() -> Self {
        Self::for_item("visible", |ctx: &RuleContext<'_>, item: &WorldObject| {
            if ctx.scope().is_visible(item.id()) {
                PreconditionResult::Pass
            } else {
                PreconditionResult::fail(lang::not_here(item))
            }
        })
    }
}

fn closed_ancestor(world: &World, id: ObjectId) -> Option<&WorldObject> {
    world
        .ancestors(id)
        .into_iter()
        .filter_map(|a| world.get(a))
        .find(|o| o.is_closed())
}

/// Runs `rules` in order and returns the first failure.
#[must_use]
pub fn check_all(rules: &[Rule], ctx: &RuleContext<'_>) -> PreconditionResult {
    for rule in rules {
        match rule.check(ctx) {
            PreconditionResult::Pass => continue,
            fail => return fail,
        }
    }
    PreconditionResult::Pass
}
