//! Delegation and agreement.
//!
//! When a command's actor is a character other than the player, the
//! character must agree before the effect runs. Each character is its own
//! policy: a hook for one action family, a hook for everything else, or the
//! default shared by every character. Which of those is asked first is
//! configurable ([`EngineConfig::agreement_order`]); the first source that
//! has a hook decides, and with no hook at all the character consents.
//!
//! [`EngineConfig::agreement_order`]: crate::config::EngineConfig::agreement_order

use std::sync::Arc;

use log::trace;
use taleforge_foundation::ObjectId;
use taleforge_storage::Direction;

use crate::context::TurnContext;

/// Groups of commands a character can have a specific opinion about.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ActionFamily {
    /// Taking things.
    Take,
    /// Moving through exits.
    Go,
    /// Dropping things.
    Drop,
    /// Sitting on furniture.
    SitOn,
    /// Everything else.
    Generic,
}

/// Where an agreement answer can come from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AgreementSource {
    /// The character's hook for this action family.
    Specific,
    /// The character's hook for any action.
    Generic,
    /// The default registered for every character.
    CapabilityDefault,
}

impl AgreementSource {
    /// Specific, then generic, then the shared default.
    pub const DEFAULT_ORDER: [AgreementSource; 3] = [
        AgreementSource::Specific,
        AgreementSource::Generic,
        AgreementSource::CapabilityDefault,
    ];
}

/// What a character is being asked to do.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AgreementRequest {
    /// The character asked.
    pub character: ObjectId,
    /// The kind of action.
    pub family: ActionFamily,
    /// The object acted on, if any.
    pub object: Option<ObjectId>,
    /// The direction, for movement.
    pub direction: Option<Direction>,
}

impl AgreementRequest {
    /// A request for `character` to perform an action of `family`.
    #[must_use]
    pub fn new(character: ObjectId, family: ActionFamily) -> Self {
        Self {
            character,
            family,
            object: None,
            direction: None,
        }
    }

    /// Sets the object acted on.
    #[must_use]
    pub fn with_object(mut self, object: ObjectId) -> Self {
        self.object = Some(object);
        self
    }

    /// Sets the direction of travel.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// An agreement hook. It may narrate and returns whether the character
/// consents.
pub type AgreementHook =
    Arc<dyn Fn(&mut TurnContext<'_>, &AgreementRequest) -> bool + Send + Sync>;

/// Asks the request's character for consent.
pub fn seek_agreement(ctx: &mut TurnContext<'_>, request: &AgreementRequest) -> bool {
    let order = ctx.config.agreement_order.clone();
    for source in order {
        let hook = match source {
            AgreementSource::Specific => ctx
                .hooks
                .specific_agreement(request.character, request.family),
            AgreementSource::Generic => ctx.hooks.generic_agreement(request.character),
            AgreementSource::CapabilityDefault => ctx.hooks.capability_agreement(request.family),
        };
        if let Some(hook) = hook {
            let agreed = hook(ctx, request);
            trace!(
                "{} {} {:?} via {source:?}",
                ctx.world.name_of(request.character),
                if agreed { "agrees to" } else { "refuses" },
                request.family,
            );
            return agreed;
        }
    }
    trace!(
        "{} agrees to {:?} by default",
        ctx.world.name_of(request.character),
        request.family
    );
    true
}
