//! Turn outcomes.
//!
//! A command reports completion through exactly one of three values; the
//! turn engine decides from it whether the clock advances and turnscripts
//! run.

/// How a command completed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TurnOutcome {
    /// The turn passes and turnscripts run.
    Success,
    /// State may have changed but the clock does not advance.
    SuccessNoTurnscripts,
    /// Nothing happened; the clock does not advance.
    Failed,
}

impl TurnOutcome {
    /// `Success` for true, `Failed` for false.
    #[must_use]
    pub const fn from_success(success: bool) -> Self {
        if success { Self::Success } else { Self::Failed }
    }

    /// Returns true unless the outcome is `Failed`.
    #[must_use]
    pub const fn succeeded(self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// Returns true if the clock advances.
    #[must_use]
    pub const fn advances(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Combines the outcomes of a command applied to several objects:
    /// `Success` if any object succeeded, otherwise `Failed`.
    #[must_use]
    pub fn aggregate(items: impl IntoIterator<Item = ItemOutcome>) -> Self {
        Self::from_success(
            items
                .into_iter()
                .fold(false, |any, item| any | (item == ItemOutcome::Succeeded)),
        )
    }
}

/// What happened to one object of a command.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ItemOutcome {
    /// The action was carried out.
    Succeeded,
    /// The action was refused; a message has been narrated.
    Failed,
    /// The object does not support the action; the command's default
    /// failure message should be narrated.
    NotApplicable,
}

impl ItemOutcome {
    /// `Succeeded` for true, `Failed` for false.
    #[must_use]
    pub const fn from_success(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }

    /// Returns true for `Succeeded`.
    #[must_use]
    pub const fn succeeded(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}
