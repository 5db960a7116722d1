//! Error types for round operations.
//!
//! Every `InvalidState` variant means the action was invoked while the round
//! was in a state that does not permit it. The remaining variants report a
//! failed precondition on an otherwise valid action. Neither kind mutates the
//! round. Running out of cards is not an error anywhere in this crate.

use thiserror::Error;

/// Errors that can occur while placing bets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// No wagers were supplied.
    #[error("no bets were placed")]
    NoBets,
}

impl BetError {
    /// Returns whether the error is an invalid state transition.
    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidState)
    }
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// No player hand is currently acting.
    #[error("no active hand")]
    NoActiveHand,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
}

impl ActionError {
    /// Returns whether the error is an invalid state transition.
    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidState)
    }
}

/// Errors that can occur when resetting for a new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The current round has not finished.
    #[error("the current round has not finished")]
    InvalidState,
}

/// Errors reported for invalid game options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// The shoe must contain at least one deck.
    #[error("the shoe must contain at least one deck")]
    NoDecks,
    /// Penetration must lie in `[0, 1)`.
    #[error("penetration must be at least 0 and below 1")]
    InvalidPenetration,
}
