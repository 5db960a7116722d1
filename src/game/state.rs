//! Round state types.

/// Round state.
///
/// A round runs `Betting → Dealing → PlayerTurn → DealerTurn → Settlement →
/// GameOver`, and [`crate::Game::new_round`] returns from `GameOver` to
/// `Betting`. `Dealing`, `DealerTurn` and `Settlement` are passed through
/// within a single action and are only observable through events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Accepting bets for the round.
    Betting,
    /// Dealing the opening hands.
    Dealing,
    /// Waiting for player actions on the active hand.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Hands are compared and paid.
    Settlement,
    /// Round has ended; results are available.
    GameOver,
}
