//! Round result types for settlement.

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player beats the dealer's total.
    Win,
    /// Player has a natural against a dealer without one.
    Blackjack,
    /// Player loses (player busts or dealer has higher value).
    Lose,
    /// Push (tie).
    Push,
    /// Dealer busts while the player stands.
    DealerBust,
}

impl HandOutcome {
    /// Returns the payout multiplier applied to the bet.
    #[must_use]
    pub const fn payout(self) -> f64 {
        match self {
            Self::Blackjack => 1.5,
            Self::Win | Self::DealerBust => 1.0,
            Self::Push => 0.0,
            Self::Lose => -1.0,
        }
    }
}

/// Result for a single player hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundResult {
    /// Index of the hand among the round's player hands.
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// Payout multiplier (1.5, 1, 0, or -1).
    pub payout: f64,
    /// The bet amount for this hand.
    pub bet: usize,
    /// Net winnings (`bet * payout`, rounded); negative for a loss.
    pub net: isize,
    /// The player's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
}
