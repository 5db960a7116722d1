//! Player and dealer hand representation.

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ActionError;

/// Evaluates `cards`, returning the best total and whether it is soft.
///
/// Every Ace starts at 11 and is reduced to 1 while the total exceeds 21.
/// The total is soft when at least one Ace is still counted as 11.
#[must_use]
pub fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    (value, aces > 0)
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Hand is still in play.
    Active,
    /// Hand stood, doubled, or was settled explicitly.
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Hand is a blackjack (two cards totalling 21).
    Blackjack,
}

/// A hand of cards with its wager.
///
/// The same type is used for the dealer, flagged with [`Hand::is_dealer`].
/// The flag only affects what is visible before the hole card is revealed;
/// evaluation is identical.
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<Card>,
    bet: usize,
    status: HandStatus,
    dealer: bool,
    hole_revealed: bool,
}

impl Hand {
    /// Creates a new empty player hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            status: HandStatus::Active,
            dealer: false,
            hole_revealed: true,
        }
    }

    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn dealer() -> Self {
        Self {
            cards: Vec::new(),
            bet: 0,
            status: HandStatus::Active,
            dealer: true,
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    ///
    /// A hand that busts, or reaches 21 with exactly two cards, is settled
    /// immediately.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);

        if self.status != HandStatus::Active {
            return;
        }
        if self.is_busted() {
            self.status = HandStatus::Bust;
        } else if self.is_blackjack() {
            self.status = HandStatus::Blackjack;
        }
    }

    /// Returns the cards in deal order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Doubles the bet amount.
    ///
    /// Returns `false` and leaves the bet unchanged if the doubled amount
    /// would overflow.
    #[must_use]
    pub const fn double_bet(&mut self) -> bool {
        match self.bet.checked_mul(2) {
            Some(bet) => {
                self.bet = bet;
                true
            }
            None => false,
        }
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Returns whether the hand has finished acting.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.status != HandStatus::Active
    }

    /// Marks an active hand as settled. Busts and blackjacks keep their
    /// status.
    pub fn settle(&mut self) {
        if self.status == HandStatus::Active {
            self.status = HandStatus::Stand;
        }
    }

    /// Returns whether this is the dealer's hand.
    #[must_use]
    pub const fn is_dealer(&self) -> bool {
        self.dealer
    }

    /// Returns whether all cards are face up.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Calculates the value of the hand.
    ///
    /// Aces are counted as 11 if possible without busting, otherwise as 1.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Calculates the value visible to the table: the up card alone while a
    /// dealer's hole card is hidden.
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        if self.hole_revealed {
            self.value()
        } else {
            self.cards.first().map_or(0, Card::value)
        }
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Returns whether the hand can be split.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Returns whether the hand can double down.
    #[must_use]
    pub fn can_double_down(&self) -> bool {
        self.cards.len() == 2
    }

    /// Splits a pair into two one-card hands, each carrying the original bet.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::CannotSplit`] unless the hand holds exactly two
    /// cards of equal rank.
    pub fn split(&self) -> Result<(Self, Self), ActionError> {
        if !self.can_split() {
            return Err(ActionError::CannotSplit);
        }

        let mut first = Self::new(self.bet);
        first.cards.push(self.cards[0]);
        let mut second = Self::new(self.bet);
        second.cards.push(self.cards[1]);
        Ok((first, second))
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
