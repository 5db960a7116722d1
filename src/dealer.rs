//! The dealer: deals from the shoe and plays the house hand.

use alloc::vec::Vec;

use rand::RngCore;
use tracing::debug;

use crate::card::Card;
use crate::hand::Hand;
use crate::shoe::Shoe;

/// Deals cards from an owned [`Shoe`] and runs the house policy.
#[derive(Debug, Clone)]
pub struct Dealer<R> {
    shoe: Shoe<R>,
    hit_soft_17: bool,
}

impl<R: RngCore> Dealer<R> {
    /// Creates a dealer that owns `shoe`.
    pub const fn new(shoe: Shoe<R>, hit_soft_17: bool) -> Self {
        Self { shoe, hit_soft_17 }
    }

    /// Returns the shoe.
    pub const fn shoe(&self) -> &Shoe<R> {
        &self.shoe
    }

    /// Returns the shoe mutably.
    pub const fn shoe_mut(&mut self) -> &mut Shoe<R> {
        &mut self.shoe
    }

    /// Returns whether the dealer hits a soft 17.
    pub const fn hits_soft_17(&self) -> bool {
        self.hit_soft_17
    }

    /// Burns one card and deals the opening hands.
    ///
    /// One player hand is created per entry in `bets`. Cards go out in two
    /// passes; each pass deals one card to every player hand in order, then
    /// one to the dealer.
    pub fn deal_initial(&mut self, bets: &[usize]) -> (Vec<Hand>, Hand) {
        self.shoe.burn(1);

        let mut hands: Vec<Hand> = bets.iter().map(|&bet| Hand::new(bet)).collect();
        let mut dealer = Hand::dealer();

        for _ in 0..2 {
            for hand in &mut hands {
                self.hit(hand);
            }
            self.hit(&mut dealer);
        }

        debug!(players = hands.len(), "dealt opening hands");
        (hands, dealer)
    }

    /// Draws one card into `hand`.
    ///
    /// Returns `None` and leaves the hand unchanged if the shoe is empty.
    pub fn hit(&mut self, hand: &mut Hand) -> Option<Card> {
        let card = self.shoe.draw_one()?;
        hand.add_card(card);
        Some(card)
    }

    /// Returns whether the house policy draws on `hand`.
    ///
    /// The dealer hits below 17, and on a soft 17 only when configured to.
    pub fn should_hit(&self, hand: &Hand) -> bool {
        let value = hand.value();
        value < 17 || (value == 17 && hand.is_soft() && self.hit_soft_17)
    }

    /// Plays the dealer's hand to completion and settles it.
    ///
    /// Stops early if the shoe runs dry. Returns the final total.
    pub fn play_dealer_hand(&mut self, hand: &mut Hand) -> u8 {
        while self.should_hit(hand) {
            if self.hit(hand).is_none() {
                break;
            }
        }

        hand.settle();
        let total = hand.value();
        debug!(total, cards = hand.len(), "dealer stands");
        total
    }

    /// Returns cards to the shoe's discard pile.
    pub fn discard<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.shoe.discard(cards);
    }
}
