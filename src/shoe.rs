//! The card shoe: live cards, discard pile and the reshuffle policy.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::{debug, trace, warn};

use crate::card::{Card, DECK_SIZE, Suit};

/// A multi-deck shoe.
///
/// Cards are drawn from the front of the live pile. Burned and settled cards
/// go to the discard pile, which is merged back into the live pile when the
/// shoe reaches its penetration threshold.
#[derive(Debug, Clone)]
pub struct Shoe<R> {
    live: VecDeque<Card>,
    discard: Vec<Card>,
    /// Live size at the last build or reshuffle.
    total_cards: usize,
    penetration: f64,
    decks: u8,
    rng: R,
}

impl<R: RngCore> Shoe<R> {
    /// Creates a freshly built and shuffled shoe.
    pub fn new(decks: u8, penetration: f64, rng: R) -> Self {
        let mut shoe = Self {
            live: VecDeque::new(),
            discard: Vec::new(),
            total_cards: 0,
            penetration,
            decks,
            rng,
        };
        shoe.reset();
        shoe
    }

    /// Rebuilds every deck, clears the discard pile and shuffles.
    pub fn reset(&mut self) {
        let mut cards = Vec::with_capacity(self.decks as usize * DECK_SIZE);

        for _ in 0..self.decks {
            for suit in Suit::ALL {
                for rank in 1..=13 {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards.shuffle(&mut self.rng);
        self.discard.clear();
        self.total_cards = cards.len();
        self.live = cards.into();
        debug!(decks = self.decks, cards = self.total_cards, "shoe built");
    }

    /// Replaces the live pile with `cards` in draw order and clears the
    /// discard pile. No shuffle is performed.
    pub fn stack(&mut self, cards: Vec<Card>) {
        self.discard.clear();
        self.total_cards = cards.len();
        self.live = cards.into();
    }

    /// Moves up to `n` cards from the front of the live pile to the discard
    /// pile without exposing them.
    pub fn burn(&mut self, n: usize) {
        let n = n.min(self.live.len());
        self.discard.extend(self.live.drain(..n));
        debug!(burned = n, remaining = self.live.len(), "burned cards");
    }

    /// Draws up to `n` cards from the front of the live pile.
    ///
    /// Reshuffles first if the penetration threshold has been reached. If
    /// fewer than `n` cards remain afterwards, only those are returned.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        if self.reshuffle_due() {
            self.reshuffle();
        }

        let available = n.min(self.live.len());
        if available < n {
            warn!(requested = n, available, "shoe exhausted");
        }

        let cards: Vec<Card> = self.live.drain(..available).collect();
        trace!(drawn = cards.len(), remaining = self.live.len(), "drew cards");
        cards
    }

    /// Draws a single card, if any remain.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.draw(1).pop()
    }

    /// Appends cards to the discard pile.
    pub fn discard<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.discard.extend(cards);
    }

    /// Returns whether the next draw will reshuffle.
    ///
    /// An empty live pile always needs a reshuffle. Otherwise the shoe is due
    /// once the live count falls to `total_cards * (1 - penetration)` or
    /// below, so a penetration of 0 reshuffles before every draw.
    #[must_use]
    pub fn reshuffle_due(&self) -> bool {
        if self.live.is_empty() {
            return !self.discard.is_empty();
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let threshold = (self.total_cards as f64 * (1.0 - self.penetration)) as usize;
        self.live.len() <= threshold
    }

    /// Merges the discard pile back into the live pile and shuffles.
    pub fn reshuffle(&mut self) {
        let mut cards: Vec<Card> = self.live.drain(..).collect();
        cards.append(&mut self.discard);
        cards.shuffle(&mut self.rng);
        self.total_cards = cards.len();
        self.live = cards.into();
        debug!(cards = self.total_cards, "shoe reshuffled");
    }

    /// Returns the number of cards left to draw.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    /// Returns the number of cards in the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Returns the live size at the last build or reshuffle.
    #[must_use]
    pub const fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Returns the number of decks the shoe is built from.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Returns the configured penetration.
    #[must_use]
    pub const fn penetration(&self) -> f64 {
        self.penetration
    }

    /// Returns the live cards in draw order.
    pub fn live(&self) -> impl Iterator<Item = &Card> {
        self.live.iter()
    }
}
