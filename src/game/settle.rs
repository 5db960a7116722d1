use alloc::vec::Vec;

use rand::RngCore;
use tracing::debug;

use crate::card::Card;
use crate::evaluator;
use crate::event::GameEvent;
use crate::hand::Hand;

use super::{Game, GameState};

impl<R: RngCore> Game<R> {
    /// Plays the dealer hand once every player hand is settled, then settles
    /// the round.
    ///
    /// When every player hand has busted the dealer neither reveals nor
    /// draws.
    pub(super) fn play_dealer_turn(&mut self) {
        self.set_state(GameState::DealerTurn);

        if self.hands.iter().all(Hand::is_busted) {
            self.dealer_hand.settle();
            debug!("every player hand busted; dealer does not draw");
        } else {
            self.dealer_hand.reveal_hole();
            self.observers.emit(&GameEvent::DealerReveal {
                dealer: &self.dealer_hand,
            });
            self.dealer.play_dealer_hand(&mut self.dealer_hand);
        }

        self.observers.emit(&GameEvent::DealerDone {
            dealer: &self.dealer_hand,
            total: self.dealer_hand.value(),
        });

        self.settle();
    }

    /// Compares every player hand with the dealer, returns all cards to the
    /// discard pile and ends the round.
    pub(super) fn settle(&mut self) {
        self.set_state(GameState::Settlement);

        self.results = evaluator::settle_round(
            &self.hands,
            &self.dealer_hand,
            self.options.rounding_blackjack,
        );

        let cards: Vec<Card> = self
            .hands
            .iter()
            .chain(core::iter::once(&self.dealer_hand))
            .flat_map(|hand| hand.cards().iter().copied())
            .collect();
        debug!(
            hands = self.hands.len(),
            discarded = cards.len(),
            "round settled"
        );
        self.dealer.discard(cards);

        self.observers.emit(&GameEvent::Settlement {
            results: &self.results,
        });

        self.set_state(GameState::GameOver);
    }
}
