use rand::RngCore;

use crate::error::BetError;
use crate::event::GameEvent;
use crate::hand::Hand;

use super::{Game, GameState};

impl<R: RngCore> Game<R> {
    /// Places one wager per player hand and deals the round.
    ///
    /// If the dealer has a natural, or every player hand is a natural, the
    /// player turn is skipped and the round settles immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state or `bets` is
    /// empty.
    pub fn place_bets(&mut self, bets: &[usize]) -> Result<(), BetError> {
        if self.state != GameState::Betting {
            return Err(BetError::InvalidState);
        }
        if bets.is_empty() {
            return Err(BetError::NoBets);
        }

        self.set_state(GameState::Dealing);

        let (hands, dealer_hand) = self.dealer.deal_initial(bets);
        self.hands = hands;
        self.dealer_hand = dealer_hand;
        self.active = 0;
        self.observers.emit(&GameEvent::Dealt {
            hands: &self.hands,
            dealer: &self.dealer_hand,
        });

        if self.dealer_hand.is_blackjack() || self.hands.iter().all(Hand::is_blackjack) {
            self.dealer_hand.reveal_hole();
            self.dealer_hand.settle();
            self.observers.emit(&GameEvent::DealerReveal {
                dealer: &self.dealer_hand,
            });
            self.settle();
            return Ok(());
        }

        self.set_state(GameState::PlayerTurn);
        match self.next_unsettled(0) {
            Some(index) => {
                self.active = index;
                self.observers.emit(&GameEvent::ActiveHandChange { index });
            }
            None => self.play_dealer_turn(),
        }

        Ok(())
    }
}
