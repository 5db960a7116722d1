use rand::RngCore;

use crate::card::Card;
use crate::error::ActionError;
use crate::event::GameEvent;

use super::{Game, GameState};

impl<R: RngCore> Game<R> {
    /// Returns the index of the acting hand, or why no action is possible.
    fn ensure_player_turn(&self) -> Result<usize, ActionError> {
        if self.state != GameState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        match self.hands.get(self.active) {
            Some(hand) if !hand.is_settled() => Ok(self.active),
            _ => Err(ActionError::NoActiveHand),
        }
    }

    /// Moves the turn to the next unsettled hand, or on to the dealer once
    /// every player hand is settled.
    fn advance_turn(&mut self) {
        match self.next_unsettled(self.active) {
            Some(index) => {
                if index != self.active {
                    self.active = index;
                    self.observers.emit(&GameEvent::ActiveHandChange { index });
                }
            }
            None => self.play_dealer_turn(),
        }
    }

    fn announce_bust(&mut self, index: usize) {
        let hand = &self.hands[index];
        if hand.is_busted() {
            self.observers.emit(&GameEvent::PlayerBust { index, hand });
        }
    }

    /// Player action: Hit (draw a card into the active hand).
    ///
    /// Returns `Ok(None)` without changing the hand if the shoe is empty.
    /// A hand that busts is settled and the turn advances.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state.
    pub fn player_hit(&mut self) -> Result<Option<Card>, ActionError> {
        let index = self.ensure_player_turn()?;

        let Some(card) = self.dealer.hit(&mut self.hands[index]) else {
            return Ok(None);
        };

        self.observers.emit(&GameEvent::PlayerHit {
            index,
            card,
            hand: &self.hands[index],
        });

        if self.hands[index].is_settled() {
            self.announce_bust(index);
            self.advance_turn();
        }

        Ok(Some(card))
    }

    /// Player action: Stand (keep the active hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state.
    pub fn player_stand(&mut self) -> Result<(), ActionError> {
        let index = self.ensure_player_turn()?;

        self.hands[index].settle();
        self.observers.emit(&GameEvent::PlayerStand {
            index,
            hand: &self.hands[index],
        });
        self.advance_turn();

        Ok(())
    }

    /// Player action: Double down (double the bet, draw one card, stand).
    ///
    /// Returns the card drawn, or `None` if the shoe was empty; the hand is
    /// settled either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, or the
    /// active hand does not hold exactly two cards, its total is not allowed
    /// by [`crate::DoubleOption`], or its doubled bet would overflow.
    pub fn player_double_down(&mut self) -> Result<Option<Card>, ActionError> {
        let index = self.ensure_player_turn()?;

        let hand = &self.hands[index];
        if !hand.can_double_down() || !self.options.double.allows(hand.value()) {
            return Err(ActionError::CannotDouble);
        }

        let hand = &mut self.hands[index];
        if !hand.double_bet() {
            return Err(ActionError::CannotDouble);
        }
        let card = self.dealer.hit(hand);
        hand.settle();

        self.observers.emit(&GameEvent::PlayerDouble {
            index,
            card,
            hand: &self.hands[index],
        });
        self.announce_bust(index);
        self.advance_turn();

        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// The active hand is replaced in place by two one-card hands carrying
    /// the same bet, and each receives one more card. The first of them
    /// keeps the turn unless it is already settled.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state or the active
    /// hand is not a pair.
    pub fn player_split(&mut self) -> Result<(), ActionError> {
        let index = self.ensure_player_turn()?;

        let (mut first, mut second) = self.hands[index].split()?;
        self.dealer.hit(&mut first);
        self.dealer.hit(&mut second);
        self.hands[index] = first;
        self.hands.insert(index + 1, second);

        self.observers.emit(&GameEvent::PlayerSplit {
            index,
            hands: &self.hands[index..index + 2],
        });
        self.advance_turn();

        Ok(())
    }
}
