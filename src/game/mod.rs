//! Round engine and state management.

use alloc::boxed::Box;
use alloc::vec::Vec;

use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::dealer::Dealer;
use crate::error::{OptionsError, RoundError};
use crate::event::{GameEvent, Observer, Observers, SubscriberId};
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::result::RoundResult;
use crate::shoe::Shoe;

mod actions;
mod bet;
mod settle;
pub mod state;

pub use state::GameState;

/// A blackjack round engine.
///
/// The game owns the dealer (and through it the shoe), the player hands and
/// the dealer hand for the current round. Every action runs to completion
/// before returning; the round is driven by a single caller.
pub struct Game<R = ChaCha8Rng> {
    options: GameOptions,
    state: GameState,
    dealer: Dealer<R>,
    /// Player hands in seat order; split hands are inserted in place.
    hands: Vec<Hand>,
    dealer_hand: Hand,
    /// Index of the player hand currently acting.
    active: usize,
    results: Vec<RoundResult>,
    observers: Observers,
}

impl Game<ChaCha8Rng> {
    /// Creates a new game whose shoe is shuffled from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` fail validation.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebox::{Game, GameOptions, GameState};
    ///
    /// let game = Game::new(GameOptions::default(), 42).unwrap();
    /// assert_eq!(game.state(), GameState::Betting);
    /// ```
    pub fn new(options: GameOptions, seed: u64) -> Result<Self, OptionsError> {
        Self::with_rng(options, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Game<R> {
    /// Creates a new game shuffling with the given random source.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` fail validation.
    pub fn with_rng(options: GameOptions, rng: R) -> Result<Self, OptionsError> {
        options.validate()?;

        let shoe = Shoe::new(options.decks, options.penetration, rng);
        let dealer = Dealer::new(shoe, options.hit_soft_17);

        Ok(Self {
            options,
            state: GameState::Betting,
            dealer,
            hands: Vec::new(),
            dealer_hand: Hand::dealer(),
            active: 0,
            results: Vec::new(),
            observers: Observers::default(),
        })
    }

    /// Registers an observer for round events and returns its handle.
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriberId
    where
        O: Observer + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Returns the game options.
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the current round state.
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the player hands.
    ///
    /// Hands of a finished round stay readable until [`Game::new_round`],
    /// although their cards already sit in the discard pile.
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the dealer hand.
    pub const fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    /// Returns the index of the acting hand during the player turn.
    pub const fn active_hand_index(&self) -> Option<usize> {
        match self.state {
            GameState::PlayerTurn => Some(self.active),
            _ => None,
        }
    }

    /// Returns the results of the last settlement.
    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    /// Returns the shoe.
    pub const fn shoe(&self) -> &Shoe<R> {
        self.dealer.shoe()
    }

    /// Returns the shoe mutably, e.g. to stack it.
    pub const fn shoe_mut(&mut self) -> &mut Shoe<R> {
        self.dealer.shoe_mut()
    }

    /// Returns the number of cards held by hands that are still in play.
    pub fn cards_in_play(&self) -> usize {
        match self.state {
            GameState::Dealing | GameState::PlayerTurn | GameState::DealerTurn => {
                self.hands.iter().map(Hand::len).sum::<usize>() + self.dealer_hand.len()
            }
            GameState::Betting | GameState::Settlement | GameState::GameOver => 0,
        }
    }

    /// Clears the finished round and reopens betting.
    ///
    /// # Errors
    ///
    /// Returns an error unless the previous round is over.
    pub fn new_round(&mut self) -> Result<(), RoundError> {
        if self.state != GameState::GameOver {
            return Err(RoundError::InvalidState);
        }

        self.hands.clear();
        self.dealer_hand = Hand::dealer();
        self.active = 0;
        self.results.clear();
        self.set_state(GameState::Betting);
        Ok(())
    }

    fn set_state(&mut self, to: GameState) {
        let from = self.state;
        self.state = to;
        debug!(?from, ?to, "round state changed");
        self.observers.emit(&GameEvent::StateChange { from, to });
    }

    /// Returns the first unsettled player hand at or after `from`.
    fn next_unsettled(&self, from: usize) -> Option<usize> {
        self.hands
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, hand)| !hand.is_settled())
            .map(|(index, _)| index)
    }
}
