//! A single-round blackjack engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that sequences one round through
//! betting, dealing, player turns, dealer play, and settlement. The game
//! owns a [`Dealer`], which owns the [`Shoe`]; hands are evaluated by
//! [`Hand`] and compared by the functions in [`evaluator`]. View layers
//! subscribe to [`GameEvent`]s.
//!
//! # Example
//!
//! ```
//! use shoebox::{Game, GameOptions, GameState};
//!
//! let mut game = Game::new(GameOptions::default(), 42).unwrap();
//! game.place_bets(&[10, 25]).unwrap();
//! while game.state() == GameState::PlayerTurn {
//!     game.player_stand().unwrap();
//! }
//! assert_eq!(game.state(), GameState::GameOver);
//! assert_eq!(game.results().len(), 2);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod dealer;
pub mod error;
pub mod evaluator;
pub mod event;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
pub mod shoe;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use dealer::Dealer;
pub use error::{ActionError, BetError, OptionsError, RoundError};
pub use evaluator::{compare_hands, settle_round};
pub use event::{GameEvent, Observer, SubscriberId};
pub use game::{Game, GameState};
pub use hand::{Hand, HandStatus};
pub use options::{DoubleOption, GameOptions, RoundingMode};
pub use result::{HandOutcome, RoundResult};
pub use shoe::Shoe;
