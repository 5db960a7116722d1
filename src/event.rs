//! Round notifications for view layers.
//!
//! Events are emitted synchronously while an action runs. They borrow the
//! engine's hands immutably, so a subscriber can render them but never
//! change them.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::card::Card;
use crate::game::GameState;
use crate::hand::Hand;
use crate::result::RoundResult;

/// Something that happened during a round.
#[derive(Debug, Clone, Copy)]
pub enum GameEvent<'a> {
    /// The round moved between states.
    StateChange {
        /// Previous state.
        from: GameState,
        /// New state.
        to: GameState,
    },
    /// The opening hands were dealt.
    Dealt {
        /// Player hands in seat order.
        hands: &'a [Hand],
        /// The dealer hand, hole card hidden.
        dealer: &'a Hand,
    },
    /// A player hand drew a card.
    PlayerHit {
        /// Index of the hand.
        index: usize,
        /// The card drawn.
        card: Card,
        /// The hand after the draw.
        hand: &'a Hand,
    },
    /// A player hand stood.
    PlayerStand {
        /// Index of the hand.
        index: usize,
        /// The hand.
        hand: &'a Hand,
    },
    /// A player hand doubled down.
    PlayerDouble {
        /// Index of the hand.
        index: usize,
        /// The card drawn, if the shoe had one.
        card: Option<Card>,
        /// The hand after the draw.
        hand: &'a Hand,
    },
    /// A player hand was split in place into two hands.
    PlayerSplit {
        /// Index of the first of the two new hands.
        index: usize,
        /// The two new hands.
        hands: &'a [Hand],
    },
    /// A player hand went over 21.
    PlayerBust {
        /// Index of the hand.
        index: usize,
        /// The busted hand.
        hand: &'a Hand,
    },
    /// A different player hand is now acting.
    ActiveHandChange {
        /// Index of the newly active hand.
        index: usize,
    },
    /// The dealer's hole card was turned over.
    DealerReveal {
        /// The dealer hand.
        dealer: &'a Hand,
    },
    /// The dealer finished playing.
    DealerDone {
        /// The dealer hand.
        dealer: &'a Hand,
        /// The dealer's final total.
        total: u8,
    },
    /// Every player hand was settled against the dealer.
    Settlement {
        /// One result per player hand.
        results: &'a [RoundResult],
    },
}

/// Receives round events.
pub trait Observer {
    /// Called for each event, in emission order.
    fn notify(&mut self, event: &GameEvent<'_>);
}

impl<F> Observer for F
where
    F: FnMut(&GameEvent<'_>),
{
    fn notify(&mut self, event: &GameEvent<'_>) {
        self(event);
    }
}

/// Handle returned by [`crate::Game::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Registered observers, notified in registration order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriberId, Box<dyn Observer>)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: &GameEvent<'_>) {
        for (_, observer) in &mut self.entries {
            observer.notify(event);
        }
    }
}
