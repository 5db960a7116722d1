//! Outcome and payout evaluation for settled hands.

use alloc::vec::Vec;

use crate::hand::Hand;
use crate::options::RoundingMode;
use crate::result::{HandOutcome, RoundResult};

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

/// Compares a settled player hand against the settled dealer hand.
///
/// The first matching rule wins:
/// 1. a busted player loses;
/// 2. a player blackjack pushes against a dealer blackjack and wins 3:2
///    otherwise, including against a dealer 21 made with three or more cards;
/// 3. a busted dealer pays even money;
/// 4. otherwise the higher total wins and equal totals push.
#[must_use]
pub fn compare_hands(player: &Hand, dealer: &Hand) -> HandOutcome {
    if player.is_busted() {
        return HandOutcome::Lose;
    }

    if player.is_blackjack() {
        return if dealer.is_blackjack() {
            HandOutcome::Push
        } else {
            HandOutcome::Blackjack
        };
    }

    if dealer.is_busted() {
        return HandOutcome::DealerBust;
    }

    let player_value = player.value();
    let dealer_value = dealer.value();
    if player_value > dealer_value {
        HandOutcome::Win
    } else if player_value < dealer_value {
        HandOutcome::Lose
    } else {
        HandOutcome::Push
    }
}

/// Computes the net amount for `bet` at `outcome`'s multiplier.
///
/// Fractional winnings are rounded with `rounding`. Amounts beyond the
/// range of `isize` saturate.
#[must_use]
pub fn net_amount(bet: usize, outcome: HandOutcome, rounding: RoundingMode) -> isize {
    let payout = outcome.payout();
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    let magnitude = round_amount(bet as f64 * payout.abs(), rounding);
    let magnitude = isize::try_from(magnitude).unwrap_or(isize::MAX);
    if payout < 0.0 { -magnitude } else { magnitude }
}

/// Settles every player hand against the dealer hand.
///
/// Inputs are only read.
#[must_use]
pub fn settle_round(hands: &[Hand], dealer: &Hand, rounding: RoundingMode) -> Vec<RoundResult> {
    let dealer_value = dealer.value();

    hands
        .iter()
        .enumerate()
        .map(|(hand_index, hand)| {
            let outcome = compare_hands(hand, dealer);
            RoundResult {
                hand_index,
                outcome,
                payout: outcome.payout(),
                bet: hand.bet(),
                net: net_amount(hand.bet(), outcome, rounding),
                player_value: hand.value(),
                dealer_value,
            }
        })
        .collect()
}
