//! Round engine integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shoebox::{
    ActionError, BetError, Card, DECK_SIZE, DoubleOption, Game, GameEvent, GameOptions,
    GameState, HandOutcome, HandStatus, Observer, OptionsError, RoundError, Suit,
};

const fn card(rank: u8) -> Card {
    Card::new(Suit::Spades, rank)
}

/// Builds a one-deck game whose shoe yields `draws` in order. The first card
/// is the burn card. With a penetration of 0.99 a short stacked pile only
/// reshuffles once it is empty.
fn stacked_game(options: GameOptions, draws: &[Card]) -> Game {
    let mut game = Game::new(options.with_decks(1).with_penetration(0.99), 1).unwrap();
    game.shoe_mut().stack(draws.to_vec());
    game
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Observer for Recorder {
    fn notify(&mut self, event: &GameEvent<'_>) {
        let label = match event {
            GameEvent::StateChange { to, .. } => format!("state:{to:?}"),
            GameEvent::Dealt { .. } => "dealt".to_string(),
            GameEvent::PlayerHit { index, .. } => format!("hit:{index}"),
            GameEvent::PlayerStand { index, .. } => format!("stand:{index}"),
            GameEvent::PlayerDouble { index, .. } => format!("double:{index}"),
            GameEvent::PlayerSplit { index, .. } => format!("split:{index}"),
            GameEvent::PlayerBust { index, .. } => format!("bust:{index}"),
            GameEvent::ActiveHandChange { index } => format!("active:{index}"),
            GameEvent::DealerReveal { .. } => "reveal".to_string(),
            GameEvent::DealerDone { total, .. } => format!("dealer_done:{total}"),
            GameEvent::Settlement { results } => format!("settlement:{}", results.len()),
        };
        self.0.borrow_mut().push(label);
    }
}

fn conserved(game: &Game) -> usize {
    game.shoe().live_len() + game.shoe().discard_len() + game.cards_in_play()
}

#[test]
fn basic_round_flow() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(8),  // player
            card(6),  // dealer up
            card(7),  // player
            card(10), // dealer hole
            card(4),  // player hit
            card(5),  // dealer draw
        ],
    );
    let recorder = Recorder::default();
    game.subscribe(recorder.clone());

    game.place_bets(&[10]).unwrap();
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.active_hand_index(), Some(0));
    assert!(!game.dealer_hand().is_hole_revealed());

    assert_eq!(game.player_hit().unwrap(), Some(card(4)));
    assert_eq!(game.hands()[0].value(), 19);
    assert_eq!(game.state(), GameState::PlayerTurn);

    game.player_stand().unwrap();
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.active_hand_index(), None);

    let results = game.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].outcome, HandOutcome::Lose);
    assert_eq!(results[0].net, -10);
    assert_eq!(results[0].dealer_value, 21);

    assert_eq!(game.shoe().live_len(), 0);
    assert_eq!(game.shoe().discard_len(), 7);

    assert_eq!(
        recorder.events(),
        vec![
            "state:Dealing",
            "dealt",
            "state:PlayerTurn",
            "active:0",
            "hit:0",
            "stand:0",
            "state:DealerTurn",
            "reveal",
            "dealer_done:21",
            "state:Settlement",
            "settlement:1",
            "state:GameOver",
        ]
    );
}

#[test]
fn actions_outside_player_turn_are_rejected() {
    let mut game = Game::new(GameOptions::default(), 3).unwrap();

    for err in [
        game.player_hit().unwrap_err(),
        game.player_double_down().unwrap_err(),
        game.player_stand().unwrap_err(),
        game.player_split().unwrap_err(),
    ] {
        assert_eq!(err, ActionError::InvalidState);
        assert!(err.is_invalid_transition());
    }

    assert_eq!(game.new_round().unwrap_err(), RoundError::InvalidState);
    assert_eq!(game.state(), GameState::Betting);
}

#[test]
fn place_bets_requires_a_wager_and_betting_state() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[card(2), card(10), card(6), card(9), card(10)],
    );

    let err = game.place_bets(&[]).unwrap_err();
    assert_eq!(err, BetError::NoBets);
    assert!(!err.is_invalid_transition());
    assert_eq!(game.state(), GameState::Betting);
    assert_eq!(game.shoe().live_len(), 5);

    game.place_bets(&[10]).unwrap();
    assert_eq!(game.place_bets(&[10]).unwrap_err(), BetError::InvalidState);
}

#[test]
fn dealer_natural_skips_player_turn() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(10), // player 0
            card(1),  // player 1
            card(1),  // dealer up
            card(9),  // player 0
            card(13), // player 1
            card(13), // dealer hole
        ],
    );
    let recorder = Recorder::default();
    game.subscribe(recorder.clone());

    game.place_bets(&[10, 10]).unwrap();
    assert_eq!(game.state(), GameState::GameOver);
    assert!(game.dealer_hand().is_hole_revealed());

    let events = recorder.events();
    assert!(events.contains(&"state:Settlement".to_string()));
    assert!(!events.contains(&"state:PlayerTurn".to_string()));
    assert!(events.contains(&"reveal".to_string()));

    let results = game.results();
    assert_eq!(results[0].outcome, HandOutcome::Lose);
    assert_eq!(results[0].net, -10);
    assert_eq!(results[1].outcome, HandOutcome::Push);
    assert_eq!(results[1].net, 0);
}

#[test]
fn all_player_naturals_settle_without_dealer_draw() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(1),  // player
            card(9),  // dealer up
            card(13), // player
            card(7),  // dealer hole
            card(5),  // untouched
        ],
    );

    game.place_bets(&[10]).unwrap();
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.dealer_hand().len(), 2);
    assert_eq!(game.shoe().live_len(), 1);

    let results = game.results();
    assert_eq!(results[0].outcome, HandOutcome::Blackjack);
    assert_eq!(results[0].net, 15);
}

#[test]
fn bust_moves_turn_to_next_hand() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(10), // player 0
            card(9),  // player 1
            card(7),  // dealer up
            card(6),  // player 0
            card(9),  // player 1
            card(10), // dealer hole
            card(13), // player 0 hit
        ],
    );
    let recorder = Recorder::default();
    game.subscribe(recorder.clone());

    game.place_bets(&[10, 10]).unwrap();
    assert_eq!(game.player_hit().unwrap(), Some(card(13)));

    assert_eq!(game.hands()[0].status(), HandStatus::Bust);
    assert_eq!(game.active_hand_index(), Some(1));

    game.player_stand().unwrap();
    assert_eq!(game.state(), GameState::GameOver);

    let events = recorder.events();
    let hit = events.iter().position(|e| e == "hit:0").unwrap();
    assert_eq!(&events[hit..hit + 4], &["hit:0", "bust:0", "active:1", "stand:1"]);

    let results = game.results();
    assert_eq!(results[0].outcome, HandOutcome::Lose);
    assert_eq!(results[1].outcome, HandOutcome::Win);
    assert_eq!(results[1].net, 10);
}

#[test]
fn dealer_does_not_draw_when_every_hand_busted() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(10), // player
            card(6),  // dealer up
            card(6),  // player
            card(10), // dealer hole
            card(13), // player hit
            card(5),  // untouched
        ],
    );
    let recorder = Recorder::default();
    game.subscribe(recorder.clone());

    game.place_bets(&[10]).unwrap();
    game.player_hit().unwrap();

    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.dealer_hand().len(), 2);
    assert!(game.dealer_hand().is_settled());
    assert!(!game.dealer_hand().is_hole_revealed());
    assert_eq!(game.shoe().live_len(), 1);
    assert!(!recorder.events().contains(&"reveal".to_string()));
    assert_eq!(game.results()[0].outcome, HandOutcome::Lose);
}

#[test]
fn double_down_draws_one_and_ends_turn() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(5),  // player
            card(10), // dealer up
            card(6),  // player
            card(2),  // dealer hole
            card(10), // double draw
            card(5),  // dealer draw
        ],
    );

    game.place_bets(&[10]).unwrap();
    assert_eq!(game.player_double_down().unwrap(), Some(card(10)));
    assert_eq!(game.state(), GameState::GameOver);

    let hand = &game.hands()[0];
    assert_eq!(hand.bet(), 20);
    assert_eq!(hand.len(), 3);

    let results = game.results();
    assert_eq!(results[0].outcome, HandOutcome::Win);
    assert_eq!(results[0].net, 20);
    assert_eq!(results[0].dealer_value, 17);
}

#[test]
fn double_down_requires_two_cards() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(2),  // player
            card(10), // dealer up
            card(3),  // player
            card(7),  // dealer hole
            card(4),  // player hit
        ],
    );

    game.place_bets(&[10]).unwrap();
    game.player_hit().unwrap();

    let err = game.player_double_down().unwrap_err();
    assert_eq!(err, ActionError::CannotDouble);
    assert!(!err.is_invalid_transition());
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.hands()[0].bet(), 10);
    assert_eq!(game.hands()[0].len(), 3);
}

#[test]
fn double_option_limits_totals() {
    let mut game = stacked_game(
        GameOptions::default().with_double(DoubleOption::NineOrTen),
        &[card(2), card(5), card(10), card(3), card(7)],
    );

    game.place_bets(&[10]).unwrap();
    assert_eq!(
        game.player_double_down().unwrap_err(),
        ActionError::CannotDouble
    );
}

#[test]
fn split_replaces_hand_in_place() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(8),  // player
            card(5),  // dealer up
            card(8),  // player
            card(9),  // dealer hole
            card(2),  // first split hand
            card(3),  // second split hand
            card(10), // dealer draw
        ],
    );
    let recorder = Recorder::default();
    game.subscribe(recorder.clone());

    game.place_bets(&[10]).unwrap();
    game.player_split().unwrap();

    let hands = game.hands();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0].cards(), &[card(8), card(2)]);
    assert_eq!(hands[1].cards(), &[card(8), card(3)]);
    assert!(hands.iter().all(|hand| hand.bet() == 10));
    assert_eq!(game.active_hand_index(), Some(0));

    game.player_stand().unwrap();
    assert_eq!(game.active_hand_index(), Some(1));
    game.player_stand().unwrap();
    assert_eq!(game.state(), GameState::GameOver);

    let events = recorder.events();
    assert!(events.contains(&"split:0".to_string()));
    assert!(events.contains(&"active:1".to_string()));

    let results = game.results();
    assert_eq!(results.len(), 2);
    assert!(
        results
            .iter()
            .all(|result| result.outcome == HandOutcome::DealerBust && result.net == 10)
    );
}

#[test]
fn double_down_bust_skips_dealer_draw() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(10), // player
            card(6),  // dealer up
            card(2),  // player
            card(10), // dealer hole
            card(13), // double draw
            card(5),  // untouched
        ],
    );
    let recorder = Recorder::default();
    game.subscribe(recorder.clone());

    game.place_bets(&[10]).unwrap();
    assert_eq!(game.player_double_down().unwrap(), Some(card(13)));

    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.hands()[0].status(), HandStatus::Bust);
    assert_eq!(game.dealer_hand().len(), 2);
    assert_eq!(game.shoe().live_len(), 1);

    let events = recorder.events();
    let double = events.iter().position(|e| e == "double:0").unwrap();
    assert_eq!(
        &events[double..],
        &[
            "double:0",
            "bust:0",
            "state:DealerTurn",
            "dealer_done:16",
            "state:Settlement",
            "settlement:1",
            "state:GameOver",
        ]
    );

    let results = game.results();
    assert_eq!(results[0].outcome, HandOutcome::Lose);
    assert_eq!(results[0].net, -20);
}

#[test]
fn double_down_rejects_overflowing_bet() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[card(2), card(5), card(10), card(6), card(7)],
    );

    game.place_bets(&[usize::MAX]).unwrap();
    assert_eq!(
        game.player_double_down().unwrap_err(),
        ActionError::CannotDouble
    );
    assert_eq!(game.hands()[0].bet(), usize::MAX);
    assert_eq!(game.hands()[0].len(), 2);
    assert_eq!(game.state(), GameState::PlayerTurn);
}

#[test]
fn every_split_hand_busting_skips_dealer_draw() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(8),  // player
            card(6),  // dealer up
            card(8),  // player
            card(10), // dealer hole
            card(5),  // first split hand
            card(6),  // second split hand
            card(13), // first hand hit
            card(13), // second hand hit
            card(5),  // untouched
        ],
    );
    let recorder = Recorder::default();
    game.subscribe(recorder.clone());

    game.place_bets(&[10]).unwrap();
    game.player_split().unwrap();
    game.player_hit().unwrap();
    game.player_hit().unwrap();

    assert_eq!(game.state(), GameState::GameOver);
    assert!(game.hands().iter().all(|hand| hand.is_busted()));
    assert_eq!(game.dealer_hand().len(), 2);
    assert!(!game.dealer_hand().is_hole_revealed());
    assert_eq!(game.shoe().live_len(), 1);

    let events = recorder.events();
    let split = events.iter().position(|e| e == "split:0").unwrap();
    assert_eq!(
        &events[split..],
        &[
            "split:0",
            "hit:0",
            "bust:0",
            "active:1",
            "hit:1",
            "bust:1",
            "state:DealerTurn",
            "dealer_done:16",
            "state:Settlement",
            "settlement:2",
            "state:GameOver",
        ]
    );
    assert!(
        game.results()
            .iter()
            .all(|result| result.outcome == HandOutcome::Lose && result.net == -10)
    );
}

#[test]
fn split_requires_a_pair() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[card(2), card(8), card(5), card(9), card(9)],
    );

    game.place_bets(&[10]).unwrap();
    assert_eq!(game.player_split().unwrap_err(), ActionError::CannotSplit);
    assert_eq!(game.hands().len(), 1);
    assert_eq!(game.hands()[0].len(), 2);
    assert_eq!(game.state(), GameState::PlayerTurn);
}

#[test]
fn split_hand_reaching_21_is_skipped() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(2),  // burn
            card(1),  // player
            card(5),  // dealer up
            card(1),  // player
            card(9),  // dealer hole
            card(13), // first split hand
            card(3),  // second split hand
        ],
    );

    game.place_bets(&[10]).unwrap();
    game.player_split().unwrap();

    assert!(game.hands()[0].is_settled());
    assert_eq!(game.active_hand_index(), Some(1));
    assert_eq!(game.hands()[1].value(), 14);
}

#[test]
fn hit_degrades_when_shoe_is_empty() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[
            card(4),  // burn
            card(2),  // player
            card(9),  // dealer up
            card(3),  // player
            card(7),  // dealer hole
        ],
    );

    game.place_bets(&[10]).unwrap();

    // The burned card comes back once the live pile is empty.
    assert_eq!(game.player_hit().unwrap(), Some(card(4)));
    assert_eq!(game.player_hit().unwrap(), None);
    assert_eq!(game.hands()[0].len(), 3);
    assert_eq!(game.state(), GameState::PlayerTurn);

    game.player_stand().unwrap();
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.dealer_hand().value(), 16);
    assert_eq!(game.results()[0].outcome, HandOutcome::Lose);
}

#[test]
fn new_round_reopens_betting() {
    let mut game = stacked_game(
        GameOptions::default(),
        &[card(2), card(10), card(6), card(9), card(10), card(5)],
    );

    game.place_bets(&[10]).unwrap();
    assert_eq!(game.new_round().unwrap_err(), RoundError::InvalidState);
    game.player_stand().unwrap();

    let recorder = Recorder::default();
    game.subscribe(recorder.clone());
    game.new_round().unwrap();

    assert_eq!(game.state(), GameState::Betting);
    assert!(game.hands().is_empty());
    assert!(game.dealer_hand().is_empty());
    assert!(game.results().is_empty());
    assert_eq!(game.active_hand_index(), None);
    assert_eq!(recorder.events(), vec!["state:Betting"]);
}

#[test]
fn cards_are_conserved_across_rounds() {
    let mut game = Game::new(GameOptions::default().with_decks(1), 7).unwrap();

    for _ in 0..30 {
        assert_eq!(conserved(&game), DECK_SIZE);
        game.place_bets(&[10, 10, 10]).unwrap();
        assert_eq!(conserved(&game), DECK_SIZE);

        while let Some(index) = game.active_hand_index() {
            let hand = &game.hands()[index];
            if hand.can_split() {
                game.player_split().unwrap();
            } else if hand.value() < 17 {
                if game.player_hit().unwrap().is_none() {
                    game.player_stand().unwrap();
                }
            } else {
                game.player_stand().unwrap();
            }
            assert_eq!(conserved(&game), DECK_SIZE);
        }

        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.results().len(), game.hands().len());
        assert_eq!(conserved(&game), DECK_SIZE);
        game.new_round().unwrap();
    }
}

#[test]
fn same_rng_seed_deals_same_round() {
    let options = GameOptions::default();
    let mut first = Game::with_rng(options.clone(), ChaCha8Rng::seed_from_u64(11)).unwrap();
    let mut second = Game::with_rng(options, ChaCha8Rng::seed_from_u64(11)).unwrap();

    first.place_bets(&[10, 20]).unwrap();
    second.place_bets(&[10, 20]).unwrap();

    assert_eq!(first.hands()[0].cards(), second.hands()[0].cards());
    assert_eq!(first.hands()[1].cards(), second.hands()[1].cards());
    assert_eq!(first.dealer_hand().cards(), second.dealer_hand().cards());
}

#[test]
fn unsubscribed_observer_stops_receiving() {
    let mut game = Game::new(GameOptions::default(), 5).unwrap();
    let recorder = Recorder::default();
    let id = game.subscribe(recorder.clone());

    assert!(game.unsubscribe(id));
    assert!(!game.unsubscribe(id));

    game.place_bets(&[10]).unwrap();
    assert!(recorder.events().is_empty());
}

#[test]
fn options_are_validated() {
    assert_eq!(
        Game::new(GameOptions::default().with_decks(0), 1).err(),
        Some(OptionsError::NoDecks)
    );
    for penetration in [1.0, -0.1, f64::NAN] {
        assert_eq!(
            Game::new(GameOptions::default().with_penetration(penetration), 1).err(),
            Some(OptionsError::InvalidPenetration)
        );
    }
    assert!(Game::new(GameOptions::default().with_penetration(0.0), 1).is_ok());
}
