//! Match flow integration tests.
//!
//! These drive a `MatchController` through whole turns with instant pacing
//! and check the state machine, turn counter and win/loss handling.

use card_duel::cards::{CardCatalog, CardDefinition, CardId, CardLocation, CardPool};
use card_duel::core::{ConfigError, MatchConfig, MatchError, MatchState, Pacing, Side};
use card_duel::events::{EventLog, MatchEvent};
use card_duel::game::MatchController;
use card_duel::rules::{MatchResult, PassiveEnemy};
use card_duel::zones::SlotRef;

const SQUIRE: CardId = CardId::new(1); // 3 attack / 5 health
const BRUTE: CardId = CardId::new(2); // 4 attack / 7 health

fn duel_catalog() -> CardCatalog {
    CardCatalog::from_definitions(vec![
        CardDefinition::new(SQUIRE, "Squire", 5, 3),
        CardDefinition::new(BRUTE, "Brute", 7, 4),
    ])
    .unwrap()
}

fn duel_config() -> MatchConfig {
    MatchConfig::new()
        .with_pacing(Pacing::instant())
        .with_deck(Side::Player, vec![SQUIRE; 10])
        .with_deck(Side::Enemy, vec![BRUTE; 10])
}

fn start(config: MatchConfig) -> MatchController<EventLog> {
    let mut game =
        MatchController::new(duel_catalog(), CardPool::new(), config, EventLog::new()).unwrap();
    game.start_match().unwrap();
    game.run_pending();
    game
}

/// Player 3/5 versus enemy 4/7 in the same lane: both survive the trade.
#[test]
fn test_first_turn_trade_scenario() {
    let mut game = start(duel_config());
    let squire = game.player(Side::Player).hand()[0];

    game.request_place(Side::Player, 0, squire).unwrap();
    game.end_player_turn().unwrap();
    game.run_pending();

    let brute = game
        .grid()
        .occupant(SlotRef::new(Side::Enemy, 0))
        .expect("enemy should have placed into slot 0");

    assert_eq!(game.card(squire).unwrap().health(), 1);
    assert_eq!(game.card(brute).unwrap().health(), 4);
    assert_eq!(game.turn(), 2);
    assert_eq!(game.state(), MatchState::PlayerTurn);
    assert_eq!(game.player(Side::Player).health(), 30);
    assert_eq!(game.player(Side::Enemy).health(), 30);
    assert_eq!(game.listener().deaths().count(), 0);
}

/// Second turn: the wounded squire dies, a fresh brute hits face.
#[test]
fn test_second_turn_follow_up() {
    let mut game = start(duel_config());
    let squire = game.player(Side::Player).hand()[0];
    game.request_place(Side::Player, 0, squire).unwrap();
    game.end_player_turn().unwrap();
    game.run_pending();
    let first_brute = game.grid().occupant(SlotRef::new(Side::Enemy, 0)).unwrap();

    game.end_player_turn().unwrap();
    game.run_pending();

    assert!(game.grid().is_empty(SlotRef::new(Side::Player, 0)));
    assert_eq!(game.card(squire).unwrap().location(), Some(CardLocation::Graveyard));
    assert!(game.player(Side::Player).graveyard().contains(&squire));
    assert_eq!(game.listener().deaths_of(squire), 1);

    assert_eq!(game.card(first_brute).unwrap().health(), 1);
    assert!(game.grid().occupant(SlotRef::new(Side::Enemy, 1)).is_some());
    assert_eq!(game.player(Side::Player).health(), 26);
    assert_eq!(game.turn(), 3);
}

#[test]
fn test_turn_counter_increments_once_per_cycle() {
    let mut game = start(duel_config().with_starting_health(100));

    for expected in 2..=5 {
        game.end_player_turn().unwrap();
        game.run_pending();
        assert_eq!(game.turn(), expected);
        assert_eq!(game.state(), MatchState::PlayerTurn);
    }

    let turns: Vec<u32> = game
        .listener()
        .states()
        .filter(|(state, _)| *state == MatchState::PlayerTurn)
        .map(|(_, turn)| turn)
        .collect();
    assert_eq!(turns, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_lethal_player_attack_ends_match_mid_battle() {
    let mut game = start(duel_config().with_starting_health(3)).with_agent(PassiveEnemy);
    let squire = game.player(Side::Player).hand()[0];
    game.request_place(Side::Player, 4, squire).unwrap();

    game.end_player_turn().unwrap();
    game.run_pending();

    assert_eq!(game.state(), MatchState::GameOver);
    assert_eq!(game.result(), Some(MatchResult::PlayerWon));
    assert_eq!(game.player(Side::Enemy).health(), 0);
    assert_eq!(game.listener().game_over(), Some(true));
    // Battle never finished, so the turn never advanced.
    assert_eq!(game.turn(), 1);
    assert!(game.is_idle());
}

#[test]
fn test_enemy_can_win() {
    let mut game = start(duel_config().with_starting_health(4));

    game.end_player_turn().unwrap();
    game.run_pending();

    assert_eq!(game.result(), Some(MatchResult::EnemyWon));
    assert_eq!(game.listener().game_over(), Some(false));
    assert_eq!(game.listener().health_of(Side::Player).last(), Some(0));
}

#[test]
fn test_game_over_is_terminal() {
    let mut game = start(duel_config());
    game.force_end_game(false).unwrap();
    let seen = game.listener().len();

    assert_eq!(game.end_player_turn(), Err(MatchError::GameOver));
    let card = game.player(Side::Player).hand()[0];
    assert_eq!(
        game.request_place(Side::Player, 0, card),
        Err(MatchError::GameOver)
    );
    assert_eq!(game.run_pending(), 0);

    let late_state_changes = game.listener().events()[seen..]
        .iter()
        .filter(|event| matches!(event, MatchEvent::StateChanged { .. }))
        .count();
    assert_eq!(late_state_changes, 0);

    // Only a new match leaves GameOver.
    game.start_match().unwrap();
    game.run_pending();
    assert_eq!(game.state(), MatchState::PlayerTurn);
    assert_eq!(game.result(), None);
}

#[test]
fn test_placement_rejected_during_battle_and_enemy_turn() {
    let mut game = start(duel_config());
    let hand: Vec<_> = game.player(Side::Player).hand().iter().copied().collect();

    game.end_player_turn().unwrap();
    assert!(game.request_place(Side::Player, 0, hand[0]).is_err());

    // Step to the battle phase.
    while game.state() != MatchState::BattlePhase {
        game.step().unwrap();
    }
    assert!(game.is_battle_phase());
    assert!(game.request_place(Side::Player, 1, hand[1]).is_err());
    assert!(game.player(Side::Player).holds(hand[1]));
    assert_eq!(game.card(hand[1]).unwrap().location(), Some(CardLocation::Hand));
}

#[test]
fn test_short_deck_deals_what_it_can() {
    let config = duel_config().with_deck(Side::Player, vec![SQUIRE, SQUIRE]);
    let mut game = start(config);

    assert_eq!(game.state(), MatchState::PlayerTurn);
    assert_eq!(game.player(Side::Player).hand().len(), 2);
    assert!(game
        .listener()
        .warnings()
        .any(|text| text == "Player deck is empty"));

    game.end_player_turn().unwrap();
    game.run_pending();
    assert_eq!(game.player(Side::Player).hand().len(), 2);
}

#[test]
fn test_start_with_new_config() {
    let mut game = start(duel_config());

    let bigger = duel_config()
        .with_slots_per_side(4)
        .with_starting_health(12)
        .with_name(Side::Enemy, "Goblin King");
    game.start_match_with(bigger).unwrap();
    game.run_pending();

    assert_eq!(game.grid().slot_count(), 4);
    assert_eq!(game.player(Side::Enemy).health_info(), "12/12");
    assert_eq!(game.player(Side::Enemy).name(), "Goblin King");

    let invalid = duel_config().with_max_hand_size(0);
    assert!(matches!(
        game.start_match_with(invalid),
        Err(MatchError::Config(_))
    ));
    assert_eq!(game.grid().slot_count(), 4);
}

#[test]
fn test_same_seed_same_match() {
    let config = MatchConfig::new().with_pacing(Pacing::instant()).with_seed(11);
    let play = |config: MatchConfig| {
        let mut game = MatchController::headless(CardCatalog::default_library(), config).unwrap();
        game.start_match().unwrap();
        game.run_pending();
        for _ in 0..3 {
            let hand: Vec<_> = game.player(Side::Player).hand().iter().copied().collect();
            if let Some(card) = hand.first() {
                let _ = game.request_auto_place(Side::Player, *card);
            }
            let _ = game.end_player_turn();
            game.run_pending();
        }
        game.snapshot()
    };

    assert_eq!(play(config.clone()), play(config));
}

#[test]
fn test_history_records_intents() {
    let mut game = start(duel_config());
    let card = game.player(Side::Player).hand()[0];
    let _ = game.request_place(Side::Player, 99, card);
    game.request_place(Side::Player, 0, card).unwrap();
    game.end_player_turn().unwrap();

    let history = game.history();
    assert_eq!(history.len(), 4);
    assert_eq!(
        history.iter().map(|r| r.accepted).collect::<Vec<_>>(),
        vec![true, false, true, true]
    );
    assert!(history.iter().enumerate().all(|(i, r)| r.sequence == i as u32));
}

#[test]
fn test_non_positive_starting_health_is_fatal() {
    let dead_on_arrival = duel_config().with_starting_health(0);
    assert!(matches!(
        MatchController::new(duel_catalog(), CardPool::new(), dead_on_arrival, EventLog::new()),
        Err(ConfigError::NonPositiveHealth(0))
    ));

    let mut game = start(duel_config());
    assert_eq!(
        game.start_match_with(duel_config().with_starting_health(-1)),
        Err(MatchError::Config(ConfigError::NonPositiveHealth(-1)))
    );
    // The running match is untouched.
    assert_eq!(game.state(), MatchState::PlayerTurn);
    assert_eq!(game.player(Side::Player).health(), 30);
}
