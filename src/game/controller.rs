//! The match controller: turn/phase state machine, intents and pacing.
//!
//! The controller owns everything a match mutates. Intents from the UI or
//! AI collaborator are validated and either applied in full or rejected
//! with a surfaced warning and no mutation. Automatic transitions (enemy
//! turn, battle) are queued as `PhaseStep`s and driven with `step`, so a
//! test can run them back to back while a presentation layer waits
//! `next_delay` between them.
//!
//! ## Turn cycle
//!
//! ```text
//! StartMatch ─▶ [Intro, DealNotice, BeginPlayerTurn] ─▶ PlayerTurn
//! EndPlayerTurn ─▶ EnemyTurn ─▶ [EnemyPlace, BeginBattle, PlayerAttacks,
//!                                EnemyAttacks, FinishBattle] ─▶ PlayerTurn (turn + 1)
//! ```
//!
//! Every step checks for `GameOver` first; once the match is over the queue
//! is dropped and nothing else runs.

use std::collections::VecDeque;
use std::time::Duration;

use super::combat::{designated_target, AttackTarget, Combat, SubPhaseOutcome, TargetMap};
use super::pipeline::PhaseStep;
use super::view::{MatchSnapshot, SideView};
use crate::cards::{CardCatalog, CardInstance, CardPool};
use crate::core::{
    ConfigError, GameRng, InstanceId, Intent, IntentRecord, MatchConfig, MatchError, MatchPhase,
    MatchState, PlacementError, Side, SideMap, TargetError,
};
use crate::events::{MatchEvent, MatchListener, NullListener};
use crate::player::PlayerState;
use crate::rules::{EnemyAgent, MatchResult, PlaceholderEnemy};
use crate::zones::{SlotGrid, SlotRef};

/// Runs one match at a time; `StartMatch` recycles it for the next one.
///
/// ## Example
///
/// ```
/// use card_duel::cards::CardCatalog;
/// use card_duel::core::{MatchConfig, MatchState, Pacing};
/// use card_duel::game::MatchController;
///
/// let config = MatchConfig::new().with_pacing(Pacing::instant());
/// let mut game = MatchController::headless(CardCatalog::default_library(), config).unwrap();
///
/// game.start_match().unwrap();
/// game.run_pending();
/// assert_eq!(game.state(), MatchState::PlayerTurn);
///
/// game.end_player_turn().unwrap();
/// game.run_pending();
/// assert_eq!(game.turn(), 2);
/// ```
pub struct MatchController<L: MatchListener = NullListener> {
    config: MatchConfig,
    catalog: CardCatalog,
    pool: CardPool,
    grid: SlotGrid,
    players: SideMap<PlayerState>,
    phase: MatchPhase,
    pending: VecDeque<PhaseStep>,
    targets: TargetMap,
    agent: Box<dyn EnemyAgent>,
    listener: L,
    rng: GameRng,
    history: Vec<IntentRecord>,
    turn_clock: Duration,
    result: Option<MatchResult>,
}

impl MatchController<NullListener> {
    /// Controller with a fresh pool and no listener.
    pub fn headless(catalog: CardCatalog, config: MatchConfig) -> Result<Self, ConfigError> {
        Self::new(catalog, CardPool::new(), config, NullListener)
    }
}

impl<L: MatchListener> MatchController<L> {
    /// Build a controller around injected collaborators.
    ///
    /// Fails on an empty catalog or an invalid config; the pool is
    /// pre-warmed here, before any match starts.
    pub fn new(
        catalog: CardCatalog,
        mut pool: CardPool,
        config: MatchConfig,
        listener: L,
    ) -> Result<Self, ConfigError> {
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        config.validate()?;
        pool.prewarm(config.pool_prewarm);

        let players = SideMap::new(|side| {
            PlayerState::new(config.names[side].clone(), side, config.starting_health)
        });
        Ok(Self {
            grid: SlotGrid::new(config.slots_per_side),
            rng: GameRng::new(config.seed),
            config,
            catalog,
            pool,
            players,
            phase: MatchPhase::new(),
            pending: VecDeque::new(),
            targets: TargetMap::default(),
            agent: Box::new(PlaceholderEnemy),
            listener,
            history: Vec::new(),
            turn_clock: Duration::ZERO,
            result: None,
        })
    }

    /// Replace the enemy agent.
    #[must_use]
    pub fn with_agent(mut self, agent: impl EnemyAgent + 'static) -> Self {
        self.agent = Box::new(agent);
        self
    }

    // === Intents ===

    /// Apply and record an intent.
    ///
    /// Rejections are logged, published as a warning message and returned;
    /// they never change match state.
    pub fn apply_intent(&mut self, intent: Intent) -> Result<(), MatchError> {
        let outcome = match &intent {
            Intent::StartMatch(config) => self.handle_start(config.as_deref().cloned()),
            Intent::EndPlayerTurn => self.handle_end_turn(),
            Intent::RequestPlace {
                side,
                slot_index,
                card,
            } => self.handle_place(SlotRef::new(*side, *slot_index), *card),
            Intent::RequestAutoPlace { side, card } => self.handle_auto_place(*side, *card),
            Intent::AssignTarget {
                side,
                attacker_slot,
                target_slot,
            } => self.handle_assign_target(*side, *attacker_slot, *target_slot),
            Intent::ForceEndGame { player_won } => self.handle_force_end(*player_won),
        };

        if let Err(err) = &outcome {
            log::warn!("rejected {:?}: {}", intent, err);
            self.emit(MatchEvent::warning(err.to_string()));
        }
        let sequence = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        let record = IntentRecord::new(intent, self.phase.turn_number, sequence, outcome.is_ok());
        self.history.push(record);
        outcome
    }

    /// Start a match with the current configuration.
    pub fn start_match(&mut self) -> Result<(), MatchError> {
        self.apply_intent(Intent::StartMatch(None))
    }

    /// Start a match with a new configuration.
    pub fn start_match_with(&mut self, config: MatchConfig) -> Result<(), MatchError> {
        self.apply_intent(Intent::StartMatch(Some(Box::new(config))))
    }

    /// The player is done placing cards.
    pub fn end_player_turn(&mut self) -> Result<(), MatchError> {
        self.apply_intent(Intent::EndPlayerTurn)
    }

    /// Place a hand card into a specific slot.
    pub fn request_place(
        &mut self,
        side: Side,
        slot_index: usize,
        card: InstanceId,
    ) -> Result<(), MatchError> {
        self.apply_intent(Intent::RequestPlace {
            side,
            slot_index,
            card,
        })
    }

    /// Place a hand card into the lowest empty slot of its side.
    pub fn request_auto_place(&mut self, side: Side, card: InstanceId) -> Result<(), MatchError> {
        self.apply_intent(Intent::RequestAutoPlace { side, card })
    }

    /// Point the card in `attacker_slot` at an opposing slot.
    pub fn assign_target(
        &mut self,
        side: Side,
        attacker_slot: usize,
        target_slot: usize,
    ) -> Result<(), MatchError> {
        self.apply_intent(Intent::AssignTarget {
            side,
            attacker_slot,
            target_slot,
        })
    }

    /// End the match administratively.
    pub fn force_end_game(&mut self, player_won: bool) -> Result<(), MatchError> {
        self.apply_intent(Intent::ForceEndGame { player_won })
    }

    fn ensure_live(&self) -> Result<(), MatchError> {
        match self.phase.state {
            MatchState::None => Err(MatchError::NotStarted),
            MatchState::GameOver => Err(MatchError::GameOver),
            _ => Ok(()),
        }
    }

    fn handle_start(&mut self, config: Option<MatchConfig>) -> Result<(), MatchError> {
        if let Some(config) = config {
            config.validate()?;
            self.pool.prewarm(config.pool_prewarm);
            self.config = config;
        }
        self.recycle();

        self.grid = SlotGrid::new(self.config.slots_per_side);
        self.rng = GameRng::new(self.config.seed);
        self.phase = MatchPhase::new();
        self.pending.clear();
        self.targets.clear();
        self.history.clear();
        self.turn_clock = Duration::ZERO;
        self.result = None;

        for side in Side::all() {
            let deck = match &self.config.decks[side] {
                Some(deck) => deck.clone(),
                None => self
                    .catalog
                    .random_deck(self.config.deck_size, &mut self.rng)?,
            };
            let name = self.config.names[side].clone();
            self.players[side].reset(name, self.config.starting_health, deck);
            self.publish_health(side);
        }
        log::info!(
            "match started: {} vs {} (seed {})",
            self.players[Side::Player].name(),
            self.players[Side::Enemy].name(),
            self.config.seed
        );

        for side in Side::all() {
            for _ in 0..self.config.starting_hand_size {
                if !self.draw_for(side) {
                    break;
                }
            }
        }

        self.pending.extend(PhaseStep::OPENING);
        Ok(())
    }

    /// Detach every live instance from rosters and slots, then release it.
    fn recycle(&mut self) {
        self.grid.clear();
        for side in Side::all() {
            self.players[side].take_all_cards();
        }
        let live: Vec<InstanceId> = self.pool.in_use().map(CardInstance::id).collect();
        debug_assert!(
            live.iter().all(|id| self.grid.find_card(*id).is_none()
                && self.players.iter().all(|(_, p)| !p.holds(*id) && !p.graveyard().contains(id))),
            "recycling an instance still referenced by a slot or roster"
        );
        for id in live {
            if let Err(err) = self.pool.release(id) {
                log::error!("recycling {}: {}", id, err);
            }
        }
        log::debug!("recycled previous match: {}", self.pool);
    }

    fn handle_end_turn(&mut self) -> Result<(), MatchError> {
        self.ensure_live()?;
        if self.phase.state != MatchState::PlayerTurn || !self.pending.is_empty() {
            return Err(MatchError::NotPlayerTurn(self.phase.state));
        }
        self.begin_enemy_turn();
        self.pending.extend(PhaseStep::ENEMY_AND_BATTLE);
        Ok(())
    }

    fn handle_place(&mut self, slot: SlotRef, card: InstanceId) -> Result<(), MatchError> {
        self.ensure_live()?;
        let instance = self
            .pool
            .get_mut(card)
            .ok_or(PlacementError::UnknownCard(card))?;
        self.grid.place(slot, instance, self.phase.state)?;
        self.players[slot.side].remove_from_hand(card);
        Ok(())
    }

    fn handle_auto_place(&mut self, side: Side, card: InstanceId) -> Result<(), MatchError> {
        self.ensure_live()?;
        let slot = self
            .grid
            .find_empty(side)
            .ok_or(PlacementError::NoEmptySlot(side))?;
        self.handle_place(slot, card)
    }

    fn handle_assign_target(
        &mut self,
        side: Side,
        attacker_slot: usize,
        target_slot: usize,
    ) -> Result<(), MatchError> {
        self.ensure_live()?;
        let state = self.phase.state;
        if state.acting_side() != Some(side) {
            return Err(TargetError::WrongPhase { side, state }.into());
        }
        let attacker = SlotRef::new(side, attacker_slot);
        let target = SlotRef::new(side.opponent(), target_slot);
        self.grid
            .require_occupant(attacker)
            .map_err(TargetError::from)?;
        self.grid
            .require_occupant(target)
            .map_err(TargetError::from)?;

        log::debug!("{} now targets {}", attacker, target);
        self.targets.insert(attacker, target_slot);
        Ok(())
    }

    fn handle_force_end(&mut self, player_won: bool) -> Result<(), MatchError> {
        if self.phase.state.is_terminal() {
            return Err(MatchError::GameOver);
        }
        self.end_game(MatchResult::from_player_won(player_won));
        Ok(())
    }

    // === Pipeline ===

    /// Run the next queued step.
    ///
    /// Returns `None` when nothing is queued or the match is over; in the
    /// latter case any leftover steps are dropped.
    pub fn step(&mut self) -> Option<PhaseStep> {
        if self.phase.state.is_terminal() {
            if !self.pending.is_empty() {
                log::debug!("match over, dropping {} queued steps", self.pending.len());
                self.pending.clear();
            }
            return None;
        }
        let step = self.pending.pop_front()?;
        log::debug!("step {:?}", step);
        self.run_step(step);
        Some(step)
    }

    /// Run queued steps until the queue is empty. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while self.step().is_some() {
            count += 1;
        }
        count
    }

    /// Presentation delay before the next step, if one is queued.
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        if self.phase.state.is_terminal() {
            return None;
        }
        self.pending
            .front()
            .map(|step| step.delay(&self.config.pacing))
    }

    /// Is the queue empty?
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queued steps in run order.
    pub fn pending_steps(&self) -> impl Iterator<Item = PhaseStep> + '_ {
        self.pending.iter().copied()
    }

    /// Advance the turn timer.
    ///
    /// When a limit is configured and the player sits idle in their turn
    /// past it, the turn is ended for them. Returns true if that happened.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let Some(limit) = self.config.turn_time_limit else {
            return false;
        };
        if self.phase.state != MatchState::PlayerTurn || !self.pending.is_empty() {
            return false;
        }
        self.turn_clock = self.turn_clock.saturating_add(elapsed);
        if self.turn_clock < limit {
            return false;
        }
        self.emit(MatchEvent::warning("Time's up!"));
        self.end_player_turn().is_ok()
    }

    /// Time left on the turn timer.
    #[must_use]
    pub fn remaining_turn_time(&self) -> Option<Duration> {
        self.config
            .turn_time_limit
            .map(|limit| limit.saturating_sub(self.turn_clock))
    }

    fn run_step(&mut self, step: PhaseStep) {
        match step {
            PhaseStep::Intro => {
                let text = format!(
                    "{} vs {}: the match begins!",
                    self.players[Side::Player].name(),
                    self.players[Side::Enemy].name()
                );
                self.emit(MatchEvent::info(text));
            }
            PhaseStep::DealNotice => {
                let text = format!("Each side draws {} cards", self.config.starting_hand_size);
                self.emit(MatchEvent::info(text));
            }
            PhaseStep::BeginPlayerTurn => self.begin_player_turn(),
            PhaseStep::EnemyPlace => self.enemy_place(),
            PhaseStep::BeginBattle => {
                self.set_state(MatchState::BattlePhase);
                self.emit(MatchEvent::info("Battle!"));
            }
            PhaseStep::PlayerAttacks | PhaseStep::EnemyAttacks => {
                if let Some(side) = step.attacking_side() {
                    self.resolve_attacks(side);
                }
            }
            PhaseStep::FinishBattle => self.finish_battle(),
        }
    }

    fn begin_player_turn(&mut self) {
        self.turn_clock = Duration::ZERO;
        self.set_state(MatchState::PlayerTurn);
        if self.phase.turn_number > 1 {
            self.draw_for(Side::Player);
        }
        let text = format!("Turn {}: your move", self.phase.turn_number);
        self.emit(MatchEvent::info(text));
    }

    fn begin_enemy_turn(&mut self) {
        self.set_state(MatchState::EnemyTurn);
        self.refresh_attackers(Side::Enemy);
        if self.phase.turn_number > 1 {
            self.draw_for(Side::Enemy);
        }
        self.emit(MatchEvent::info("Enemy turn"));
    }

    fn enemy_place(&mut self) {
        let me = &self.players[Side::Enemy];
        let Some(play) = self.agent.choose_play(me, &self.pool, &self.grid) else {
            log::debug!("enemy passes");
            return;
        };
        match self.handle_place(play.slot, play.card) {
            Ok(()) => {
                let name = self
                    .pool
                    .get(play.card)
                    .map_or_else(String::new, |card| card.name().to_string());
                self.emit(MatchEvent::info(format!("Enemy played {}", name)));
            }
            Err(err) => log::warn!("enemy agent chose an illegal play: {}", err),
        }
    }

    fn resolve_attacks(&mut self, side: Side) {
        if let SubPhaseOutcome::Decisive { loser } = self.combat().resolve_sub_phase(side) {
            self.end_game(MatchResult::lost_by(loser));
        }
    }

    fn finish_battle(&mut self) {
        let stale = self.combat().evacuate_dead();
        debug_assert_eq!(stale, 0, "dead cards left on the battlefield after combat");
        if stale > 0 {
            log::error!("{} dead cards were still on the battlefield after combat", stale);
        }

        self.refresh_attackers(Side::Player);
        self.targets.clear();
        self.phase.advance_turn();
        log::info!("battle finished, starting turn {}", self.phase.turn_number);
        self.begin_player_turn();
    }

    fn refresh_attackers(&mut self, side: Side) {
        let occupants: Vec<InstanceId> = self.grid.occupied(side).map(|(_, id)| id).collect();
        for id in occupants {
            if let Some(card) = self.pool.get_mut(id) {
                card.set_can_attack(true);
            }
        }
    }

    fn combat(&mut self) -> Combat<'_> {
        Combat {
            pool: &mut self.pool,
            grid: &mut self.grid,
            players: &mut self.players,
            targets: &mut self.targets,
            listener: &mut self.listener,
        }
    }

    /// Turn-start or opening draw. Returns false when the side could not draw.
    fn draw_for(&mut self, side: Side) -> bool {
        let player = &mut self.players[side];
        match player.draw(
            &self.catalog,
            &mut self.pool,
            &mut self.rng,
            self.config.max_hand_size,
        ) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("{}", err);
                self.emit(MatchEvent::warning(err.to_string()));
                false
            }
        }
    }

    fn end_game(&mut self, result: MatchResult) {
        if self.phase.state.is_terminal() {
            return;
        }
        self.pending.clear();
        self.result = Some(result);
        self.set_state(MatchState::GameOver);
        log::info!("game over on turn {}: {}", self.phase.turn_number, result);
        self.emit(MatchEvent::GameOver {
            player_won: result.player_won(),
        });
    }

    fn set_state(&mut self, state: MatchState) {
        self.phase.state = state;
        log::info!("turn {}: {}", self.phase.turn_number, state);
        self.emit(MatchEvent::StateChanged {
            state,
            turn: self.phase.turn_number,
        });
    }

    fn publish_health(&mut self, side: Side) {
        let player = &self.players[side];
        let event = MatchEvent::HealthChanged {
            side,
            health: player.health(),
            max_health: player.max_health(),
        };
        self.emit(event);
    }

    fn emit(&mut self, event: MatchEvent) {
        self.listener.on_event(&event);
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> MatchState {
        self.phase.state
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.phase.turn_number
    }

    #[must_use]
    pub fn is_battle_phase(&self) -> bool {
        self.phase.is_battle_phase()
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn pool(&self) -> &CardPool {
        &self.pool
    }

    #[must_use]
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    #[must_use]
    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side]
    }

    /// Live card by handle.
    #[must_use]
    pub fn card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.pool.get(id)
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Outcome, once the match is over.
    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    /// Intents received since the current match started.
    #[must_use]
    pub fn history(&self) -> &[IntentRecord] {
        &self.history
    }

    /// What the card in `attacker` would hit if combat ran now.
    #[must_use]
    pub fn target_of(&self, attacker: SlotRef) -> AttackTarget {
        designated_target(&self.grid, &self.targets, attacker)
    }

    /// "Turn n - State" for display.
    #[must_use]
    pub fn state_info(&self) -> String {
        format!("Turn {} - {}", self.phase.turn_number, self.phase.state)
    }

    /// Serializable copy of everything on screen.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            state: self.phase.state,
            turn: self.phase.turn_number,
            sides: SideMap::new(|side| SideView::of(&self.players[side], &self.grid, &self.pool)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardLocation};
    use crate::core::Pacing;
    use crate::events::EventLog;
    use crate::rules::PassiveEnemy;

    fn config() -> MatchConfig {
        MatchConfig::new()
            .with_pacing(Pacing::instant())
            .with_slots_per_side(3)
            .with_deck(Side::Player, vec![CardId::new(1); 10])
            .with_deck(Side::Enemy, vec![CardId::new(6); 10])
    }

    fn started(config: MatchConfig) -> MatchController<EventLog> {
        let mut game = MatchController::new(
            CardCatalog::default_library(),
            CardPool::new(),
            config,
            EventLog::new(),
        )
        .unwrap();
        game.start_match().unwrap();
        game.run_pending();
        game
    }

    #[test]
    fn test_new_rejects_empty_catalog_and_bad_config() {
        assert!(matches!(
            MatchController::headless(CardCatalog::new(), MatchConfig::new()),
            Err(ConfigError::EmptyCatalog)
        ));
        assert!(matches!(
            MatchController::headless(
                CardCatalog::default_library(),
                MatchConfig::new().with_slots_per_side(0)
            ),
            Err(ConfigError::NoSlots)
        ));
    }

    #[test]
    fn test_new_prewarms_pool() {
        let game = MatchController::headless(
            CardCatalog::default_library(),
            MatchConfig::new().with_pool_prewarm(12),
        )
        .unwrap();
        assert_eq!(game.pool().available(), 12);
        assert_eq!(game.state(), MatchState::None);
    }

    #[test]
    fn test_start_deals_hands_and_enters_player_turn() {
        let game = started(config());

        assert_eq!(game.state(), MatchState::PlayerTurn);
        assert_eq!(game.turn(), 1);
        for side in Side::all() {
            assert_eq!(game.player(side).hand().len(), 3);
            assert_eq!(game.player(side).health(), 30);
        }
        assert_eq!(game.listener().last_state(), Some(MatchState::PlayerTurn));
        assert_eq!(game.state_info(), "Turn 1 - PlayerTurn");
    }

    #[test]
    fn test_opening_steps_are_paced() {
        let mut game = MatchController::headless(
            CardCatalog::default_library(),
            MatchConfig::new(),
        )
        .unwrap();
        game.start_match().unwrap();

        assert_eq!(game.state(), MatchState::None);
        assert_eq!(game.next_delay(), Some(Duration::from_secs(1)));
        assert_eq!(game.step(), Some(PhaseStep::Intro));
        assert_eq!(game.step(), Some(PhaseStep::DealNotice));
        assert_eq!(game.step(), Some(PhaseStep::BeginPlayerTurn));
        assert_eq!(game.step(), None);
        assert!(game.is_idle());
        assert_eq!(game.state(), MatchState::PlayerTurn);
    }

    #[test]
    fn test_end_turn_rejected_outside_player_turn() {
        let mut game = MatchController::headless(CardCatalog::default_library(), config()).unwrap();
        assert_eq!(game.end_player_turn(), Err(MatchError::NotStarted));

        game.start_match().unwrap();
        game.run_pending();
        game.end_player_turn().unwrap();
        assert_eq!(game.state(), MatchState::EnemyTurn);
        assert_eq!(
            game.end_player_turn(),
            Err(MatchError::NotPlayerTurn(MatchState::EnemyTurn))
        );

        let accepted: Vec<bool> = game.history().iter().map(|r| r.accepted).collect();
        assert_eq!(accepted, vec![true, true, false]);
    }

    #[test]
    fn test_rejected_intent_surfaces_warning_without_mutation() {
        let mut game = started(config());
        let card = game.player(Side::Player).hand()[0];

        let result = game.request_place(Side::Player, 7, card);
        assert!(matches!(result, Err(MatchError::Placement(_))));
        assert!(game.player(Side::Player).holds(card));
        assert_eq!(game.card(card).unwrap().location(), Some(CardLocation::Hand));
        assert!(game.listener().warnings().count() >= 1);
    }

    #[test]
    fn test_place_moves_card_out_of_hand() {
        let mut game = started(config());
        let card = game.player(Side::Player).hand()[1];

        game.request_place(Side::Player, 2, card).unwrap();

        assert!(!game.player(Side::Player).holds(card));
        assert_eq!(game.grid().occupant(SlotRef::new(Side::Player, 2)), Some(card));
        assert_eq!(game.player(Side::Player).hand().len(), 2);
    }

    #[test]
    fn test_auto_place_uses_lowest_slot_until_full() {
        let mut game = started(config());
        let hand: Vec<_> = game.player(Side::Player).hand().iter().copied().collect();

        game.request_place(Side::Player, 0, hand[0]).unwrap();
        game.request_auto_place(Side::Player, hand[1]).unwrap();
        assert_eq!(game.grid().occupant(SlotRef::new(Side::Player, 1)), Some(hand[1]));

        game.request_auto_place(Side::Player, hand[2]).unwrap();
        assert_eq!(game.grid().find_empty(Side::Player), None);
    }

    #[test]
    fn test_auto_place_with_full_row() {
        let mut game = started(config().with_slots_per_side(1));
        let hand: Vec<_> = game.player(Side::Player).hand().iter().copied().collect();
        game.request_auto_place(Side::Player, hand[0]).unwrap();

        assert_eq!(
            game.request_auto_place(Side::Player, hand[1]),
            Err(MatchError::Placement(PlacementError::NoEmptySlot(Side::Player)))
        );
    }

    #[test]
    fn test_enemy_cannot_place_during_player_turn() {
        let mut game = started(config());
        let card = game.player(Side::Enemy).hand()[0];

        assert!(matches!(
            game.request_place(Side::Enemy, 0, card),
            Err(MatchError::Placement(PlacementError::WrongPhase { .. }))
        ));
    }

    #[test]
    fn test_full_cycle_increments_turn_once() {
        let mut game = started(config());
        game.end_player_turn().unwrap();
        let steps = game.run_pending();

        assert_eq!(steps, PhaseStep::ENEMY_AND_BATTLE.len());
        assert_eq!(game.turn(), 2);
        assert_eq!(game.state(), MatchState::PlayerTurn);

        let states: Vec<_> = game.listener().states().collect();
        assert_eq!(
            states[states.len() - 3..],
            [
                (MatchState::EnemyTurn, 1),
                (MatchState::BattlePhase, 1),
                (MatchState::PlayerTurn, 2),
            ]
        );
    }

    #[test]
    fn test_turn_start_draws() {
        let mut game = started(config());
        game.end_player_turn().unwrap();
        game.run_pending();

        // Enemy drew nothing on turn 1 and played one card.
        assert_eq!(game.player(Side::Enemy).hand().len(), 2);
        // Player drew at the start of turn 2.
        assert_eq!(game.player(Side::Player).hand().len(), 4);
    }

    #[test]
    fn test_hand_full_is_surfaced() {
        let mut game = started(
            config()
                .with_starting_hand_size(2)
                .with_max_hand_size(2),
        )
        .with_agent(PassiveEnemy);
        game.end_player_turn().unwrap();
        game.run_pending();

        assert_eq!(game.player(Side::Player).hand().len(), 2);
        assert!(game
            .listener()
            .warnings()
            .any(|text| text == "Player hand is full (2 cards)"));
    }

    #[test]
    fn test_assign_target() {
        let mut game = started(config()).with_agent(PassiveEnemy);
        let mine = game.player(Side::Player).hand()[0];
        game.request_place(Side::Player, 0, mine).unwrap();

        assert!(matches!(
            game.assign_target(Side::Player, 0, 2),
            Err(MatchError::Target(TargetError::Slot(_)))
        ));
        assert!(matches!(
            game.assign_target(Side::Enemy, 0, 0),
            Err(MatchError::Target(TargetError::WrongPhase { .. }))
        ));
        assert_eq!(
            game.target_of(SlotRef::new(Side::Player, 0)),
            AttackTarget::Player(Side::Enemy)
        );
    }

    #[test]
    fn test_force_end_game_is_terminal() {
        let mut game = started(config());
        game.end_player_turn().unwrap();
        game.force_end_game(true).unwrap();

        assert_eq!(game.state(), MatchState::GameOver);
        assert_eq!(game.result(), Some(MatchResult::PlayerWon));
        assert_eq!(game.listener().game_over(), Some(true));

        let events_before = game.listener().len();
        assert_eq!(game.step(), None);
        assert!(game.is_idle());
        assert_eq!(game.force_end_game(false), Err(MatchError::GameOver));
        assert_eq!(game.end_player_turn(), Err(MatchError::GameOver));

        let late_states = game.listener().events()[events_before..]
            .iter()
            .filter(|e| matches!(e, MatchEvent::StateChanged { .. }))
            .count();
        assert_eq!(late_states, 0);
    }

    #[test]
    fn test_restart_recycles_instances() {
        let mut game = started(config());
        let card = game.player(Side::Player).hand()[0];
        game.request_place(Side::Player, 0, card).unwrap();
        let in_use = game.pool().in_use_count();
        assert_eq!(in_use, 6);

        game.start_match().unwrap();
        game.run_pending();

        assert_eq!(game.pool().in_use_count(), 6);
        assert_eq!(game.grid().occupied(Side::Player).count(), 0);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_turn_timer_ends_idle_turn() {
        let mut game = started(config().with_turn_time_limit(Duration::from_secs(30)));

        assert!(!game.tick(Duration::from_secs(20)));
        assert_eq!(game.remaining_turn_time(), Some(Duration::from_secs(10)));
        assert!(game.tick(Duration::from_secs(10)));
        assert_eq!(game.state(), MatchState::EnemyTurn);

        // Timer is inert outside the player's turn.
        assert!(!game.tick(Duration::from_secs(60)));
    }

    #[test]
    fn test_turn_timer_saturates_on_huge_elapsed() {
        let mut game = started(config().with_turn_time_limit(Duration::from_secs(30)));

        assert!(!game.tick(Duration::from_secs(1)));
        assert!(game.tick(Duration::MAX));
        assert_eq!(game.state(), MatchState::EnemyTurn);
    }

    #[test]
    fn test_recycle_after_deaths_releases_everything() {
        let mut game = started(config().with_starting_health(100));
        for _ in 0..3 {
            let hand: Vec<_> = game.player(Side::Player).hand().iter().copied().collect();
            for card in hand {
                let _ = game.request_auto_place(Side::Player, card);
            }
            game.end_player_turn().unwrap();
            game.run_pending();
        }

        game.start_match().unwrap();
        assert_eq!(game.pool().in_use_count(), 6);
        for side in Side::all() {
            assert!(game.player(side).graveyard().is_empty());
            assert_eq!(game.grid().occupied(side).count(), 0);
        }
    }

    #[test]
    fn test_snapshot() {
        let game = started(config());
        let snapshot = game.snapshot();

        assert_eq!(snapshot.state, MatchState::PlayerTurn);
        assert_eq!(snapshot.side(Side::Enemy).hand.len(), 3);
        assert_eq!(snapshot.side(Side::Player).slots.len(), 3);
        assert_eq!(snapshot.side(Side::Player).deck_size, 7);
    }
}
