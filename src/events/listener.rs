//! Listener seam between the match engine and its presentation layer.

use super::event::MatchEvent;
use crate::core::{InstanceId, MatchState, Side};

/// Receives match notifications.
///
/// The engine never depends on a listener doing anything; `NullListener`
/// is a valid choice for headless runs.
pub trait MatchListener {
    /// Called once per event, in publication order.
    fn on_event(&mut self, event: &MatchEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullListener;

impl MatchListener for NullListener {
    fn on_event(&mut self, _event: &MatchEvent) {}
}

/// Records every event for later inspection.
///
/// ## Example
///
/// ```
/// use card_duel::events::{EventLog, MatchEvent, MatchListener};
///
/// let mut log = EventLog::new();
/// log.on_event(&MatchEvent::info("Your turn"));
/// log.on_event(&MatchEvent::warning("Hand is full"));
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.warnings().count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in order.
    #[must_use]
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// States published through `StateChanged`, in order.
    pub fn states(&self) -> impl Iterator<Item = (MatchState, u32)> + '_ {
        self.events.iter().filter_map(|event| match event {
            MatchEvent::StateChanged { state, turn } => Some((*state, *turn)),
            _ => None,
        })
    }

    /// Last published state.
    #[must_use]
    pub fn last_state(&self) -> Option<MatchState> {
        self.states().last().map(|(state, _)| state)
    }

    /// Health values published for one side.
    pub fn health_of(&self, side: Side) -> impl Iterator<Item = i32> + '_ {
        self.events.iter().filter_map(move |event| match event {
            MatchEvent::HealthChanged { side: s, health, .. } if *s == side => Some(*health),
            _ => None,
        })
    }

    /// How many times a card was reported dead.
    #[must_use]
    pub fn deaths_of(&self, card: InstanceId) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, MatchEvent::CardDied { card: c, .. } if *c == card))
            .count()
    }

    /// Every death report.
    pub fn deaths(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.events.iter().filter_map(|event| match event {
            MatchEvent::CardDied { card, .. } => Some(*card),
            _ => None,
        })
    }

    /// Message texts, warnings included.
    pub fn messages(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(|event| match event {
            MatchEvent::Message { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Warning message texts.
    pub fn warnings(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(|event| match event {
            MatchEvent::Message {
                text,
                is_warning: true,
            } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Outcome of the first `GameOver` event.
    #[must_use]
    pub fn game_over(&self) -> Option<bool> {
        self.events.iter().find_map(|event| match event {
            MatchEvent::GameOver { player_won } => Some(*player_won),
            _ => None,
        })
    }
}

impl MatchListener for EventLog {
    fn on_event(&mut self, event: &MatchEvent) {
        self.events.push(event.clone());
    }
}

impl<L: MatchListener + ?Sized> MatchListener for &mut L {
    fn on_event(&mut self, event: &MatchEvent) {
        (**self).on_event(event);
    }
}

impl<L: MatchListener + ?Sized> MatchListener for Box<L> {
    fn on_event(&mut self, event: &MatchEvent) {
        (**self).on_event(event);
    }
}
