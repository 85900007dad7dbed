use chrono::{DateTime, Local};

use crate::models::document::Document;

use super::breakdown::TimeBreakdown;
use super::models::{CardId, CardState, CARD_MARKER_ATTR};
use super::resolve::resolve_target;

/// Outcome of one update pass across every managed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// True only when every card reported started this tick.
    pub all_started: bool,
    /// How many cards reported started this tick.
    pub started: usize,
}

/// Manages the countdown cards discovered in a document and applies one
/// tick at a time across all of them.
pub struct CountdownUpdater {
    cards: Vec<CardState>,
}

impl CountdownUpdater {
    /// Collects every element carrying the card marker attribute,
    /// snapshotting each into a card in document order. Elements without
    /// the marker are ignored.
    pub fn discover(document: &Document) -> Self {
        let cards = document
            .elements
            .iter()
            .filter(|element| element.has_attribute(CARD_MARKER_ATTR))
            .enumerate()
            .map(|(index, element)| CardState::from_element(CardId(index as u64), element))
            .collect::<Vec<_>>();
        log::info!("Discovered {} countdown card(s)", cards.len());
        Self { cards }
    }

    pub fn cards(&self) -> &[CardState] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Updates a single card against `now`, returning whether it has
    /// started. A card whose target date cannot be parsed is left untouched
    /// and reports not-started, with no error raised.
    fn update_card(card: &mut CardState, now: DateTime<Local>) -> bool {
        let Some(target) = resolve_target(card, now) else {
            return false;
        };

        let diff_ms = target.signed_duration_since(now).num_milliseconds();
        if diff_ms <= 0 {
            card.display.write_terminal();
            return true;
        }

        card.display
            .write_breakdown(&TimeBreakdown::from_millis(diff_ms));
        false
    }

    /// Runs one update pass over every card at the supplied instant.
    pub fn tick_at(&mut self, now: DateTime<Local>) -> TickResult {
        let mut started = 0;
        for card in &mut self.cards {
            if Self::update_card(card, now) {
                started += 1;
            }
        }
        TickResult {
            all_started: started == self.cards.len(),
            started,
        }
    }

    /// Convenience form of [`Self::tick_at`] against the current local time.
    pub fn tick(&mut self) -> TickResult {
        self.tick_at(Local::now())
    }
}
