use chrono::{DateTime, Local};

use crate::models::document::{Element, SlotSet};

use super::breakdown::TimeBreakdown;

/// Attribute whose presence marks an element as a managed countdown card.
pub const CARD_MARKER_ATTR: &str = "data-countdown";
/// Attribute holding the ISO-like target datetime string.
pub const TARGET_DATE_ATTR: &str = "data-target-date";
/// Attribute enabling annual rollover when set to exactly `"true"`.
pub const ROLLOVER_YEAR_ATTR: &str = "data-rollover-year";
/// Target used when a card does not declare a target date of its own.
pub const DEFAULT_TARGET_DATE: &str = "2026-03-09T08:00:00";

/// Unique identifier for countdown cards, assigned in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(pub u64);

/// Parse outcome for a card's target-date attribute. The parse runs at most
/// once per card; rollover resolution on top of it is redone every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetState {
    /// The attribute has not been parsed yet.
    #[default]
    Unchecked,
    /// The attribute parsed to a local instant (before any rollover).
    Valid(DateTime<Local>),
    /// The attribute could not be parsed; the card is skipped on every tick.
    Invalid,
}

/// The mutable output side of a card: one text cell per declared unit slot
/// plus the status visibility flag. `None` means the slot does not exist on
/// this card and is never written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDisplay {
    pub days: Option<String>,
    pub hours: Option<String>,
    pub minutes: Option<String>,
    pub seconds: Option<String>,
    /// `Some(true)` = status slot present and hidden, `Some(false)` =
    /// present and shown, `None` = no status slot on this card.
    pub status_hidden: Option<bool>,
}

impl CardDisplay {
    /// Empty cells for every declared slot; the status slot starts hidden.
    pub(crate) fn for_slots(slots: SlotSet) -> Self {
        Self {
            days: slots.days.then(String::new),
            hours: slots.hours.then(String::new),
            minutes: slots.minutes.then(String::new),
            seconds: slots.seconds.then(String::new),
            status_hidden: slots.status.then_some(true),
        }
    }

    /// Terminal values shown once the target has passed.
    pub(crate) fn write_terminal(&mut self) {
        Self::set(&mut self.days, "0");
        Self::set(&mut self.hours, "00");
        Self::set(&mut self.minutes, "00");
        Self::set(&mut self.seconds, "00");
        if let Some(hidden) = self.status_hidden.as_mut() {
            *hidden = false;
        }
    }

    pub(crate) fn write_breakdown(&mut self, breakdown: &TimeBreakdown) {
        Self::set(&mut self.days, &breakdown.days_text());
        Self::set(&mut self.hours, &breakdown.hours_text());
        Self::set(&mut self.minutes, &breakdown.minutes_text());
        Self::set(&mut self.seconds, &breakdown.seconds_text());
        if let Some(hidden) = self.status_hidden.as_mut() {
            *hidden = true;
        }
    }

    fn set(slot: &mut Option<String>, text: &str) {
        if let Some(cell) = slot.as_mut() {
            *cell = text.to_owned();
        }
    }
}

/// One managed countdown card: the attribute snapshot taken at discovery,
/// the cached parse state, and the display it writes into.
#[derive(Debug, Clone)]
pub struct CardState {
    pub id: CardId,
    /// Raw target-date attribute value, if present on the element.
    pub target_date: Option<String>,
    /// Whether the rollover attribute was exactly `"true"`.
    pub rollover_year: bool,
    pub slots: SlotSet,
    pub display: CardDisplay,
    pub target: TargetState,
}

impl CardState {
    /// Snapshots a card out of a marker-carrying document element.
    pub fn from_element(id: CardId, element: &Element) -> Self {
        Self {
            id,
            target_date: element.attribute(TARGET_DATE_ATTR).map(str::to_owned),
            rollover_year: element.attribute(ROLLOVER_YEAR_ATTR) == Some("true"),
            slots: element.slots,
            display: CardDisplay::for_slots(element.slots),
            target: TargetState::Unchecked,
        }
    }

    /// The target-date string to parse. An absent or empty attribute falls
    /// back to the documented default.
    pub fn target_date_or_default(&self) -> &str {
        self.target_date
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .unwrap_or(DEFAULT_TARGET_DATE)
    }

    /// One-line rendering of the current display, used by the binary.
    pub fn display_line(&self) -> String {
        let days = self.display.days.as_deref().unwrap_or("-");
        let hours = self.display.hours.as_deref().unwrap_or("--");
        let minutes = self.display.minutes.as_deref().unwrap_or("--");
        let seconds = self.display.seconds.as_deref().unwrap_or("--");
        let status = match self.display.status_hidden {
            Some(false) => " [started]",
            _ => "",
        };
        format!(
            "card {}: {}d {}:{}:{}{}",
            self.id.0, days, hours, minutes, seconds, status
        )
    }
}
