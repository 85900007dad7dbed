use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::time::{self, MissedTickBehavior};

use super::service::CountdownUpdater;

/// Synchronous drive loop with injectable time. The first tick runs
/// immediately; `wait` stands in for the 1-second suspension before each
/// following tick and is never called again once a tick reports every card
/// started. With zero discovered cards the loop returns before the first
/// tick. `observer` sees the updater after every tick.
pub fn run_with<C, W, O>(updater: &mut CountdownUpdater, mut clock: C, mut wait: W, mut observer: O)
where
    C: FnMut() -> DateTime<Local>,
    W: FnMut(),
    O: FnMut(&CountdownUpdater),
{
    if updater.is_empty() {
        return;
    }

    let first = updater.tick_at(clock());
    observer(updater);
    if first.all_started {
        return;
    }

    loop {
        wait();
        let result = updater.tick_at(clock());
        observer(updater);
        if result.all_started {
            break;
        }
    }
}

/// Production drive loop: one tick per second on a tokio interval, stopping
/// the timer the moment a tick reports every card started. If the very
/// first tick already reports all started, no timer is scheduled at all.
pub async fn run<O>(updater: &mut CountdownUpdater, mut observer: O)
where
    O: FnMut(&CountdownUpdater),
{
    if updater.is_empty() {
        log::info!("No countdown cards discovered; nothing to do");
        return;
    }

    let first = updater.tick();
    observer(updater);
    if first.all_started {
        log::info!("All countdown cards already started; timer not scheduled");
        return;
    }

    let mut interval = time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The interval's first tick completes immediately and the initial
    // update already ran, so consume it before the loop.
    interval.tick().await;

    loop {
        interval.tick().await;
        let result = updater.tick();
        observer(updater);
        if result.all_started {
            log::info!("All countdown cards started; stopping timer");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{Document, Element, SlotSet};
    use crate::services::countdown::models::{CARD_MARKER_ATTR, TARGET_DATE_ATTR};
    use chrono::{Duration as ChronoDuration, TimeZone};
    use std::collections::BTreeMap;

    fn updater_for(target_dates: &[&str]) -> CountdownUpdater {
        let elements = target_dates
            .iter()
            .map(|raw| Element {
                attributes: BTreeMap::from([
                    (CARD_MARKER_ATTR.to_owned(), String::new()),
                    (TARGET_DATE_ATTR.to_owned(), (*raw).to_owned()),
                ]),
                slots: SlotSet::all(),
            })
            .collect();
        CountdownUpdater::discover(&Document { elements })
    }

    fn stepping_clock(start: DateTime<Local>) -> impl FnMut() -> DateTime<Local> {
        let mut current = start;
        move || {
            let now = current;
            current += ChronoDuration::seconds(1);
            now
        }
    }

    #[test]
    fn no_cards_means_no_ticks_and_no_timer() {
        let mut updater = updater_for(&[]);
        let mut waits = 0usize;
        let mut observations = 0usize;

        run_with(
            &mut updater,
            || Local::now(),
            || waits += 1,
            |_| observations += 1,
        );

        assert_eq!(waits, 0);
        assert_eq!(observations, 0);
    }

    #[test]
    fn already_started_first_tick_never_starts_timer() {
        let mut updater = updater_for(&["2020-01-01T00:00:00"]);
        let mut waits = 0usize;
        let mut observations = 0usize;
        let start = Local.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();

        run_with(
            &mut updater,
            stepping_clock(start),
            || waits += 1,
            |_| observations += 1,
        );

        assert_eq!(waits, 0);
        assert_eq!(observations, 1);
    }

    #[test]
    fn timer_stops_exactly_on_the_all_started_tick() {
        // Target 2.5s ahead of the first tick: ticks at +0s, +1s and +2s
        // still count down, the tick at +3s starts the card.
        let start = Local.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let target = start + ChronoDuration::milliseconds(2_500);
        let raw = target.format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
        let mut updater = updater_for(&[&raw]);

        let mut waits = 0usize;
        let mut observations = 0usize;
        run_with(
            &mut updater,
            stepping_clock(start),
            || waits += 1,
            |_| observations += 1,
        );

        assert_eq!(observations, 4);
        // One wait per timer callback, none after the all-started tick.
        assert_eq!(waits, 3);
        assert_eq!(updater.cards()[0].display.status_hidden, Some(false));
    }

    #[test]
    fn later_cards_keep_the_timer_running_until_all_started() {
        let start = Local.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let near = start + ChronoDuration::milliseconds(1_500);
        let far = start + ChronoDuration::milliseconds(3_500);
        let near_raw = near.format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
        let far_raw = far.format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
        let mut updater = updater_for(&[&near_raw, &far_raw]);

        let mut waits = 0usize;
        run_with(&mut updater, stepping_clock(start), || waits += 1, |_| {});

        // Ticks at +0..+4s; the far card starts on the fifth tick.
        assert_eq!(waits, 4);
        for card in updater.cards() {
            assert_eq!(card.display.status_hidden, Some(false));
        }
    }
}
