use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

use super::models::{CardState, TargetState};

/// Parses the ISO-like target-date form (`2026-03-09T08:00:00`, or a bare
/// date read as local midnight) into a local instant.
fn parse_target_date(raw: &str) -> Option<DateTime<Local>> {
    let trimmed = raw.trim();
    let naive = trimmed.parse::<NaiveDateTime>().ok().or_else(|| {
        trimmed
            .parse::<NaiveDate>()
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })?;
    Local.from_local_datetime(&naive).earliest()
}

/// Substitutes `year` into the template's calendar fields. A February 29
/// template lands on March 1 in non-leap years, matching the substitution
/// semantics countdown templates were written against.
fn substitute_year(base: NaiveDateTime, year: i32) -> NaiveDateTime {
    base.with_year(year).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(year, 3, 1)
            .map(|date| date.and_time(base.time()))
            .unwrap_or(base)
    })
}

/// Resolves a card's target instant for this tick. Returns `None` when the
/// target date is unparseable; the caller skips the card without touching
/// its display.
///
/// With the rollover flag set, the template's month/day/time is read against
/// the current year; a substituted date at or before `now` rolls to the next
/// year instead, so one date template describes a recurring annual deadline.
pub fn resolve_target(card: &mut CardState, now: DateTime<Local>) -> Option<DateTime<Local>> {
    let base = match card.target {
        TargetState::Unchecked => {
            let parsed = parse_target_date(card.target_date_or_default());
            card.target = match parsed {
                Some(instant) => TargetState::Valid(instant),
                None => TargetState::Invalid,
            };
            parsed?
        }
        TargetState::Valid(instant) => instant,
        TargetState::Invalid => return None,
    };

    if !card.rollover_year {
        return Some(base);
    }

    let this_year = substitute_year(base.naive_local(), now.year());
    let resolved = Local.from_local_datetime(&this_year).earliest()?;
    if resolved <= now {
        let next_year = substitute_year(base.naive_local(), now.year() + 1);
        return Local.from_local_datetime(&next_year).earliest();
    }
    Some(resolved)
}
