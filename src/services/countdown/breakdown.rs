const MILLIS_PER_SECOND: i64 = 1_000;
const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Whole-unit breakdown of a countdown gap. Days are unbounded; hours,
/// minutes and seconds stay in clock range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBreakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeBreakdown {
    /// Decomposes a millisecond gap, floored to whole seconds.
    pub fn from_millis(diff_ms: i64) -> Self {
        let total_seconds = diff_ms.div_euclid(MILLIS_PER_SECOND);
        Self {
            days: total_seconds / SECONDS_PER_DAY,
            hours: (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total_seconds % SECONDS_PER_MINUTE,
        }
    }

    /// Day count, unpadded.
    pub fn days_text(&self) -> String {
        self.days.to_string()
    }

    pub fn hours_text(&self) -> String {
        pad2(self.hours)
    }

    pub fn minutes_text(&self) -> String {
        pad2(self.minutes)
    }

    pub fn seconds_text(&self) -> String {
        pad2(self.seconds)
    }
}

fn pad2(value: i64) -> String {
    format!("{value:02}")
}
