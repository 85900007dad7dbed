mod breakdown;
mod driver;
mod models;
mod resolve;
mod service;

pub use breakdown::TimeBreakdown;
pub use driver::{run, run_with};
pub use models::{
    CardDisplay, CardId, CardState, TargetState, CARD_MARKER_ATTR, DEFAULT_TARGET_DATE,
    ROLLOVER_YEAR_ATTR, TARGET_DATE_ATTR,
};
pub use resolve::resolve_target;
pub use service::{CountdownUpdater, TickResult};
