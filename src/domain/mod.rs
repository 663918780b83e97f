pub mod countdown;
pub mod enums;
pub mod session;
pub mod site;

pub use countdown::{
    clamp_minutes, minutes_or_default, parse_minutes, Countdown, CountdownState, Projection,
    DEFAULT_DURATION_MINUTES, PRESET_MINUTES,
};
pub use enums::{FormKind, Page, UiMode};
pub use session::BlockingSession;
pub use site::{BlockedSite, BlockedSites};
