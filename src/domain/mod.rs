pub mod classify;
pub mod dates;
pub mod display;
pub mod filters;
pub mod models;

pub use classify::{classify, Bucket, Classification, Classified, Scheduled};
pub use dates::{parse_date_range, DateRange};
pub use display::{date_badge, format_date_range, strip_game_prefix, DateBadge};
pub use filters::{FilterKind, FilterRule, FilterRuleSet, Named};
pub use models::*;
