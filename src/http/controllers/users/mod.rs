mod availability;
mod blocked_dates;
mod create;
mod schedule;
mod time_intervals;

pub use availability::availability;
pub use blocked_dates::blocked_dates;
pub use create::create;
pub use schedule::schedule;
pub use time_intervals::time_intervals;
