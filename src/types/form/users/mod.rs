pub mod availability;
pub mod blocked_dates;
pub mod claim;
pub mod create;
pub mod register;
pub mod schedule;
pub mod time_intervals;
