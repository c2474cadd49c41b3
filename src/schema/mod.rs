mod scheduling;
mod time_interval;
mod user;

pub use scheduling::{NewScheduling, Scheduling};
pub use time_interval::{NewTimeInterval, TimeInterval};
pub use user::User;
