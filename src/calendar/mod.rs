//! Availability arithmetic over a user's weekly time intervals
//! and the schedulings already booked.
//!
//! All dates are handled in UTC. Week days follow the
//! `user_time_intervals.week_day` convention: Sunday is `0`
//! and Saturday is `6`.
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use std::{
  collections::{BTreeMap, BTreeSet},
  ops::RangeInclusive,
};

use crate::schema::TimeInterval;

/// Every week day a time interval can be configured for.
pub const WEEK_DAYS: [i16; 7] = [0, 1, 2, 3, 4, 5, 6];

/// Length of one bookable slot.
pub const SLOT_MINUTES: i32 = 60;

/// Years a [`Month`] can be built for.
pub const YEARS: RangeInclusive<i32> = 1..=9999;

/// A calendar month, used to bound blocked dates queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
  first_day: NaiveDate,
}

impl Month {
  /// Returns `None` if `month` is not within 1 to 12 or the year
  /// is out of range.
  #[must_use]
  pub fn new(year: i32, month: u32) -> Option<Self> {
    if !YEARS.contains(&year) {
      return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
  }

  #[must_use]
  pub fn year(&self) -> i32 {
    self.first_day.year()
  }

  #[must_use]
  pub fn month(&self) -> u32 {
    self.first_day.month()
  }

  /// Midnight of the first day of the month.
  #[must_use]
  pub fn start(&self) -> DateTime<Utc> {
    midnight(self.first_day)
  }

  /// Midnight of the first day of the following month (exclusive).
  #[must_use]
  pub fn end(&self) -> DateTime<Utc> {
    let (year, month) = match self.month() {
      12 => (self.year() + 1, 1),
      month => (self.year(), month + 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1)
      .map_or(DateTime::<Utc>::MAX_UTC, midnight)
  }
}

/// Start (inclusive) and end (exclusive) of a day.
#[must_use]
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
  let start = midnight(date);
  let end = date.succ_opt().map_or(DateTime::<Utc>::MAX_UTC, midnight);
  (start, end)
}

// always within 0..=6
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
#[must_use]
pub fn week_day(date: NaiveDate) -> i16 {
  date.weekday().num_days_from_sunday() as i16
}

/// Week days without any configured time interval.
#[must_use]
pub fn blocked_week_days(intervals: &[TimeInterval]) -> Vec<i16> {
  let available: BTreeSet<i16> = intervals.iter().map(|i| i.week_day).collect();
  WEEK_DAYS
    .into_iter()
    .filter(|day| !available.contains(day))
    .collect()
}

/// How many slots can be booked on a week day, or `None` if the
/// user is not available on that day at all.
#[must_use]
pub fn slot_capacity(intervals: &[TimeInterval], week_day: i16) -> Option<i64> {
  intervals
    .iter()
    .filter(|interval| interval.week_day == week_day)
    .map(|interval| i64::from(interval.duration_in_minutes() / SLOT_MINUTES))
    .reduce(|a, b| a + b)
}

/// Days of the month whose bookings already fill every slot of
/// that week day. Days on a blocked week day are left out since
/// they are reported by [`blocked_week_days`].
#[must_use]
pub fn blocked_days(intervals: &[TimeInterval], bookings: &[DateTime<Utc>]) -> Vec<u32> {
  let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
  for booking in bookings {
    *per_day.entry(booking.date_naive()).or_default() += 1;
  }

  per_day
    .into_iter()
    .filter(|(date, amount)| {
      slot_capacity(intervals, week_day(*date)).is_some_and(|size| *amount >= size)
    })
    .map(|(date, _)| date.day())
    .collect()
}

/// Every hour a slot may start at on the given week day, sorted
/// and without duplicates.
#[must_use]
pub fn possible_times(intervals: &[TimeInterval], week_day: i16) -> Vec<u32> {
  let mut hours = BTreeSet::new();
  for interval in intervals.iter().filter(|i| i.week_day == week_day) {
    let start = interval.time_start_in_minutes / SLOT_MINUTES;
    let end = interval.time_end_in_minutes / SLOT_MINUTES;
    hours.extend((start..end).filter_map(|hour| u32::try_from(hour).ok()));
  }
  hours.into_iter().collect()
}

/// Whether `date` starts one of the [`possible_times`] of its
/// week day.
#[must_use]
pub fn is_bookable(intervals: &[TimeInterval], date: DateTime<Utc>) -> bool {
  date == start_of_hour(date)
    && possible_times(intervals, week_day(date.date_naive())).contains(&date.hour())
}

/// Removes hours that are already booked on `date` or already
/// past at `now`.
#[must_use]
pub fn available_times(
  possible: &[u32],
  date: NaiveDate,
  bookings: &[DateTime<Utc>],
  now: DateTime<Utc>,
) -> Vec<u32> {
  let booked: BTreeSet<u32> = bookings
    .iter()
    .filter(|booking| booking.date_naive() == date)
    .map(Timelike::hour)
    .collect();

  possible
    .iter()
    .copied()
    .filter(|hour| !booked.contains(hour))
    .filter(|hour| {
      NaiveTime::from_hms_opt(*hour, 0, 0)
        .map(|time| Utc.from_utc_datetime(&date.and_time(time)))
        .is_some_and(|slot| slot >= now)
    })
    .collect()
}

/// Bookings always start on a whole hour.
#[must_use]
pub fn start_of_hour(date: DateTime<Utc>) -> DateTime<Utc> {
  date
    .with_minute(0)
    .and_then(|d| d.with_second(0))
    .and_then(|d| d.with_nanosecond(0))
    .unwrap_or(date)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
  Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}
