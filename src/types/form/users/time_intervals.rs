use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::{
  calendar::{SLOT_MINUTES, WEEK_DAYS},
  schema::NewTimeInterval,
  util::time::converter_time_string_to_minutes,
};

/// Body of `POST /api/users/time-intervals`.
#[derive(Debug, Deserialize, Serialize)]
pub struct Request {
  pub intervals: Vec<Interval>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
  pub week_day: i16,
  /// `HH:MM`
  pub start_time: String,
  /// `HH:MM`
  pub end_time: String,
}

impl Interval {
  pub fn to_row(&self) -> Result<NewTimeInterval, ValidateError> {
    let mut fields = ValidateError::field_builder();
    if !WEEK_DAYS.contains(&self.week_day) {
      fields.insert_message("weekDay", "Week day must be between 0 and 6");
    }

    let start = minutes(&self.start_time);
    if let Err(error) = &start {
      fields.insert_message("startTime", error.to_string());
    }
    let end = minutes(&self.end_time);
    if let Err(error) = &end {
      fields.insert_message("endTime", error.to_string());
    }

    if let (Ok(start), Ok(end)) = (start, end) {
      if end - start < SLOT_MINUTES {
        fields.insert_message("endTime", "End time must be at least one hour after start time");
      }
      fields.build().into_result()?;
      Ok(NewTimeInterval {
        week_day: self.week_day,
        time_start_in_minutes: start,
        time_end_in_minutes: end,
      })
    } else {
      Err(fields.build())
    }
  }
}

impl Validate for Interval {
  fn validate(&self) -> Result<(), ValidateError> {
    self.to_row().map(|_| ())
  }
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    self.to_rows().map(|_| ())
  }
}

impl Request {
  /// Validates every interval and converts them into rows sorted
  /// by week day and start time.
  pub fn to_rows(&self) -> Result<Vec<NewTimeInterval>, ValidateError> {
    let mut fields = ValidateError::field_builder();
    if self.intervals.is_empty() {
      fields.insert_message("intervals", "At least one week day must be available");
      return Err(fields.build());
    }

    if let Err(error) = self.intervals.as_slice().validate() {
      fields.insert("intervals", error);
      return Err(fields.build());
    }

    let mut rows = self
      .intervals
      .iter()
      .map(Interval::to_row)
      .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by_key(|row| (row.week_day, row.time_start_in_minutes));
    let overlaps = rows.windows(2).any(|pair| {
      pair[0].week_day == pair[1].week_day
        && pair[1].time_start_in_minutes < pair[0].time_end_in_minutes
    });
    if overlaps {
      fields.insert_message("intervals", "Intervals on the same week day must not overlap");
      return Err(fields.build());
    }

    Ok(rows)
  }
}

fn minutes(time: &str) -> Result<i32, crate::util::time::TimeStringError> {
  // at most 23:59, far from i32::MAX
  #[allow(clippy::cast_possible_wrap)]
  converter_time_string_to_minutes(time).map(|minutes| minutes as i32)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn interval(week_day: i16, start_time: &str, end_time: &str) -> Interval {
    Interval {
      week_day,
      start_time: start_time.into(),
      end_time: end_time.into(),
    }
  }

  #[test]
  fn test_to_rows() {
    let form = Request {
      intervals: vec![interval(3, "08:00", "18:00"), interval(1, "09:30", "12:00")],
    };
    let rows = form.to_rows().unwrap();
    assert_eq!(
      vec![
        NewTimeInterval {
          week_day: 1,
          time_start_in_minutes: 570,
          time_end_in_minutes: 720,
        },
        NewTimeInterval {
          week_day: 3,
          time_start_in_minutes: 480,
          time_end_in_minutes: 1080,
        },
      ],
      rows
    );
  }

  #[test]
  fn test_rejects_invalid_intervals() {
    assert!(Request { intervals: vec![] }.validate().is_err());

    let short = Request { intervals: vec![interval(1, "08:00", "08:30")] };
    let error = short.validate().unwrap_err();
    assert_eq!(
      Some("End time must be at least one hour after start time"),
      error.first_message()
    );

    let bad_day = Request { intervals: vec![interval(7, "08:00", "10:00")] };
    assert!(bad_day.validate().is_err());

    let bad_time = Request { intervals: vec![interval(1, "8h", "10:00")] };
    assert!(bad_time.validate().is_err());
  }

  #[test]
  fn test_rejects_overlapping_intervals() {
    let form = Request {
      intervals: vec![interval(2, "08:00", "12:00"), interval(2, "11:00", "14:00")],
    };
    let error = form.validate().unwrap_err();
    assert_eq!(
      Some("Intervals on the same week day must not overlap"),
      error.first_message()
    );

    let form = Request {
      intervals: vec![interval(2, "08:00", "12:00"), interval(2, "12:00", "14:00")],
    };
    assert!(form.validate().is_ok());
  }
}
