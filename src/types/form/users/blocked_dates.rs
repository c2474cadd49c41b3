use serde::{Deserialize, Serialize};
use validator::ValidateError;

use crate::calendar::Month;

pub const MISSING_YEAR_OR_MONTH: &str = "Year or month not specified.";

#[derive(Debug, Default, Deserialize)]
pub struct Query {
  pub year: Option<String>,
  pub month: Option<String>,
}

impl Query {
  /// `Ok(None)` if either parameter is missing or empty.
  pub fn month(&self) -> Result<Option<Month>, ValidateError> {
    let (Some(year), Some(month)) = (non_empty(&self.year), non_empty(&self.month)) else {
      return Ok(None);
    };

    let mut fields = ValidateError::field_builder();
    let year = year.trim().parse::<i32>().ok();
    if year.is_none() {
      fields.insert_message("year", "Year must be a number");
    }
    let month = month.trim().parse::<u32>().ok().filter(|m| (1..=12).contains(m));
    if month.is_none() {
      fields.insert_message("month", "Month must be between 1 and 12");
    }

    let (Some(year), Some(month)) = (year, month) else {
      return Err(fields.build());
    };

    Month::new(year, month).map(Some).ok_or_else(|| {
      fields.insert_message("year", "Year is out of range");
      fields.build()
    })
  }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
  pub blocked_week_days: Vec<i16>,
  pub blocked_days: Vec<u32>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn query(year: Option<&str>, month: Option<&str>) -> Query {
    Query {
      year: year.map(ToString::to_string),
      month: month.map(ToString::to_string),
    }
  }

  #[test]
  fn test_missing_parameters() {
    assert_eq!(Ok(None), query(None, Some("6")).month());
    assert_eq!(Ok(None), query(Some("2024"), None).month());
    assert_eq!(Ok(None), query(Some(""), Some("6")).month());
  }

  #[test]
  fn test_parses_month() {
    assert_eq!(Ok(Month::new(2024, 6)), query(Some("2024"), Some("06")).month());
    assert_eq!(Ok(Month::new(2024, 12)), query(Some("2024"), Some("12")).month());
  }

  #[test]
  fn test_rejects_malformed_parameters() {
    let error = query(Some("2024"), Some("13")).month().unwrap_err();
    assert_eq!(Some("Month must be between 1 and 12"), error.first_message());

    let error = query(Some("next"), Some("1")).month().unwrap_err();
    assert_eq!(Some("Year must be a number"), error.first_message());

    for year in ["-5000", "0", "10000"] {
      let error = query(Some(year), Some("1")).month().unwrap_err();
      assert_eq!(Some("Year is out of range"), error.first_message(), "{year}");
    }
  }
}
