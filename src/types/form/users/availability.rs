use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::ValidateError;

#[derive(Debug, Default, Deserialize)]
pub struct Query {
  pub date: Option<String>,
}

impl Query {
  /// `Ok(None)` if the date is missing or empty.
  pub fn date(&self) -> Result<Option<NaiveDate>, ValidateError> {
    let Some(date) = self.date.as_deref().filter(|d| !d.is_empty()) else {
      return Ok(None);
    };

    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
      .map(Some)
      .map_err(|_| {
        let mut fields = ValidateError::field_builder();
        fields.insert_message("date", "Date must be written as YYYY-MM-DD");
        fields.build()
      })
  }
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
  pub possible_times: Vec<u32>,
  pub available_times: Vec<u32>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_date() {
    let query = Query { date: Some("2024-06-03".into()) };
    assert_eq!(Ok(NaiveDate::from_ymd_opt(2024, 6, 3)), query.date());

    assert_eq!(Ok(None), Query::default().date());
    assert_eq!(Ok(None), Query { date: Some(String::new()) }.date());
    assert!(Query { date: Some("03/06/2024".into()) }.date().is_err());
  }

  #[test]
  fn test_empty_response() {
    let json = serde_json::to_value(Response::default()).unwrap();
    assert_eq!(serde_json::json!({ "possibleTimes": [], "availableTimes": [] }), json);
  }
}
