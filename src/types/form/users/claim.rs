use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::types::validation::{normalize_username, validate_username};

/// Body of the claim username form on the home page.
#[derive(Debug, Deserialize, Serialize)]
pub struct Request {
  pub username: String,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("username", validate_username(&self.username));
    fields.build().into_result()
  }
}

impl Request {
  /// Where the visitor continues after claiming. Validated
  /// usernames never need percent-encoding.
  #[must_use]
  pub fn register_location(&self) -> String {
    format!("/register?username={}", normalize_username(&self.username))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_validate() {
    let form = Request { username: "ab".into() };
    let error = form.validate().unwrap_err();
    assert_eq!(Some("Username must have at least 3 letters"), error.first_message());

    let form = Request { username: "john_doe".into() };
    assert!(form.validate().is_err());

    let form = Request { username: "John-Doe".into() };
    assert!(form.validate().is_ok());
    assert_eq!("/register?username=john-doe", form.register_location());
  }
}
