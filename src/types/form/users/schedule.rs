use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{extras::has_min_chars, Validate, ValidateError};

use crate::{
  types::validation::{is_valid_email, NAME_MIN},
  util::Sensitive,
};

/// Body of `POST /api/users/{username}/schedule`, sent by a
/// visitor of the public booking page.
#[derive(Debug, Deserialize)]
pub struct Request {
  pub name: String,
  pub email: Sensitive<String>,
  pub observations: Option<String>,
  pub date: DateTime<Utc>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if !has_min_chars(self.name.trim(), NAME_MIN) {
      fields.insert_message("name", "Name must have at least 3 letters");
    }
    if !is_valid_email(self.email.as_str()) {
      fields.insert_message("email", "Invalid e-mail address");
    }
    fields.build().into_result()
  }
}
