use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::types::validation::{normalize_username, validate_fullname, validate_username};

/// Body of `POST /api/users`.
#[derive(Debug, Deserialize, Serialize)]
pub struct Request {
  pub username: String,
  pub fullname: String,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("username", validate_username(&self.username));
    fields.insert("fullname", validate_fullname(self.fullname.trim()));
    fields.build().into_result()
  }
}

impl Request {
  #[must_use]
  pub fn normalized_username(&self) -> String {
    normalize_username(&self.username)
  }
}
