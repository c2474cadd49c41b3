use serde::{Deserialize, Serialize};

use crate::types::validation::{is_valid_username, normalize_username};

/// Query of the registration page, filled in by the claim form.
#[derive(Debug, Deserialize)]
pub struct Query {
  pub username: Option<String>,
}

/// Initial state of the registration form.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Prefill {
  pub username: Option<String>,
}

impl Query {
  #[must_use]
  pub fn prefill(&self) -> Prefill {
    let username = self
      .username
      .as_deref()
      .filter(|name| is_valid_username(name))
      .map(normalize_username);

    Prefill { username }
  }
}
