use once_cell::sync::Lazy;
use regex::Regex;
use validator::{extras::has_min_chars, ValidateError};

pub const USERNAME_MIN: usize = 3;
pub const FULLNAME_MIN: usize = 3;
pub const NAME_MIN: usize = 3;
pub const EMAIL_MAX: usize = 254;

#[allow(clippy::expect_used)]
static USERNAME_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?i)^[a-z\-]+$").expect("compile username regex"));

#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
    .expect("compile email regex")
});

/// Usernames are letters and hyphens only, at least
/// [`USERNAME_MIN`] characters long. Case does not matter here,
/// see [`normalize_username`].
pub fn validate_username(name: &str) -> ValidateError {
  let mut error = ValidateError::msg_builder();
  if !has_min_chars(name, USERNAME_MIN) {
    error.insert("Username must have at least 3 letters");
  }
  if !USERNAME_REGEX.is_match(name) {
    error.insert("Usernames may only contain letters and hyphens");
  }
  error.build()
}

#[must_use]
pub fn is_valid_username(name: &str) -> bool {
  validate_username(name).is_empty()
}

#[must_use]
pub fn normalize_username(name: &str) -> String {
  name.to_lowercase()
}

pub fn validate_fullname(name: &str) -> ValidateError {
  let mut error = ValidateError::msg_builder();
  if !has_min_chars(name, FULLNAME_MIN) {
    error.insert("Name must have at least 3 letters");
  }
  error.build()
}

/// Loose check for `local@host` shaped addresses.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
  EMAIL_REGEX.is_match(email) && email.len() <= EMAIL_MAX
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_valid_username() {
    assert!(is_valid_username("john-doe"));
    assert!(is_valid_username("John-Doe"));
    assert!(is_valid_username("abc"));
    assert!(is_valid_username("---"));

    assert!(!is_valid_username("ab"));
    assert!(!is_valid_username("john_doe"));
    assert!(!is_valid_username("john doe"));
    assert!(!is_valid_username("2pac"));
    assert!(!is_valid_username("joão"));
    assert!(!is_valid_username(""));
  }

  #[test]
  fn test_too_short_message() {
    let error = validate_username("ab");
    assert_eq!(Some("Username must have at least 3 letters"), error.first_message());
  }

  #[test]
  fn test_normalize_username() {
    assert_eq!("john-doe", normalize_username("John-DOE"));
    assert_eq!("john-doe", normalize_username("john-doe"));
  }

  #[test]
  fn test_validate_fullname() {
    assert!(validate_fullname("Ana").is_empty());
    assert!(!validate_fullname("Al").is_empty());
  }

  #[test]
  fn test_is_valid_email() {
    assert!(is_valid_email("diego@rocketseat.com.br"));
    assert!(!is_valid_email("diego"));
    assert!(!is_valid_email("diego@"));
  }
}
