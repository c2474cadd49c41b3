use serde::{ser::SerializeMap, Serialize};
use std::fmt::Display;

/// Errors shown to API clients. Every variant is serialized as
/// `{"type": ..., "message": ...}` so clients can show `message`
/// as is.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
  DateInPast,
  Internal,
  InvalidFormBody(validator::ValidateError),
  MissingDate,
  NotFound,
  ReadonlyMode,
  SlotTaken,
  TimeUnavailable,
  Unauthorized,
  UserNotFound,
  UsernameTaken,
}

impl Error {
  #[must_use]
  pub const fn kind(&self) -> &'static str {
    match self {
      Error::DateInPast => "date_in_past",
      Error::Internal => "internal",
      Error::InvalidFormBody(..) => "invalid_form_body",
      Error::MissingDate => "missing_date",
      Error::NotFound => "not_found",
      Error::ReadonlyMode => "readonly_mode",
      Error::SlotTaken => "slot_taken",
      Error::TimeUnavailable => "time_unavailable",
      Error::Unauthorized => "unauthorized",
      Error::UserNotFound => "user_not_found",
      Error::UsernameTaken => "username_taken",
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::DateInPast => f.write_str("Date is in the past."),
      Error::Internal => f.write_str("Failed to perform request"),
      Error::InvalidFormBody(error) => match error.first_message() {
        Some(message) => f.write_str(message),
        None => f.write_str("Invalid form body"),
      },
      Error::MissingDate => f.write_str("Date not provided."),
      Error::NotFound => f.write_str("Resource not found"),
      Error::ReadonlyMode => f.write_str("Service is currently in read-only mode"),
      Error::SlotTaken => f.write_str("There is another scheduling at the same time."),
      Error::TimeUnavailable => f.write_str("User is not available at this time."),
      Error::Unauthorized => f.write_str("Authentication required"),
      Error::UserNotFound => f.write_str("User does not exist."),
      Error::UsernameTaken => f.write_str("username already exists"),
    }
  }
}

impl Serialize for Error {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    let len = if matches!(self, Error::InvalidFormBody(..)) { 3 } else { 2 };
    let mut map = serializer.serialize_map(Some(len))?;
    map.serialize_entry("type", self.kind())?;
    map.serialize_entry("message", &self.to_string())?;
    if let Error::InvalidFormBody(errors) = self {
      map.serialize_entry("errors", errors)?;
    }
    map.end()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::Token;

  #[track_caller]
  fn assert_unit_variant(value: Error, kind: &'static str, message: &'static str) {
    serde_test::assert_ser_tokens(
      &value,
      &[
        Token::Map { len: Some(2) },
        Token::Str("type"),
        Token::Str(kind),
        Token::Str("message"),
        Token::Str(message),
        Token::MapEnd,
      ],
    );
  }

  #[test]
  fn test_serialize_impl() {
    assert_unit_variant(Error::Internal, "internal", "Failed to perform request");
    assert_unit_variant(Error::UsernameTaken, "username_taken", "username already exists");
    assert_unit_variant(Error::UserNotFound, "user_not_found", "User does not exist.");
    assert_unit_variant(
      Error::SlotTaken,
      "slot_taken",
      "There is another scheduling at the same time.",
    );
    assert_unit_variant(
      Error::TimeUnavailable,
      "time_unavailable",
      "User is not available at this time.",
    );
  }

  #[test]
  fn test_invalid_form_body_passes_first_message() {
    let mut fields = validator::ValidateError::field_builder();
    fields.insert_message("username", "Username must have at least 3 letters");

    serde_test::assert_ser_tokens(
      &Error::InvalidFormBody(fields.build()),
      &[
        Token::Map { len: Some(3) },
        Token::Str("type"),
        Token::Str("invalid_form_body"),
        Token::Str("message"),
        Token::Str("Username must have at least 3 letters"),
        Token::Str("errors"),
        Token::Map { len: Some(1) },
        Token::Str("username"),
        Token::Map { len: Some(1) },
        Token::Str("_errors"),
        Token::Seq { len: Some(1) },
        Token::Str("Username must have at least 3 letters"),
        Token::SeqEnd,
        Token::MapEnd,
        Token::MapEnd,
        Token::MapEnd,
      ],
    );
  }
}
