use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;

use super::Error;
use crate::{
  database::{self, ReportExt},
  types::Error as ErrorType,
};

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::NotFound => StatusCode::NOT_FOUND,
      ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
      ErrorType::Unauthorized => StatusCode::UNAUTHORIZED,
      ErrorType::DateInPast
      | ErrorType::InvalidFormBody(..)
      | ErrorType::MissingDate
      | ErrorType::SlotTaken
      | ErrorType::TimeUnavailable
      | ErrorType::UserNotFound
      | ErrorType::UsernameTaken => StatusCode::BAD_REQUEST,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(error = ?self.report, trace = %self.trace, "request failed");
    } else {
      tracing::debug!(kind = self.error_type.kind(), "request rejected");
    }
    HttpResponse::build(status).json(&self.error_type)
  }
}

impl From<Report<database::Error>> for Error {
  fn from(value: Report<database::Error>) -> Self {
    if value.is_readonly() {
      Error::from_report(ErrorType::ReadonlyMode, value)
    } else {
      Error::from_report(ErrorType::Internal, value)
    }
  }
}

impl From<validator::ValidateError> for Error {
  fn from(value: validator::ValidateError) -> Self {
    #[derive(Debug, thiserror::Error)]
    #[error("Validation error occurred")]
    struct ValidateError;
    Error::from_context(ErrorType::InvalidFormBody(value), ValidateError)
  }
}

/// Shorthand for rejections that carry no report worth keeping
/// beyond the client-facing type.
impl From<ErrorType> for Error {
  fn from(value: ErrorType) -> Self {
    #[derive(Debug, thiserror::Error)]
    #[error("Request rejected")]
    struct Rejected;
    Error::from_context(value, Rejected)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{body::MessageBody, ResponseError};

  fn body_of(error: &Error) -> serde_json::Value {
    let body = error.error_response().into_body().try_into_bytes().unwrap();
    serde_json::from_slice(&body).unwrap()
  }

  #[test]
  fn test_status_codes() {
    assert_eq!(StatusCode::BAD_REQUEST, Error::from(ErrorType::UserNotFound).status_code());
    assert_eq!(StatusCode::BAD_REQUEST, Error::from(ErrorType::SlotTaken).status_code());
    assert_eq!(StatusCode::BAD_REQUEST, Error::from(ErrorType::TimeUnavailable).status_code());
    assert_eq!(StatusCode::UNAUTHORIZED, Error::from(ErrorType::Unauthorized).status_code());
    assert_eq!(StatusCode::NOT_FOUND, Error::from(ErrorType::NotFound).status_code());
  }

  #[test]
  fn test_database_errors() {
    let readonly = Error::from(Report::new(database::Error::Readonly));
    assert_eq!(StatusCode::SERVICE_UNAVAILABLE, readonly.status_code());
    assert!(readonly.downcast_ref::<database::Error>().is_some());

    let unhealthy = Error::from(Report::new(database::Error::UnhealthyPool));
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, unhealthy.status_code());
    assert_eq!(
      serde_json::json!({ "type": "internal", "message": "Failed to perform request" }),
      body_of(&unhealthy)
    );
  }

  #[test]
  fn test_validation_body() {
    let mut fields = validator::ValidateError::field_builder();
    fields.insert_message("username", "Username must have at least 3 letters");
    let error = Error::from(fields.build());

    assert_eq!(StatusCode::BAD_REQUEST, error.status_code());
    assert_eq!(
      serde_json::json!({
        "type": "invalid_form_body",
        "message": "Username must have at least 3 letters",
        "errors": { "username": { "_errors": ["Username must have at least 3 letters"] } },
      }),
      body_of(&error)
    );
  }
}
