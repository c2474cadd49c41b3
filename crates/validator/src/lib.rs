#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;

pub use error::*;
pub mod extras;

/// Checks whether the value is acceptable before it is used to
/// write into the database or to configure the server.
pub trait Validate {
  fn validate(&self) -> Result<(), ValidateError>;
}

impl<T: Validate> Validate for Option<T> {
  fn validate(&self) -> Result<(), ValidateError> {
    match self {
      Some(inner) => inner.validate(),
      None => Ok(()),
    }
  }
}

impl<T: Validate> Validate for [T] {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut slice = ValidateError::slice_builder();
    for element in self {
      match element.validate() {
        Ok(()) => slice.insert_empty(),
        Err(error) => slice.insert(error),
      }
    }
    slice.build().into_result()
  }
}
