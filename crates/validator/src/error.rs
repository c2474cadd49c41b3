use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize};
use std::borrow::Cow;

/// Collects messages for a single value.
pub struct MessageBuilder(Vec<Cow<'static, str>>);

impl MessageBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  pub fn insert(&mut self, message: impl Into<Cow<'static, str>>) {
    self.0.push(message.into());
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Messages(self.0)
  }
}

/// Collects errors for each element of a list. Valid elements
/// are kept as holes so indexes still line up with the input.
pub struct SliceBuilder(Vec<Option<ValidateError>>);

impl SliceBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  pub fn insert_empty(&mut self) {
    self.0.push(None);
  }

  pub fn insert(&mut self, value: ValidateError) {
    self.0.push(if value.is_empty() { None } else { Some(value) });
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Slice(self.0)
  }
}

/// Collects errors keyed by field name. Empty errors are dropped.
pub struct FieldBuilder(IndexMap<Cow<'static, str>, ValidateError>);

#[allow(clippy::new_without_default)]
impl FieldBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self(IndexMap::default())
  }

  pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: ValidateError) {
    if !value.is_empty() {
      self.0.insert(key.into(), value);
    }
  }

  /// Shorthand for a field with exactly one message.
  pub fn insert_message(
    &mut self,
    key: impl Into<Cow<'static, str>>,
    message: impl Into<Cow<'static, str>>,
  ) {
    let mut msg = MessageBuilder::new();
    msg.insert(message);
    self.insert(key, msg.build());
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Fields(self.0)
  }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ValidateError {
  Fields(IndexMap<Cow<'static, str>, ValidateError>),
  Messages(Vec<Cow<'static, str>>),
  Slice(Vec<Option<ValidateError>>),
}

impl std::fmt::Display for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.first_message() {
      Some(message) => f.write_str(message),
      None => f.write_str("Invalid data occurred"),
    }
  }
}

impl std::error::Error for ValidateError {}

impl std::fmt::Debug for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValidateError::Fields(n) => n.fmt(f),
      ValidateError::Messages(n) => f.debug_map().entry(&"_errors", &n).finish(),
      ValidateError::Slice(n) => n.fmt(f),
    }
  }
}

impl ValidateError {
  #[must_use]
  pub fn field_builder() -> FieldBuilder {
    FieldBuilder::new()
  }

  #[must_use]
  pub fn msg_builder() -> MessageBuilder {
    MessageBuilder::new()
  }

  #[must_use]
  pub fn slice_builder() -> SliceBuilder {
    SliceBuilder::new()
  }
}

impl ValidateError {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    match self {
      ValidateError::Slice(n) => n.iter().all(Option::is_none),
      ValidateError::Fields(n) => n.is_empty(),
      ValidateError::Messages(n) => n.is_empty(),
    }
  }

  /// The first message found in insertion order. Clients that only
  /// show one line of feedback display this.
  #[must_use]
  pub fn first_message(&self) -> Option<&str> {
    match self {
      ValidateError::Messages(n) => n.first().map(|message| &**message),
      ValidateError::Fields(n) => n.values().find_map(ValidateError::first_message),
      ValidateError::Slice(n) => n.iter().flatten().find_map(ValidateError::first_message),
    }
  }

  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }
}

impl Serialize for ValidateError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    match self {
      ValidateError::Fields(fields) => {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in fields {
          map.serialize_entry(key, value)?;
        }
        map.end()
      },
      ValidateError::Messages(n) => {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("_errors", &n)?;
        map.end()
      },
      ValidateError::Slice(n) => n.serialize(serializer),
    }
  }
}
