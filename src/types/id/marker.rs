use crate::internal::Sealed;

macro_rules! markers {
  { $( $(#[$meta:meta])* $ident:ident, )* } => {$(
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct $ident;
    impl Sealed for $ident {}
    impl Marker for $ident {}
  )*};
}

markers! {
  AnyMarker,
  /// Rows of the `schedulings` table.
  SchedulingMarker,
  /// Rows of the `user_time_intervals` table.
  TimeIntervalMarker,
  /// Rows of the `users` table.
  UserMarker,
}

/// This trait represents a marker restricting all objects to
/// from using it as a generic in [Id](super::Id) object.
pub trait Marker: Sealed {}
