//! HTTP surface: routes, the session cookie and client errors.

pub mod actor;
pub mod controllers;
pub mod error;

pub use actor::{user_id_cookie, Actor};
pub use error::{Error, Result};
