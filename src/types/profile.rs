use serde::{Deserialize, Serialize};

use crate::schema::User;

/// The part of a user shown on their public booking page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
  pub fullname: String,
  pub bio: Option<String>,
  pub avatar_url: Option<String>,
}

impl From<User> for PublicProfile {
  fn from(user: User) -> Self {
    Self {
      fullname: user.fullname,
      bio: user.bio,
      avatar_url: user.avatar_url,
    }
  }
}
