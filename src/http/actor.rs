use actix_web::{
  cookie::{time::Duration, Cookie},
  web, FromRequest,
};
use futures::future::{ready, LocalBoxFuture};
use thiserror::Error;

use crate::{
  schema::User,
  types::id::{marker::UserMarker, Id},
  App,
};

use super::Error;

/// Holds the id of the user who signed up from this browser.
pub const USER_ID_COOKIE: &str = "@ignitecall:userId";
pub const USER_ID_COOKIE_MAX_AGE: Duration = Duration::days(7);

#[must_use]
pub fn user_id_cookie(id: Id<UserMarker>) -> Cookie<'static> {
  Cookie::build(USER_ID_COOKIE, id.to_string())
    .path("/")
    .max_age(USER_ID_COOKIE_MAX_AGE)
    .finish()
}

#[derive(Debug)]
pub enum Actor {
  Anonymous,
  User(User),
}

impl Actor {
  pub fn get_user(self) -> Result<User, Error> {
    #[derive(Debug, Error)]
    #[error("Attempt to access user-only route")]
    struct Unauthorized;
    match self {
      Self::User(n) => Ok(n),
      Self::Anonymous => Err(Error::from_context(
        crate::types::Error::Unauthorized,
        Unauthorized,
      )),
    }
  }
}

impl FromRequest for Actor {
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(
    req: &actix_web::HttpRequest,
    _payload: &mut actix_web::dev::Payload,
  ) -> Self::Future {
    // a tampered or stale cookie is treated as no cookie at all
    let user_id = req
      .cookie(USER_ID_COOKIE)
      .and_then(|cookie| cookie.value().parse::<Id<UserMarker>>().ok());

    let Some(user_id) = user_id else {
      return Box::pin(ready(Ok(Actor::Anonymous)));
    };

    let Some(app) = req.app_data::<web::Data<App>>() else {
      #[derive(Debug, Error)]
      #[error("The web app has no available configuration")]
      struct NoConfig;
      return Box::pin(ready(Err(Error::from_context(
        crate::types::Error::Internal,
        NoConfig,
      ))));
    };

    let app = app.clone();
    Box::pin(async move {
      let mut conn = app.db_read_prefer_primary().await?;
      match User::by_id(&mut conn, user_id).await? {
        Some(user) => Ok(Actor::User(user)),
        None => Ok(Actor::Anonymous),
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_user_id_cookie() {
    let cookie = user_id_cookie(Id::new(42));
    assert_eq!(USER_ID_COOKIE, cookie.name());
    assert_eq!("42", cookie.value());
    assert_eq!(Some("/"), cookie.path());
    assert_eq!(Some(Duration::days(7)), cookie.max_age());
  }
}
