use std::num::{NonZeroU32, NonZeroU64};

use crate::{
  config,
  schema::TimeInterval,
  types::id::Id,
  App,
};

/// An interval of user `1`, bounds in minutes since midnight.
pub fn interval(week_day: i16, start: i32, end: i32) -> TimeInterval {
  TimeInterval {
    id: Id::new(1),
    user_id: Id::new(1),
    week_day,
    time_start_in_minutes: start,
    time_end_in_minutes: end,
  }
}

/// Configuration pointing at a database nobody listens to.
pub fn config() -> config::Server {
  config::Server {
    db: config::Database {
      primary: config::DbPoolConfig {
        readonly: false,
        min_idle: None,
        pool_size: NonZeroU32::new(1).unwrap(),
        url: String::from("postgres://localhost:1/ignitecall").into(),
      },
      replica: None,
      enforce_tls: false,
      timeout_secs: NonZeroU64::new(1).unwrap(),
      migrate: false,
    },
    ip: "127.0.0.1".parse().unwrap(),
    port: 3333,
    workers: None,
    logging: config::Logging::default(),
  }
}

/// An [`App`] whose pools never connect. Handlers that reach the
/// database with it fail, so it only suits requests that are
/// answered before any query.
pub fn lazy_app() -> App {
  App::new_lazy(config()).unwrap()
}

/// Builds an actix service with every route and extractor config
/// the real server has.
macro_rules! init_service {
  ($app:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($app))
        .configure(crate::server::configure_extractors)
        .configure(crate::http::controllers::configure),
    )
    .await
  };
}

pub(crate) use init_service;
