#![allow(dead_code, clippy::unwrap_used, clippy::cast_possible_truncation)]

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use ignitecall::{config, schema::User, App};
use std::{
    num::{NonZeroU32, NonZeroU64},
    sync::atomic::{AtomicU32, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

/// Connects to `DATABASE_URL` and applies migrations. Returns
/// `None` (and the test passes vacuously) when it is not set.
pub async fn app() -> Option<App> {
    dotenvy::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL is not set, skipping");
        return None;
    };

    let config = config::Server {
        db: config::Database {
            primary: config::DbPoolConfig {
                readonly: false,
                min_idle: None,
                pool_size: NonZeroU32::new(5).unwrap(),
                url: url.into(),
            },
            replica: None,
            enforce_tls: false,
            timeout_secs: NonZeroU64::new(10).unwrap(),
            migrate: true,
        },
        ip: "127.0.0.1".parse().unwrap(),
        port: 3333,
        workers: None,
        logging: config::Logging::default(),
    };

    let app = App::new(config).await.unwrap();
    app.primary_db.migrate().await.unwrap();
    Some(app)
}

/// Usernames may only contain letters, so the uniqueness comes
/// from the clock and a counter spelled out in letters.
pub fn unique_username(prefix: &str) -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{prefix}-{}-{}", letters(nanos), letters(u128::from(count)))
}

fn letters(mut n: u128) -> String {
    let mut out = String::new();
    loop {
        out.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
        if n == 0 {
            break out;
        }
    }
}

pub async fn insert_user(app: &App, username: &str) -> User {
    let mut conn = app.db_write().await.unwrap();
    User::insert(&mut conn, username, "Test User").await.unwrap()
}

/// First date of `month` in 2099 falling on `week_day`
/// (Sunday is `0`).
pub fn first_week_day_of(month: u32, week_day: u32) -> NaiveDate {
    let mut date = NaiveDate::from_ymd_opt(2099, month, 1).unwrap();
    while date.weekday().num_days_from_sunday() != week_day {
        date = date.succ_opt().unwrap();
    }
    date
}

pub fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
}

/// A service with every route of the real server.
macro_rules! init_service {
    ($app:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($app))
                .configure(ignitecall::server::configure_extractors)
                .configure(ignitecall::http::controllers::configure),
        )
        .await
    };
}
