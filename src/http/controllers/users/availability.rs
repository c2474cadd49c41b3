use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::{
  calendar,
  http::Error,
  schema::{Scheduling, TimeInterval, User},
  types::{
    form::users::availability::{Query, Response},
    validation::normalize_username,
    Error as ErrorType,
  },
  App,
};

/// Hours of a single day and which of them are still free.
#[tracing::instrument(skip(app))]
pub async fn availability(
  app: web::Data<App>,
  path: web::Path<String>,
  query: web::Query<Query>,
) -> Result<HttpResponse, Error> {
  let Some(date) = query.date()? else {
    return Err(ErrorType::MissingDate.into());
  };

  let mut conn = app.db_read().await?;
  let Some(user) = User::by_username(&mut conn, &normalize_username(&path)).await? else {
    return Err(ErrorType::UserNotFound.into());
  };

  let now = Utc::now();
  if date < now.date_naive() {
    return Ok(HttpResponse::Ok().json(Response::default()));
  }

  let week_day = calendar::week_day(date);
  let intervals = TimeInterval::for_user_on(&mut conn, user.id, week_day).await?;
  let possible_times = calendar::possible_times(&intervals, week_day);
  if possible_times.is_empty() {
    return Ok(HttpResponse::Ok().json(Response::default()));
  }

  let (start, end) = calendar::day_bounds(date);
  let bookings = Scheduling::dates_between(&mut conn, user.id, start, end).await?;
  let available_times = calendar::available_times(&possible_times, date, &bookings, now);

  Ok(HttpResponse::Ok().json(Response {
    possible_times,
    available_times,
  }))
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};
  use serde_json::{json, Value};

  use crate::test_utils::{init_service, lazy_app};

  #[actix_web::test]
  async fn test_missing_date() {
    let app = init_service!(lazy_app());

    let req = test::TestRequest::get()
      .uri("/api/users/john-doe/availability")
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: Value = test::read_body_json(res).await;
    assert_eq!(json!({ "type": "missing_date", "message": "Date not provided." }), body);
  }

  #[actix_web::test]
  async fn test_malformed_date() {
    let app = init_service!(lazy_app());

    let req = test::TestRequest::get()
      .uri("/api/users/john-doe/availability?date=tomorrow")
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::BAD_REQUEST, res.status());
  }
}
