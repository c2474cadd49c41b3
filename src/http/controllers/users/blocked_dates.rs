use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
  calendar,
  http::Error,
  schema::{Scheduling, TimeInterval, User},
  types::{
    form::users::blocked_dates::{Query, Response, MISSING_YEAR_OR_MONTH},
    validation::normalize_username,
    Error as ErrorType,
  },
  App,
};

/// Week days and days of a month in which nothing can be booked.
#[tracing::instrument(skip(app))]
pub async fn blocked_dates(
  app: web::Data<App>,
  path: web::Path<String>,
  query: web::Query<Query>,
) -> Result<HttpResponse, Error> {
  let Some(month) = query.month()? else {
    return Ok(HttpResponse::Ok().json(json!({ "message": MISSING_YEAR_OR_MONTH })));
  };

  let mut conn = app.db_read().await?;
  let Some(user) = User::by_username(&mut conn, &normalize_username(&path)).await? else {
    return Err(ErrorType::UserNotFound.into());
  };

  let intervals = TimeInterval::for_user(&mut conn, user.id).await?;
  let bookings = Scheduling::dates_between(&mut conn, user.id, month.start(), month.end()).await?;

  Ok(HttpResponse::Ok().json(Response {
    blocked_week_days: calendar::blocked_week_days(&intervals),
    blocked_days: calendar::blocked_days(&intervals, &bookings),
  }))
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};
  use serde_json::{json, Value};

  use crate::test_utils::{init_service, lazy_app};

  #[actix_web::test]
  async fn test_missing_year_or_month() {
    let app = init_service!(lazy_app());

    for uri in [
      "/api/users/john-doe/blocked-dates",
      "/api/users/john-doe/blocked-dates?year=2024",
      "/api/users/john-doe/blocked-dates?month=6",
      "/api/users/john-doe/blocked-dates?year=&month=6",
    ] {
      let req = test::TestRequest::get().uri(uri).to_request();
      let res = test::call_service(&app, req).await;
      assert_eq!(StatusCode::OK, res.status(), "{uri}");

      let body: Value = test::read_body_json(res).await;
      assert_eq!(json!({ "message": "Year or month not specified." }), body);
    }
  }

  #[actix_web::test]
  async fn test_malformed_month() {
    let app = init_service!(lazy_app());

    let req = test::TestRequest::get()
      .uri("/api/users/john-doe/blocked-dates?year=2024&month=13")
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: Value = test::read_body_json(res).await;
    assert_eq!("Month must be between 1 and 12", body["message"]);
  }

  #[actix_web::test]
  async fn test_year_out_of_range() {
    let app = init_service!(lazy_app());

    let req = test::TestRequest::get()
      .uri("/api/users/john-doe/blocked-dates?year=-5000&month=1")
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: Value = test::read_body_json(res).await;
    assert_eq!("invalid_form_body", body["type"]);
    assert_eq!("Year is out of range", body["message"]);
  }
}
