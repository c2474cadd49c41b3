use actix_web::{web, HttpResponse};

use crate::{
  database::ErrorExt,
  http::{Actor, Error},
  schema::TimeInterval,
  types::form::users::time_intervals,
  App,
};

/// Replaces the weekly availability of the signed up user.
#[tracing::instrument(skip(app))]
pub async fn time_intervals(
  app: web::Data<App>,
  actor: Actor,
  form: web::Json<time_intervals::Request>,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user()?;
  let rows = form.to_rows()?;

  let mut tx = app.db_begin().await?;
  TimeInterval::replace_for_user(&mut tx, user.id, &rows).await?;
  tx.commit().await.into_db_error()?;

  tracing::info!(id = %user.id, intervals = rows.len(), "time intervals updated");
  Ok(HttpResponse::Created().finish())
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};
  use serde_json::{json, Value};

  use crate::test_utils::{init_service, lazy_app};

  #[actix_web::test]
  async fn test_requires_session_cookie() {
    let app = init_service!(lazy_app());

    let req = test::TestRequest::post()
      .uri("/api/users/time-intervals")
      .set_json(json!({
        "intervals": [{ "weekDay": 1, "startTime": "08:00", "endTime": "18:00" }]
      }))
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::UNAUTHORIZED, res.status());

    let body: Value = test::read_body_json(res).await;
    assert_eq!("unauthorized", body["type"]);
  }

  #[actix_web::test]
  async fn test_garbage_cookie_is_anonymous() {
    let app = init_service!(lazy_app());

    let req = test::TestRequest::post()
      .uri("/api/users/time-intervals")
      .cookie(actix_web::cookie::Cookie::new("@ignitecall:userId", "not-an-id"))
      .set_json(json!({ "intervals": [] }))
      .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(StatusCode::UNAUTHORIZED, res.status());
  }
}
