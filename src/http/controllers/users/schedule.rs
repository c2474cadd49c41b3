use actix_web::{web, HttpResponse};
use chrono::Utc;
use validator::Validate;

use crate::{
  calendar,
  database::ReportExt,
  http::Error,
  schema::{NewScheduling, Scheduling, TimeInterval, User},
  types::{form::users::schedule, validation::normalize_username, Error as ErrorType},
  App,
};

/// Books one slot with a user. The date is moved to the start of
/// its hour, which must be one of the user's possible times.
#[tracing::instrument(skip(app))]
pub async fn schedule(
  app: web::Data<App>,
  path: web::Path<String>,
  form: web::Json<schedule::Request>,
) -> Result<HttpResponse, Error> {
  form.validate()?;

  let mut conn = app.db_write().await?;
  let Some(user) = User::by_username(&mut conn, &normalize_username(&path)).await? else {
    return Err(ErrorType::UserNotFound.into());
  };

  let date = calendar::start_of_hour(form.date);
  if date < Utc::now() {
    return Err(ErrorType::DateInPast.into());
  }

  let week_day = calendar::week_day(date.date_naive());
  let intervals = TimeInterval::for_user_on(&mut conn, user.id, week_day).await?;
  if !calendar::is_bookable(&intervals, date) {
    return Err(ErrorType::TimeUnavailable.into());
  }

  if Scheduling::exists_at(&mut conn, user.id, date).await? {
    return Err(ErrorType::SlotTaken.into());
  }

  let new = NewScheduling {
    user_id: user.id,
    date,
    name: form.name.trim(),
    email: form.email.as_str(),
    observations: form.observations.as_deref().filter(|o| !o.trim().is_empty()),
  };

  let scheduling = match Scheduling::insert(&mut conn, &new).await {
    Ok(scheduling) => scheduling,
    Err(report) if report.is_unique_violation() => {
      return Err(Error::from_report(ErrorType::SlotTaken, report));
    },
    Err(report) => return Err(report.into()),
  };

  tracing::info!(id = %scheduling.id, user.id = %user.id, "scheduling created");
  Ok(HttpResponse::Created().finish())
}
