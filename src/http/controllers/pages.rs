use actix_web::{
  http::header::{self, CacheControl, CacheDirective},
  web::{self, Form, Json},
  Either, HttpResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
  app::SCHEDULE_PAGE_TTL,
  http::Error,
  schema::User,
  types::{
    form::users::{claim, register},
    validation::normalize_username,
    Error as ErrorType, PublicProfile,
  },
  App,
};

/// Home page form. Sends the visitor to the registration page with
/// the username filled in.
#[tracing::instrument(skip_all)]
pub async fn claim_username(
  form: Either<Json<claim::Request>, Form<claim::Request>>,
) -> Result<HttpResponse, Error> {
  let form = match form {
    Either::Left(Json(form)) | Either::Right(Form(form)) => form,
  };
  form.validate()?;

  Ok(
    HttpResponse::SeeOther()
      .insert_header((header::LOCATION, form.register_location()))
      .finish(),
  )
}

#[tracing::instrument(skip_all)]
pub async fn register(query: web::Query<register::Query>) -> HttpResponse {
  HttpResponse::Ok().json(query.prefill())
}

/// Public booking page of a user. Profiles are kept for a day, the
/// same as the `Cache-Control` given to browsers.
#[tracing::instrument(skip(app))]
pub async fn schedule(app: web::Data<App>, path: web::Path<String>) -> Result<HttpResponse, Error> {
  let username = normalize_username(&path);
  let profile = if let Some(profile) = app.schedule_pages.get(&username).await {
    profile
  } else {
    let mut conn = app.db_read().await?;
    let Some(user) = User::by_username(&mut conn, &username).await? else {
      return Err(ErrorType::NotFound.into());
    };
    drop(conn);

    let profile = PublicProfile::from(user);
    app.schedule_pages.insert(username, profile.clone()).await;
    profile
  };

  Ok(
    HttpResponse::Ok()
      .insert_header(CacheControl(vec![
        CacheDirective::Public,
        CacheDirective::MaxAge(u32::try_from(SCHEDULE_PAGE_TTL.as_secs()).unwrap_or(u32::MAX)),
      ]))
      .json(json!({ "user": profile })),
  )
}
