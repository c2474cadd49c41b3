use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
  database::ReportExt,
  http::{actor::user_id_cookie, Error},
  schema::User,
  types::{form::users::create, Error as ErrorType},
  App,
};

#[tracing::instrument(skip(app))]
pub async fn create(
  app: web::Data<App>,
  form: web::Json<create::Request>,
) -> Result<HttpResponse, Error> {
  form.validate()?;

  let username = form.normalized_username();
  let mut conn = app.db_write().await?;
  if User::username_exists(&mut conn, &username).await? {
    return Err(ErrorType::UsernameTaken.into());
  }

  let user = match User::insert(&mut conn, &username, form.fullname.trim()).await {
    Ok(user) => user,
    // someone else claimed it between the check and the insert
    Err(report) if report.is_unique_violation() => {
      return Err(Error::from_report(ErrorType::UsernameTaken, report));
    },
    Err(report) => return Err(report.into()),
  };

  tracing::info!(id = %user.id, "user registered");
  Ok(
    HttpResponse::Created()
      .cookie(user_id_cookie(user.id))
      .json(&user),
  )
}
