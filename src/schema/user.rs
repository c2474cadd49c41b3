use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{marker::UserMarker, Id},
};

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct User {
  pub id: Id<UserMarker>,
  pub created_at: NaiveDateTime,
  pub username: String,
  pub fullname: String,
  pub bio: Option<String>,
  pub avatar_url: Option<String>,
}

impl User {
  #[tracing::instrument(skip(conn))]
  pub async fn by_id(conn: &mut Connection, id: Id<UserMarker>) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE id = $1"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn by_username(conn: &mut Connection, username: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE username = $1"#)
      .bind(username)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn username_exists(conn: &mut Connection, username: &str) -> Result<bool> {
    sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM "users" WHERE username = $1)"#)
      .bind(username)
      .fetch_one(conn)
      .await
      .into_db_error()
  }

  /// Fails with [`UniqueViolation`] if the username got claimed
  /// in the meantime.
  ///
  /// [`UniqueViolation`]: crate::database::Error::UniqueViolation
  #[tracing::instrument(skip(conn))]
  pub async fn insert(conn: &mut Connection, username: &str, fullname: &str) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "users" (username, fullname)
         VALUES ($1, $2)
         RETURNING *"#,
    )
    .bind(username)
    .bind(fullname)
    .fetch_one(conn)
    .await
    .into_db_error()
  }
}
