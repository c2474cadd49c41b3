use chrono::{DateTime, NaiveDateTime, Utc};
use futures::TryStreamExt;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{SchedulingMarker, UserMarker},
    Id,
  },
};

/// A booked appointment.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Scheduling {
  pub id: Id<SchedulingMarker>,
  pub created_at: NaiveDateTime,
  pub user_id: Id<UserMarker>,
  pub date: DateTime<Utc>,
  pub name: String,
  pub email: String,
  pub observations: Option<String>,
}

#[derive(Debug)]
pub struct NewScheduling<'a> {
  pub user_id: Id<UserMarker>,
  pub date: DateTime<Utc>,
  pub name: &'a str,
  pub email: &'a str,
  pub observations: Option<&'a str>,
}

impl Scheduling {
  /// Dates of every booking of the user within `[start, end)`.
  #[tracing::instrument(skip(conn))]
  pub async fn dates_between(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> Result<Vec<DateTime<Utc>>> {
    let mut dates = Vec::new();
    let mut stream = sqlx::query_scalar::<_, DateTime<Utc>>(
      r#"SELECT date FROM "schedulings"
         WHERE user_id = $1 AND date >= $2 AND date < $3
         ORDER BY date"#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch(conn);

    while let Some(date) = stream.try_next().await.into_db_error()? {
      dates.push(date);
    }

    Ok(dates)
  }

  #[tracing::instrument(skip(conn))]
  pub async fn exists_at(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    date: DateTime<Utc>,
  ) -> Result<bool> {
    sqlx::query_scalar::<_, bool>(
      r#"SELECT EXISTS(SELECT 1 FROM "schedulings" WHERE user_id = $1 AND date = $2)"#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip_all, fields(user.id = %new.user_id, date = %new.date))]
  pub async fn insert(conn: &mut Connection, new: &NewScheduling<'_>) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "schedulings" (user_id, date, name, email, observations)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *"#,
    )
    .bind(new.user_id)
    .bind(new.date)
    .bind(new.name)
    .bind(new.email)
    .bind(new.observations)
    .fetch_one(conn)
    .await
    .into_db_error()
  }
}
