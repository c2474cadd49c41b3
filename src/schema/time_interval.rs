use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{TimeIntervalMarker, UserMarker},
    Id,
  },
};

/// A recurring weekly window in which a user can be booked.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct TimeInterval {
  pub id: Id<TimeIntervalMarker>,
  pub user_id: Id<UserMarker>,
  /// Sunday is `0`
  pub week_day: i16,
  pub time_start_in_minutes: i32,
  pub time_end_in_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeInterval {
  pub week_day: i16,
  pub time_start_in_minutes: i32,
  pub time_end_in_minutes: i32,
}

impl TimeInterval {
  #[must_use]
  pub fn duration_in_minutes(&self) -> i32 {
    self.time_end_in_minutes - self.time_start_in_minutes
  }

  #[tracing::instrument(skip(conn))]
  pub async fn for_user(conn: &mut Connection, user_id: Id<UserMarker>) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT * FROM "user_time_intervals"
         WHERE user_id = $1
         ORDER BY week_day, time_start_in_minutes"#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn for_user_on(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    week_day: i16,
  ) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT * FROM "user_time_intervals"
         WHERE user_id = $1 AND week_day = $2
         ORDER BY time_start_in_minutes"#,
    )
    .bind(user_id)
    .bind(week_day)
    .fetch_all(conn)
    .await
    .into_db_error()
  }

  /// Replaces every interval of the user. Run it inside a
  /// transaction so readers never see an empty week.
  #[tracing::instrument(skip(conn, intervals), fields(intervals = intervals.len()))]
  pub async fn replace_for_user(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    intervals: &[NewTimeInterval],
  ) -> Result<()> {
    sqlx::query(r#"DELETE FROM "user_time_intervals" WHERE user_id = $1"#)
      .bind(user_id)
      .execute(&mut *conn)
      .await
      .into_db_error()?;

    if intervals.is_empty() {
      return Ok(());
    }

    let mut query = sqlx::QueryBuilder::new(
      r#"INSERT INTO "user_time_intervals"
         (user_id, week_day, time_start_in_minutes, time_end_in_minutes) "#,
    );
    query.push_values(intervals, |mut row, interval| {
      row
        .push_bind(user_id)
        .push_bind(interval.week_day)
        .push_bind(interval.time_start_in_minutes)
        .push_bind(interval.time_end_in_minutes);
    });

    query.build().execute(conn).await.into_db_error()?;
    Ok(())
  }
}
