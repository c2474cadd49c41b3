use error_stack::{Report, ResultExt};
use sqlx::{
  migrate::Migrator,
  postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use std::{str::FromStr, time::Duration};

use crate::config;

pub mod error;
pub use error::{Error, ErrorExt, ReportExt, Result};

pub type Transaction<'a> = sqlx::Transaction<'a, sqlx::Postgres>;
pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;
pub type Connection = sqlx::PgConnection;

/// Schema of `users`, `user_time_intervals` and `schedulings`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct Pool {
  pool: sqlx::PgPool,
}

impl Pool {
  pub(crate) async fn new(
    global_cfg: &config::Database,
    pool_cfg: &config::DbPoolConfig,
  ) -> Result<Self> {
    let pool = Self::new_lazy(global_cfg, pool_cfg)?;
    match pool.wait_until_healthy().await {
      Ok(..) => {},
      Err(err) if err.is_unhealthy() => {
        tracing::warn!("database pool is unhealthy, retrying on demand");
      },
      Err(err) => return Err(err),
    }

    Ok(pool)
  }

  /// Builds the pool without opening any connection. The first
  /// query pays for connecting.
  pub fn new_lazy(global_cfg: &config::Database, pool_cfg: &config::DbPoolConfig) -> Result<Self> {
    let mut pool_opts = PgPoolOptions::new()
      .acquire_timeout(Duration::from_secs(global_cfg.timeout_secs.get()))
      .max_connections(pool_cfg.pool_size.get());

    if let Some(min_idle) = pool_cfg.min_idle {
      pool_opts = pool_opts.min_connections(min_idle.get());
    }

    let mut connect_opts =
      PgConnectOptions::from_str(pool_cfg.url.as_str()).change_context(Error::InvalidUrl)?;

    if global_cfg.enforce_tls {
      connect_opts = connect_opts.ssl_mode(PgSslMode::Prefer);
    }

    if pool_cfg.readonly {
      connect_opts = connect_opts.options([("default_transaction_read_only", "on")]);
    }

    Ok(Self {
      pool: pool_opts.connect_lazy_with(connect_opts),
    })
  }
}

impl std::fmt::Debug for Pool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.pool.fmt(f)
  }
}

impl Pool {
  #[inline(always)]
  pub fn connections(&self) -> u32 {
    self.pool.size()
  }

  #[inline(always)]
  pub fn is_healthy(&self) -> bool {
    self.connections() > 0
  }

  #[tracing::instrument(name = "db.transaction", skip(self))]
  pub async fn begin(&self) -> Result<Transaction<'static>> {
    match self.pool.begin().await {
      Ok(tx) => Ok(tx),
      Err(e) if !self.is_healthy() => Err(e).change_context(Error::UnhealthyPool),
      Err(e) => Err(e).into_db_error(),
    }
  }

  #[tracing::instrument(name = "db.connect", skip(self))]
  pub async fn get(&self) -> Result<PoolConnection> {
    if let Some(inner) = self.pool.try_acquire() {
      Ok(inner)
    } else {
      // an empty pool is not unhealthy yet, it may just have no
      // connections open; only a failed acquire tells
      match self.pool.acquire().await {
        Ok(conn) => Ok(conn),
        Err(e) if !self.is_healthy() => Err(e).change_context(Error::UnhealthyPool),
        Err(e) => Err(Report::new(Error::Internal(e))),
      }
    }
  }

  #[tracing::instrument(skip(self))]
  pub async fn wait_until_healthy(&self) -> Result<()> {
    match self.pool.acquire().await {
      Ok(..) => Ok(()),
      Err(e) if !self.is_healthy() => Err(e).change_context(Error::UnhealthyPool),
      Err(err) => Err(Report::new(Error::Internal(err))),
    }
  }

  #[tracing::instrument(name = "db.migrate", skip(self))]
  pub async fn migrate(&self) -> Result<()> {
    tracing::info!("Performing database migrations... (this may take a while)");
    let now = std::time::Instant::now();

    MIGRATOR.run(&self.pool).await.change_context(Error::Migration)?;

    let elapsed = now.elapsed();
    tracing::info!("Successfully performed database migrations! took {elapsed:.2?}");
    Ok(())
  }
}
