use error_stack::{Result, ResultExt};
use moka::future::Cache;
use std::{sync::Arc, time::Duration};
use thiserror::Error;

use crate::{
    config,
    database::{self, ReportExt},
    types::PublicProfile,
};

/// Schedule pages are regenerated at most once a day.
pub const SCHEDULE_PAGE_TTL: Duration = Duration::from_secs(60 * 60 * 24);
const SCHEDULE_PAGE_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub primary_db: database::Pool,
    pub replica_db: Option<database::Pool>,
    /// Public profiles keyed by username.
    pub schedule_pages: Cache<String, PublicProfile>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    #[tracing::instrument(skip_all)]
    pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
        let primary_db = database::Pool::new(&cfg.db, &cfg.db.primary)
            .await
            .change_context(AppError)?;

        let replica_db = if let Some(replica) = cfg.db.replica.as_ref() {
            Some(
                database::Pool::new(&cfg.db, replica)
                    .await
                    .change_context(AppError)?,
            )
        } else {
            None
        };

        Ok(Self::with_pools(cfg, primary_db, replica_db))
    }

    /// Same as [`App::new`] but no connection is opened until a
    /// handler asks for one.
    pub fn new_lazy(cfg: config::Server) -> Result<Self, AppError> {
        let primary_db =
            database::Pool::new_lazy(&cfg.db, &cfg.db.primary).change_context(AppError)?;

        let replica_db = match cfg.db.replica.as_ref() {
            Some(replica) => {
                Some(database::Pool::new_lazy(&cfg.db, replica).change_context(AppError)?)
            }
            None => None,
        };

        Ok(Self::with_pools(cfg, primary_db, replica_db))
    }

    fn with_pools(
        cfg: config::Server,
        primary_db: database::Pool,
        replica_db: Option<database::Pool>,
    ) -> Self {
        let schedule_pages = Cache::builder()
            .max_capacity(SCHEDULE_PAGE_CAPACITY)
            .time_to_live(SCHEDULE_PAGE_TTL)
            .build();

        Self {
            config: Arc::new(cfg),
            primary_db,
            replica_db,
            schedule_pages,
        }
    }
}

impl App {
    #[tracing::instrument(skip_all)]
    pub async fn db_write(&self) -> Result<database::PoolConnection, database::Error> {
        self.primary_db.get().await
    }

    #[tracing::instrument(skip_all)]
    pub async fn db_begin(&self) -> Result<database::Transaction<'static>, database::Error> {
        self.primary_db.begin().await
    }

    /// Reads from the replica if there is one, falling back to the
    /// primary while the replica is unhealthy.
    #[tracing::instrument(skip_all)]
    pub async fn db_read(&self) -> Result<database::PoolConnection, database::Error> {
        if let Some(replica) = self.replica_db.as_ref() {
            match replica.get().await {
                Ok(conn) => return Ok(conn),
                // fallback
                Err(err) if err.is_unhealthy() => {
                    tracing::warn!("replica is unhealthy, reading from primary");
                }
                Err(err) => return Err(err),
            }
        }
        self.primary_db.get().await
    }

    /// Used where a stale replica read would let a conflicting
    /// write through.
    #[tracing::instrument(skip_all)]
    pub async fn db_read_prefer_primary(
        &self,
    ) -> Result<database::PoolConnection, database::Error> {
        match (self.primary_db.get().await, self.replica_db.as_ref()) {
            (Ok(conn), ..) => Ok(conn),
            (Err(e), Some(readonly_replica)) if e.is_unhealthy() => readonly_replica.get().await,
            (Err(e), ..) => Err(e),
        }
    }
}
