use serde::Deserialize;
use std::num::{NonZeroU32, NonZeroU64};
use validator::{extras::validate_url, Validate, ValidateError};

use crate::util::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Database {
    /// Writable primary database.
    pub primary: DbPoolConfig,
    /// A read-only replica used by the calendar queries. The
    /// primary serves reads when it is not configured.
    pub replica: Option<DbPoolConfig>,
    /// Prefer TLS for every database connection.
    ///
    /// **Environment variables**:
    /// - `IGNITECALL_DB_ENFORCE_TLS`
    #[serde(default = "Database::default_enforce_tls")]
    pub enforce_tls: bool,
    /// How long to wait for a connection before giving up.
    ///
    /// **Environment variables**:
    /// - `IGNITECALL_DB_TIMEOUT_SECS`
    #[serde(default = "Database::default_timeout_secs")]
    pub timeout_secs: NonZeroU64,
    /// Apply pending migrations on startup.
    ///
    /// **Environment variables**:
    /// - `IGNITECALL_DB_MIGRATE`
    #[serde(default = "Database::default_migrate")]
    pub migrate: bool,
}

impl Validate for Database {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        if let Err(error) = self.primary.validate() {
            fields.insert("primary", error);
        }
        if let Err(error) = self.replica.validate() {
            fields.insert("replica", error);
        }
        fields.build().into_result()
    }
}

impl Database {
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    // Required by serde
    const fn default_timeout_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TIMEOUT_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TIMEOUT_SECS is accidentally set to 0"),
        }
    }

    const fn default_enforce_tls() -> bool {
        true
    }

    const fn default_migrate() -> bool {
        true
    }
}

/// Configuration for connecting to any Postgres database
#[derive(Debug, Deserialize)]
pub struct DbPoolConfig {
    /// Every transaction of this pool starts read-only.
    ///
    /// **Environment variables**:
    /// - `IGNITECALL_DB_PRIMARY_READONLY`
    /// - `IGNITECALL_DB_REPLICA_READONLY`
    #[serde(default)]
    pub readonly: bool,
    /// **Environment variables**:
    /// - `IGNITECALL_DB_PRIMARY_MIN_IDLE`
    /// - `IGNITECALL_DB_REPLICA_MIN_IDLE`
    pub min_idle: Option<NonZeroU32>,
    /// **Environment variables**:
    /// - `IGNITECALL_DB_PRIMARY_POOL_SIZE`
    /// - `IGNITECALL_DB_REPLICA_POOL_SIZE`
    #[serde(default = "DbPoolConfig::default_pool_size")]
    pub pool_size: NonZeroU32,
    /// Connection URL connecting to the Postgres database.
    ///
    /// **Environment variables**:
    /// - `IGNITECALL_DB_PRIMARY_URL` or `DATABASE_URL`
    /// - `IGNITECALL_DB_REPLICA_URL`
    pub url: Sensitive<String>,
}

impl Validate for DbPoolConfig {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        if !validate_url(self.url.as_str()) {
            fields.insert_message("url", "Invalid Postgres connection URL");
        }
        if let Some(min_idle) = self.min_idle {
            if min_idle > self.pool_size {
                fields.insert_message("min_idle", "Minimum idle connections exceed pool size");
            }
        }
        fields.build().into_result()
    }
}

impl DbPoolConfig {
    const DEFAULT_POOL_SIZE: u32 = 5;

    const fn default_pool_size() -> NonZeroU32 {
        match NonZeroU32::new(Self::DEFAULT_POOL_SIZE) {
            Some(n) => n,
            None => panic!("DEFAULT_POOL_SIZE is accidentally set to 0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(url: &str) -> DbPoolConfig {
        DbPoolConfig {
            readonly: false,
            min_idle: None,
            pool_size: DbPoolConfig::default_pool_size(),
            url: url.to_string().into(),
        }
    }

    #[test]
    fn test_validate() {
        assert!(pool("postgres://localhost/ignitecall").validate().is_ok());

        let mut cfg = pool("localhost");
        cfg.min_idle = NonZeroU32::new(10);
        let error = cfg.validate().unwrap_err();
        let printed = format!("{error:?}");
        assert!(printed.contains("url"));
        assert!(printed.contains("min_idle"));

        let db = Database {
            primary: pool("postgres://localhost/ignitecall"),
            replica: Some(pool("nope")),
            enforce_tls: true,
            timeout_secs: Database::default_timeout_secs(),
            migrate: true,
        };
        assert_eq!(
            Some("Invalid Postgres connection URL"),
            db.validate().unwrap_err().first_message()
        );
    }
}
