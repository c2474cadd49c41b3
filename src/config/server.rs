use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use std::{
    net::{IpAddr, Ipv4Addr},
    num::NonZeroUsize,
};
use validator::{Validate, ValidateError};

use super::ParseError;
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

#[derive(Debug, Deserialize)]
pub struct Server {
    pub db: super::Database,
    /// **Environment variable**: `IGNITECALL_IP`
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    /// **Environment variable**: `IGNITECALL_PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Amount of HTTP workers. Defaults to the number of
    /// physical CPU cores.
    ///
    /// **Environment variable**: `IGNITECALL_WORKERS`
    pub workers: Option<NonZeroUsize>,
    #[serde(default)]
    pub logging: super::Logging,
}

impl Validate for Server {
    fn validate(&self) -> std::result::Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        if let Err(error) = self.db.validate() {
            fields.insert("db", error);
        }
        if self.port == 0 {
            fields.insert_message("port", "Port must not be 0");
        }
        fields.build().into_result()
    }
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config
            .validate()
            .into_validator_report()
            .change_context(ParseError)?;

        Ok(config)
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "ignitecall.toml";
    const DEFAULT_PORT: u16 = 3333;

    const fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    }

    const fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }

    /// Layers `ignitecall.toml`, `IGNITECALL_` variables and the
    /// `DATABASE_URL` alias, in that order.
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            // keys with underscores in them cannot go through the
            // generic `_` to `.` replacement
            .merge(Env::prefixed("IGNITECALL_").map(|v| match v.as_str() {
                "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
                "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),

                "DB_REPLICA_MIN_IDLE" => "db.replica.min_idle".into(),
                "DB_REPLICA_POOL_SIZE" => "db.replica.pool_size".into(),

                "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
                "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

                _ => v.as_str().replace('_', ".").into(),
            }))
            // Environment variable aliases
            .merge(Env::raw().only(&["DATABASE_URL"]).map(|v| match v.as_str() {
                "DATABASE_URL" => "db.primary.url".into(),
                _ => v.into(),
            }))
    }
}
