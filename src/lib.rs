use std::path::PathBuf;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::domain::calendar::ReferenceTimezone;

pub mod domain;

#[derive(Clone, Debug, Deserialize)]
pub struct OrgzaarConfig {
    pub server: Server,
    pub logger: Logger,
    pub calendar: Calendar,
}

impl OrgzaarConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.debug", false)?
            .set_default("logger.level", "INFO")?
            .set_default("calendar.timezone", "local")?
            .add_source(config::File::with_name("orgzaar").required(false))
            .add_source(
                config::Environment::with_prefix("ORGZAAR")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<OrgzaarConfig>()
    }

    /// 実際に使うログレベル。debugモードではDEBUGに引き上げる
    pub fn log_level(&self) -> tracing::Level {
        if self.server.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::from(&self.logger.level)
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub tls: Option<Tls>,
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Tls {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Calendar {
    pub timezone: ReferenceTimezone,
}

#[derive(Clone, Debug, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}
