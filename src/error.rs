use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("duration must be > 0 seconds")]
    InvalidDuration,
    #[error("requests per second must be a finite number >= 0 (got {0})")]
    InvalidRequestRate(f64),
    #[error("no retained series for simulation '{0}'")]
    SeriesNotFound(String),
    #[error("invalid component entry '{0}': expected name:type")]
    InvalidComponentEntry(String),
    #[error("invalid connection entry '{0}': expected source:target")]
    InvalidConnectionEntry(String),
    #[error("connection '{0}' references unknown component '{1}'")]
    UnknownEndpoint(String, String),
    #[error("duplicate component id '{0}'")]
    DuplicateComponentId(String),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("failed to serialize result: {0}")]
    Output(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
