use thiserror::Error;

/// Error type shared by every sampler, validator and configuration loader
#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Invalid sampling strategy: {0}")]
    InvalidStrategy(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid estimator: {0}")]
    InvalidEstimator(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Sampler is not fitted: {0}")]
    NotFitted(String),

    #[error("Data mismatch: {0}")]
    DataMismatch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),

    #[error("YAML error")]
    Yaml(#[source] serde_yaml::Error),

    #[error("TOML error")]
    Toml(#[source] toml::de::Error),
}

/// Alias of [`Error`] named after the crate
pub type ImbrsError = Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl Error {
    /// Whether the error was raised while checking the input data, as opposed
    /// to the sampler configuration
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyData(_)
                | Error::LengthMismatch { .. }
                | Error::DimensionMismatch(_)
                | Error::InvalidTarget(_)
                | Error::DataMismatch(_)
        )
    }

    /// Whether the error comes from the sampler or neighbor configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidStrategy(_)
                | Error::InvalidParameter(_)
                | Error::InvalidEstimator(_)
                | Error::Config(_)
        )
    }
}
