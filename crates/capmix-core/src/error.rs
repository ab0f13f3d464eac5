use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapmixError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("neighbor radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("site set is empty")]
    EmptySiteSet,

    #[error("cap pool too small: {required} sites but only {available} caps")]
    PoolTooSmall { required: usize, available: usize },

    #[error("swapping requires at least 2 sites, got {0}")]
    TooFewSites(usize),

    #[error("initial temperature must be positive, got {0}")]
    InvalidTemperature(f64),

    #[error("cooling rate must be in (0, 1), got {0}")]
    InvalidCoolingRate(f64),

    #[error("optimizer is stopped and accepts no further steps")]
    Stopped,

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type CapResult<T> = Result<T, CapmixError>;
