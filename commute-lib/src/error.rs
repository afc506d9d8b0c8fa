use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommuteError {
    #[error("Cannot read workbook '{name}': {message}")]
    SourceUnreadable { name: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CommuteError>;

/// Business-rule outcome attached to a result. Never raised as an error.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFinding {
    #[error(
        "Commuting rows cover {commuting} of {total} rows; at least {threshold} are required"
    )]
    InsufficientCoverage {
        commuting: usize,
        total: usize,
        threshold: usize,
    },

    #[error(
        "Route {route}, row {row_number}: {attribute} differs from the first trip of the route (row {first_row})"
    )]
    InconsistentRoute {
        route: usize,
        row_number: usize,
        first_row: usize,
        attribute: String,
    },

    #[error("Row {row_number}: amount {amount} is outside {min}..={max}")]
    AmountOutOfRange {
        row_number: usize,
        amount: f64,
        min: f64,
        max: f64,
    },
}
