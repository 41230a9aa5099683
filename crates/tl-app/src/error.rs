//! Error types for the tl-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors behind one
/// interface for the front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calibration error: {0}")]
    Calibration(String),

    #[error("Failed to read log file: {path}")]
    LogRead { path: PathBuf, source: csv::Error },

    #[error("Failed to write output file: {path}")]
    LogWrite { path: PathBuf, source: csv::Error },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No data_*.csv log found in {}", dir.display())]
    LogNotFound { dir: PathBuf },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tl-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<tl_project::ProjectError> for AppError {
    fn from(err: tl_project::ProjectError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<tl_project::ValidationError> for AppError {
    fn from(err: tl_project::ValidationError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<tl_calibration::CalibrationError> for AppError {
    fn from(err: tl_calibration::CalibrationError) -> Self {
        AppError::Calibration(err.to_string())
    }
}
