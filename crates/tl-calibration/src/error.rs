//! Calibration errors.

use tl_core::Channel;
use thiserror::Error;

/// Result type for calibration operations.
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Configuration-level problems with a calibration profile.
///
/// These are fatal for a processing run and are reported before any row is
/// converted. Per-reading problems are never errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Constant is non-finite or outside its physical domain.
    #[error("Invalid calibration parameter {what} = {value} ({reason})")]
    InvalidParameter {
        what: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Heat flux geometry names a channel that is not a thermistor.
    #[error("Channel {channel} is not a thermistor channel ({what})")]
    NotThermistor { channel: Channel, what: &'static str },
}
