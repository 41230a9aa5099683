//! Rig configuration validation.

use tl_calibration::CalibrationError;

use crate::schema::RigConfig;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing calibration parameters: {}", fields.join(", "))]
    MissingParameters { fields: Vec<String> },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid calibration: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Check a configuration can drive a processing run.
pub fn validate_config(config: &RigConfig) -> Result<(), ValidationError> {
    if config.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    if let Some(hf) = &config.heat_flux {
        if hf.top == hf.bottom {
            return Err(ValidationError::InvalidValue {
                field: "heat_flux.bottom".to_string(),
                value: hf.bottom.to_string(),
                reason: "must differ from heat_flux.top".to_string(),
            });
        }
    }

    config.to_profile().map(|_| ())
}
