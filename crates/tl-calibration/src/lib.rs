//! tl-calibration: calibration constants and raw ADC code converters.
//!
//! A [`CalibrationProfile`] is loaded once, validated once, and then shared
//! read-only by every converter for the lifetime of a processing run.
//!
//! Converters never fail per reading: a railed, out-of-range or absent code
//! converts to `None`.

pub mod error;
pub mod power;
pub mod pressure;
pub mod profile;
pub mod thermistor;
pub mod traits;

pub use error::{CalibrationError, CalibrationResult};
pub use power::PowerTapConverter;
pub use pressure::PressureConverter;
pub use profile::{
    CalibrationProfile, HeatFluxGeometry, HeaterSupply, PowerTapCal, PressureCal, ThermistorCal,
};
pub use thermistor::TemperatureConverter;
pub use traits::AdcConverter;
