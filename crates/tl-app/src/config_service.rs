//! Rig configuration loading and introspection.

use std::path::Path;

use tl_calibration::CalibrationProfile;
use tl_core::{AdcCode, PressureUnit};
use tl_project::RigConfig;

use crate::error::AppResult;

/// What a rig file configures, for display.
#[derive(Debug, Clone)]
pub struct ConfigSummary {
    pub name: String,
    pub version: u32,
    pub thermistor_adc_max: AdcCode,
    pub pressure_adc_max: AdcCode,
    pub pressure_unit: PressureUnit,
    pub mass_flow_kg_s: f64,
    pub power_taps: bool,
    pub heater_supply: bool,
    pub heat_flux: bool,
}

/// Load, migrate and validate a rig file (YAML or JSON by extension).
pub fn load_config(path: &Path) -> AppResult<RigConfig> {
    let config = tl_project::load(path)?;
    tracing::debug!(path = %path.display(), name = %config.name, "loaded rig configuration");
    Ok(config)
}

/// Load a rig file and build its calibration profile.
///
/// Every configuration problem surfaces here, before any log is read.
pub fn load_profile(path: &Path) -> AppResult<(RigConfig, CalibrationProfile)> {
    let config = load_config(path)?;
    let profile = config.to_profile()?;
    Ok((config, profile))
}

pub fn summarize_config(config: &RigConfig, profile: &CalibrationProfile) -> ConfigSummary {
    ConfigSummary {
        name: config.name.clone(),
        version: config.version,
        thermistor_adc_max: profile.thermistor.adc_max,
        pressure_adc_max: profile.pressure.adc_max,
        pressure_unit: profile.pressure.unit,
        mass_flow_kg_s: profile.mass_flow_kg_s(),
        power_taps: profile.power_taps.is_some(),
        heater_supply: profile.heater.is_some(),
        heat_flux: profile.heat_flux.is_some(),
    }
}
