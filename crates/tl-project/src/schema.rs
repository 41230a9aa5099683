//! Rig configuration schema definitions.
//!
//! Physical constants are `Option` on purpose: an absent constant has to be
//! reported as missing, never filled in with a plausible default.

use serde::{Deserialize, Serialize};
use tl_core::{AdcCode, Channel, PressureUnit};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RigConfig {
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub calibration: CalibrationDef,
    #[serde(default)]
    pub fluid: FluidDef,
    pub flow_rate_m3s: Option<f64>,
    pub electricity_rate_per_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heater: Option<HeaterDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_flux: Option<HeatFluxDef>,
}

/// Sensor calibration.
///
/// `adc_max` here is shared by every section that does not set its own.
/// ```yaml
/// calibration:
///   adc_max: 1023
///   thermistor: { r_fixed_ohm: 51000, r_nominal_ohm: 100000, t_nominal_c: 25, beta: 3950 }
///   pressure: { v_ref: 3.3, v_min: 0.33, v_max: 2.97, p_min: 0, p_max: 100, unit: psi }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CalibrationDef {
    pub adc_max: Option<AdcCode>,
    #[serde(default)]
    pub thermistor: ThermistorDef,
    #[serde(default)]
    pub pressure: PressureDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_taps: Option<PowerTapDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ThermistorDef {
    pub r_fixed_ohm: Option<f64>,
    pub r_nominal_ohm: Option<f64>,
    pub t_nominal_c: Option<f64>,
    pub beta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adc_max: Option<AdcCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PressureDef {
    pub v_ref: Option<f64>,
    pub v_min: Option<f64>,
    pub v_max: Option<f64>,
    pub p_min: Option<f64>,
    pub p_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adc_max: Option<AdcCode>,
    #[serde(default)]
    pub unit: PressureUnit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PowerTapDef {
    pub heater_full_scale_w: Option<f64>,
    pub pump_full_scale_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adc_max: Option<AdcCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FluidDef {
    pub cp_j_per_kg_k: Option<f64>,
    pub density_kg_per_m3: Option<f64>,
}

/// Fixed heater supply, for rigs without a heater power tap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HeaterDef {
    pub voltage_v: Option<f64>,
    pub current_a: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatFluxDef {
    pub top: Channel,
    pub bottom: Channel,
    pub thickness_m: Option<f64>,
    pub conductivity_w_per_m_k: Option<f64>,
}
