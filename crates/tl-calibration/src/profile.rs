//! Calibration profile: every constant a processing run needs.

use tl_core::constants::ZERO_CELSIUS_K;
use tl_core::{AdcCode, Channel, PressureUnit, Real};

use crate::error::{CalibrationError, CalibrationResult};

/// Thermistor in a voltage divider against a fixed resistor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermistorCal {
    /// Fixed divider resistor (ohm)
    pub r_fixed_ohm: Real,
    /// Thermistor resistance at `t_nominal_c` (ohm)
    pub r_nominal_ohm: Real,
    pub t_nominal_c: Real,
    /// Beta coefficient (K)
    pub beta: Real,
    pub adc_max: AdcCode,
}

/// Ratiometric pressure transducer with a specified output window.
///
/// `p_max` may be below `p_min`; the direction of the transfer function is a
/// property of the sensor, not an assumption of the converter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressureCal {
    /// ADC reference voltage (V)
    pub v_ref: Real,
    /// Sensor output at `p_min` (V)
    pub v_min: Real,
    /// Sensor output at `p_max` (V)
    pub v_max: Real,
    pub p_min: Real,
    pub p_max: Real,
    pub adc_max: AdcCode,
    /// Unit of `p_min` / `p_max` and of every converted reading
    pub unit: PressureUnit,
}

/// Linear power taps on the heater and pump supplies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerTapCal {
    /// Heater power at `adc_max` (W)
    pub heater_full_scale_w: Real,
    /// Pump power at `adc_max` (W)
    pub pump_full_scale_w: Real,
    pub adc_max: AdcCode,
}

/// Fixed heater supply, used when no heater tap reading is available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaterSupply {
    pub voltage_v: Real,
    pub current_a: Real,
}

/// Conduction through a plate instrumented top and bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatFluxGeometry {
    pub top: Channel,
    pub bottom: Channel,
    pub thickness_m: Real,
    /// Plate thermal conductivity (W/m·K)
    pub conductivity_w_per_m_k: Real,
}

/// Immutable calibration for one processing run.
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationProfile {
    pub thermistor: ThermistorCal,
    pub pressure: PressureCal,
    pub flow_rate_m3s: Real,
    pub fluid_cp_j_per_kg_k: Real,
    pub fluid_density_kg_per_m3: Real,
    pub electricity_rate_per_kwh: Real,
    pub power_taps: Option<PowerTapCal>,
    pub heater: Option<HeaterSupply>,
    pub heat_flux: Option<HeatFluxGeometry>,
}

impl CalibrationProfile {
    /// Check every constant once, up front.
    ///
    /// A profile that passes guarantees that no converter or formula divides
    /// by a zero calibration constant.
    pub fn validate(&self) -> CalibrationResult<()> {
        self.thermistor.validate()?;
        self.pressure.validate()?;

        non_negative("flow_rate_m3s", self.flow_rate_m3s)?;
        positive("fluid.cp_j_per_kg_k", self.fluid_cp_j_per_kg_k)?;
        positive("fluid.density_kg_per_m3", self.fluid_density_kg_per_m3)?;
        non_negative("electricity_rate_per_kwh", self.electricity_rate_per_kwh)?;

        if let Some(taps) = &self.power_taps {
            taps.validate()?;
        }
        if let Some(heater) = &self.heater {
            heater.validate()?;
        }
        if let Some(geometry) = &self.heat_flux {
            geometry.validate()?;
        }
        Ok(())
    }

    /// Fluid mass flow (kg/s) implied by the volumetric flow and density.
    pub fn mass_flow_kg_s(&self) -> Real {
        self.flow_rate_m3s * self.fluid_density_kg_per_m3
    }
}

impl ThermistorCal {
    pub fn validate(&self) -> CalibrationResult<()> {
        positive("thermistor.r_fixed_ohm", self.r_fixed_ohm)?;
        positive("thermistor.r_nominal_ohm", self.r_nominal_ohm)?;
        positive("thermistor.beta", self.beta)?;
        finite("thermistor.t_nominal_c", self.t_nominal_c)?;
        if self.t_nominal_c + ZERO_CELSIUS_K <= 0.0 {
            return Err(CalibrationError::InvalidParameter {
                what: "thermistor.t_nominal_c",
                value: self.t_nominal_c,
                reason: "must be above absolute zero",
            });
        }
        adc_max("thermistor.adc_max", self.adc_max)
    }
}

impl PressureCal {
    pub fn validate(&self) -> CalibrationResult<()> {
        positive("pressure.v_ref", self.v_ref)?;
        finite("pressure.v_min", self.v_min)?;
        finite("pressure.v_max", self.v_max)?;
        finite("pressure.p_min", self.p_min)?;
        finite("pressure.p_max", self.p_max)?;
        if self.v_max <= self.v_min {
            return Err(CalibrationError::InvalidParameter {
                what: "pressure.v_max",
                value: self.v_max,
                reason: "must be greater than v_min",
            });
        }
        adc_max("pressure.adc_max", self.adc_max)
    }
}

impl PowerTapCal {
    pub fn validate(&self) -> CalibrationResult<()> {
        non_negative("power_taps.heater_full_scale_w", self.heater_full_scale_w)?;
        non_negative("power_taps.pump_full_scale_w", self.pump_full_scale_w)?;
        adc_max("power_taps.adc_max", self.adc_max)
    }
}

impl HeaterSupply {
    pub fn validate(&self) -> CalibrationResult<()> {
        finite("heater.voltage_v", self.voltage_v)?;
        finite("heater.current_a", self.current_a)
    }
}

impl HeatFluxGeometry {
    pub fn validate(&self) -> CalibrationResult<()> {
        for (channel, what) in [(self.top, "heat_flux.top"), (self.bottom, "heat_flux.bottom")] {
            if !channel.is_thermistor() {
                return Err(CalibrationError::NotThermistor { channel, what });
            }
        }
        finite("heat_flux.thickness_m", self.thickness_m)?;
        if self.thickness_m == 0.0 {
            return Err(CalibrationError::InvalidParameter {
                what: "heat_flux.thickness_m",
                value: self.thickness_m,
                reason: "must be non-zero",
            });
        }
        finite("heat_flux.conductivity_w_per_m_k", self.conductivity_w_per_m_k)
    }
}

fn finite(what: &'static str, value: Real) -> CalibrationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalibrationError::InvalidParameter {
            what,
            value,
            reason: "must be finite",
        })
    }
}

fn positive(what: &'static str, value: Real) -> CalibrationResult<()> {
    finite(what, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalibrationError::InvalidParameter {
            what,
            value,
            reason: "must be positive",
        })
    }
}

fn non_negative(what: &'static str, value: Real) -> CalibrationResult<()> {
    finite(what, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(CalibrationError::InvalidParameter {
            what,
            value,
            reason: "must not be negative",
        })
    }
}

fn adc_max(what: &'static str, value: AdcCode) -> CalibrationResult<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(CalibrationError::InvalidParameter {
            what,
            value: value as Real,
            reason: "must be positive",
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn fixture_profile_is_valid() {
        profile().validate().unwrap();
    }

    #[test]
    fn mass_flow_from_volume_flow() {
        let p = profile();
        assert!((p.mass_flow_kg_s() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn rejects_zero_adc_max() {
        let mut p = profile();
        p.thermistor.adc_max = 0;
        let err = p.validate().unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::InvalidParameter {
                what: "thermistor.adc_max",
                ..
            }
        ));
    }

    #[test]
    fn rejects_inverted_voltage_window() {
        let mut p = profile();
        p.pressure.v_max = p.pressure.v_min;
        assert!(p.validate().is_err());
    }

    #[test]
    fn accepts_descending_pressure_span() {
        let mut p = profile();
        p.pressure.p_min = 100.0;
        p.pressure.p_max = 0.0;
        p.validate().unwrap();
    }

    #[test]
    fn rejects_zero_divider_resistor() {
        let mut p = profile();
        p.thermistor.r_fixed_ohm = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_zero_thickness() {
        let mut p = profile();
        p.heat_flux = Some(HeatFluxGeometry {
            top: Channel::T1,
            bottom: Channel::T2,
            thickness_m: 0.0,
            conductivity_w_per_m_k: 205.0,
        });
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("thickness"));
    }

    #[test]
    fn rejects_pressure_channel_in_geometry() {
        let mut p = profile();
        p.heat_flux = Some(HeatFluxGeometry {
            top: Channel::T1,
            bottom: Channel::PIn,
            thickness_m: 0.003,
            conductivity_w_per_m_k: 205.0,
        });
        assert_eq!(
            p.validate().unwrap_err(),
            CalibrationError::NotThermistor {
                channel: Channel::PIn,
                what: "heat_flux.bottom",
            }
        );
    }

    #[test]
    fn rejects_nan_rate() {
        let mut p = profile();
        p.electricity_rate_per_kwh = f64::NAN;
        assert!(p.validate().is_err());
    }
}
