//! Rig configuration to calibration profile.

use tl_calibration::{
    CalibrationProfile, HeatFluxGeometry, HeaterSupply, PowerTapCal, PressureCal, ThermistorCal,
};
use tl_core::AdcCode;

use crate::schema::RigConfig;
use crate::validate::ValidationError;

/// Records every required field that is absent, so they can all be reported
/// in one error.
#[derive(Default)]
struct Required {
    missing: Vec<String>,
}

impl Required {
    /// Placeholder for an absent value; never read once `finish` has failed.
    fn real(&mut self, field: &str, value: Option<f64>) -> f64 {
        value.unwrap_or_else(|| {
            self.missing.push(field.to_string());
            f64::NAN
        })
    }

    fn adc_max(&mut self, field: &str, own: Option<AdcCode>, shared: Option<AdcCode>) -> AdcCode {
        own.or(shared).unwrap_or_else(|| {
            self.missing.push(field.to_string());
            0
        })
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingParameters {
                fields: self.missing,
            })
        }
    }
}

impl RigConfig {
    /// Build the immutable profile a processing run uses.
    ///
    /// Fails on any missing constant first, then on any constant outside its
    /// physical domain.
    pub fn to_profile(&self) -> Result<CalibrationProfile, ValidationError> {
        let mut req = Required::default();
        let cal = &self.calibration;
        let shared_adc = cal.adc_max;

        let th = &cal.thermistor;
        let thermistor = ThermistorCal {
            r_fixed_ohm: req.real("calibration.thermistor.r_fixed_ohm", th.r_fixed_ohm),
            r_nominal_ohm: req.real("calibration.thermistor.r_nominal_ohm", th.r_nominal_ohm),
            t_nominal_c: req.real("calibration.thermistor.t_nominal_c", th.t_nominal_c),
            beta: req.real("calibration.thermistor.beta", th.beta),
            adc_max: req.adc_max("calibration.thermistor.adc_max", th.adc_max, shared_adc),
        };

        let pr = &cal.pressure;
        let pressure = PressureCal {
            v_ref: req.real("calibration.pressure.v_ref", pr.v_ref),
            v_min: req.real("calibration.pressure.v_min", pr.v_min),
            v_max: req.real("calibration.pressure.v_max", pr.v_max),
            p_min: req.real("calibration.pressure.p_min", pr.p_min),
            p_max: req.real("calibration.pressure.p_max", pr.p_max),
            adc_max: req.adc_max("calibration.pressure.adc_max", pr.adc_max, shared_adc),
            unit: pr.unit,
        };

        let power_taps = cal.power_taps.as_ref().map(|taps| PowerTapCal {
            heater_full_scale_w: req.real(
                "calibration.power_taps.heater_full_scale_w",
                taps.heater_full_scale_w,
            ),
            pump_full_scale_w: req.real(
                "calibration.power_taps.pump_full_scale_w",
                taps.pump_full_scale_w,
            ),
            adc_max: req.adc_max("calibration.power_taps.adc_max", taps.adc_max, shared_adc),
        });

        let heater = self.heater.as_ref().map(|h| HeaterSupply {
            voltage_v: req.real("heater.voltage_v", h.voltage_v),
            current_a: req.real("heater.current_a", h.current_a),
        });

        let heat_flux = self.heat_flux.as_ref().map(|hf| HeatFluxGeometry {
            top: hf.top,
            bottom: hf.bottom,
            thickness_m: req.real("heat_flux.thickness_m", hf.thickness_m),
            conductivity_w_per_m_k: req.real(
                "heat_flux.conductivity_w_per_m_k",
                hf.conductivity_w_per_m_k,
            ),
        });

        let profile = CalibrationProfile {
            thermistor,
            pressure,
            flow_rate_m3s: req.real("flow_rate_m3s", self.flow_rate_m3s),
            fluid_cp_j_per_kg_k: req.real("fluid.cp_j_per_kg_k", self.fluid.cp_j_per_kg_k),
            fluid_density_kg_per_m3: req.real(
                "fluid.density_kg_per_m3",
                self.fluid.density_kg_per_m3,
            ),
            electricity_rate_per_kwh: req.real(
                "electricity_rate_per_kwh",
                self.electricity_rate_per_kwh,
            ),
            power_taps,
            heater,
            heat_flux,
        };

        req.finish()?;
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use tl_core::{Channel, PressureUnit};

    fn complete() -> RigConfig {
        RigConfig {
            version: crate::LATEST_VERSION,
            name: "bench".to_string(),
            calibration: CalibrationDef {
                adc_max: Some(1023),
                thermistor: ThermistorDef {
                    r_fixed_ohm: Some(51_000.0),
                    r_nominal_ohm: Some(100_000.0),
                    t_nominal_c: Some(25.0),
                    beta: Some(3950.0),
                    adc_max: None,
                },
                pressure: PressureDef {
                    v_ref: Some(3.3),
                    v_min: Some(0.33),
                    v_max: Some(2.97),
                    p_min: Some(0.0),
                    p_max: Some(100.0),
                    adc_max: Some(4095),
                    unit: PressureUnit::Psi,
                },
                power_taps: None,
            },
            fluid: FluidDef {
                cp_j_per_kg_k: Some(1090.0),
                density_kg_per_m3: Some(1990.0),
            },
            flow_rate_m3s: Some(1.0e-4),
            electricity_rate_per_kwh: Some(0.15),
            heater: None,
            heat_flux: None,
        }
    }

    #[test]
    fn complete_config_builds_profile() {
        let profile = complete().to_profile().unwrap();
        assert_eq!(profile.thermistor.adc_max, 1023);
        assert_eq!(profile.pressure.adc_max, 4095);
        assert_eq!(profile.flow_rate_m3s, 1.0e-4);
        assert!(profile.power_taps.is_none());
    }

    #[test]
    fn reports_every_missing_constant() {
        let mut config = complete();
        config.calibration.thermistor.beta = None;
        config.fluid.cp_j_per_kg_k = None;
        config.electricity_rate_per_kwh = None;
        match config.to_profile() {
            Err(ValidationError::MissingParameters { fields }) => {
                assert_eq!(
                    fields,
                    vec![
                        "calibration.thermistor.beta".to_string(),
                        "fluid.cp_j_per_kg_k".to_string(),
                        "electricity_rate_per_kwh".to_string(),
                    ]
                );
            }
            other => panic!("expected missing parameters, got {other:?}"),
        }
    }

    #[test]
    fn adc_max_needs_shared_or_own_value() {
        let mut config = complete();
        config.calibration.adc_max = None;
        let err = config.to_profile().unwrap_err();
        assert!(err.to_string().contains("calibration.thermistor.adc_max"));
        assert!(!err.to_string().contains("calibration.pressure.adc_max"));
    }

    #[test]
    fn optional_sections_require_their_fields() {
        let mut config = complete();
        config.heater = Some(HeaterDef {
            voltage_v: Some(24.0),
            current_a: None,
        });
        config.heat_flux = Some(HeatFluxDef {
            top: Channel::T1,
            bottom: Channel::T3,
            thickness_m: Some(0.003),
            conductivity_w_per_m_k: None,
        });
        let err = config.to_profile().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("heater.current_a"));
        assert!(msg.contains("heat_flux.conductivity_w_per_m_k"));
    }

    #[test]
    fn invalid_constant_is_a_calibration_error() {
        let mut config = complete();
        config.calibration.pressure.v_max = Some(0.1);
        assert!(matches!(
            config.to_profile(),
            Err(ValidationError::Calibration(_))
        ));
    }
}
