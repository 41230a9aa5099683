//! Thermistor code to temperature.

use tl_core::constants::ZERO_CELSIUS_K;
use tl_core::{AdcCode, Real, finite};

use crate::profile::ThermistorCal;
use crate::traits::AdcConverter;

/// Inverts the divider response and applies the beta form of the
/// Steinhart-Hart equation.
///
/// ```text
/// R      = R_fixed / (adc_max / code - 1)
/// 1/T(K) = ln(R / R_nominal) / beta + 1 / (T_nominal + 273.15)
/// ```
///
/// A code of 0 or at/above `adc_max` means the divider is railed (open or
/// shorted sensor) and converts to `None`.
#[derive(Clone, Copy, Debug)]
pub struct TemperatureConverter {
    cal: ThermistorCal,
}

impl TemperatureConverter {
    pub fn new(cal: ThermistorCal) -> Self {
        Self { cal }
    }

    /// Divider resistance for a code, `None` when it is not a usable reading.
    pub fn resistance_ohm(&self, code: AdcCode) -> Option<Real> {
        if code <= 0 || code >= self.cal.adc_max {
            return None;
        }
        let ratio = self.cal.adc_max as Real / code as Real;
        let resistance = self.cal.r_fixed_ohm / (ratio - 1.0);
        // ln is undefined for a non-positive resistance
        if resistance > 0.0 { finite(resistance) } else { None }
    }

    pub fn celsius(&self, code: AdcCode) -> Option<Real> {
        let resistance = self.resistance_ohm(code)?;
        let inv_t = (resistance / self.cal.r_nominal_ohm).ln() / self.cal.beta
            + 1.0 / (self.cal.t_nominal_c + ZERO_CELSIUS_K);
        if inv_t <= 0.0 {
            return None;
        }
        finite(1.0 / inv_t - ZERO_CELSIUS_K)
    }
}

impl AdcConverter for TemperatureConverter {
    fn convert(&self, code: Option<AdcCode>) -> Option<Real> {
        code.and_then(|c| self.celsius(c))
    }
}
