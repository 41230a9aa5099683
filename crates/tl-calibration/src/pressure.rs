//! Pressure transducer code to pressure.

use tl_core::{AdcCode, PressureUnit, Real, finite};

use crate::profile::PressureCal;
use crate::traits::AdcConverter;

/// Clamped linear map from transducer output voltage to pressure.
///
/// Outside `[v_min, v_max]` the sensor is outside its specified window and the
/// nearest endpoint pressure is reported rather than an extrapolation. Codes
/// outside `[0, adc_max]` are not readings at all and convert to `None`.
#[derive(Clone, Copy, Debug)]
pub struct PressureConverter {
    cal: PressureCal,
}

impl PressureConverter {
    pub fn new(cal: PressureCal) -> Self {
        Self { cal }
    }

    pub fn unit(&self) -> PressureUnit {
        self.cal.unit
    }

    /// Transducer output voltage for a code, `None` outside `[0, adc_max]`.
    pub fn voltage(&self, code: AdcCode) -> Option<Real> {
        if code < 0 || code > self.cal.adc_max {
            return None;
        }
        // Multiply first so codes landing exactly on a window edge stay exact.
        Some(code as Real * self.cal.v_ref / self.cal.adc_max as Real)
    }

    pub fn pressure(&self, code: AdcCode) -> Option<Real> {
        let voltage = self.voltage(code)?;
        let cal = &self.cal;
        if voltage <= cal.v_min {
            return Some(cal.p_min);
        }
        if voltage >= cal.v_max {
            return Some(cal.p_max);
        }
        let span = cal.v_max - cal.v_min;
        finite(cal.p_min + (voltage - cal.v_min) / span * (cal.p_max - cal.p_min))
    }
}

impl AdcConverter for PressureConverter {
    fn convert(&self, code: Option<AdcCode>) -> Option<Real> {
        code.and_then(|c| self.pressure(c))
    }
}
