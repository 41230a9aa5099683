//! Power tap code to watts.

use tl_core::{AdcCode, Real, finite};

use crate::profile::PowerTapCal;
use crate::traits::AdcConverter;

/// Linear `code / adc_max * full_scale` tap, one per supply.
#[derive(Clone, Copy, Debug)]
pub struct PowerTapConverter {
    full_scale_w: Real,
    adc_max: AdcCode,
}

impl PowerTapConverter {
    pub fn heater(cal: &PowerTapCal) -> Self {
        Self {
            full_scale_w: cal.heater_full_scale_w,
            adc_max: cal.adc_max,
        }
    }

    pub fn pump(cal: &PowerTapCal) -> Self {
        Self {
            full_scale_w: cal.pump_full_scale_w,
            adc_max: cal.adc_max,
        }
    }

    pub fn watts(&self, code: AdcCode) -> Option<Real> {
        if code < 0 || code > self.adc_max {
            return None;
        }
        finite(code as Real * self.full_scale_w / self.adc_max as Real)
    }
}

impl AdcConverter for PowerTapConverter {
    fn convert(&self, code: Option<AdcCode>) -> Option<Real> {
        code.and_then(|c| self.watts(c))
    }
}
