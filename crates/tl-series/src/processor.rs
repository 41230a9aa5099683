//! Sample to derived-record processing.

use rayon::prelude::*;
use tl_calibration::{
    AdcConverter, CalibrationProfile, CalibrationResult, PowerTapConverter, PressureConverter,
    TemperatureConverter,
};
use tl_core::{Channel, Real};
use tl_metrics as metrics;

use crate::record::{DerivedRecord, Metric};
use crate::sample::Sample;

/// Applies one validated calibration profile to any number of samples.
///
/// The processor holds no per-row state. Records can be produced in any order
/// and reassembled by index; `process`, `process_par` and `iter` agree
/// element for element.
#[derive(Clone, Debug)]
pub struct TimeSeriesProcessor {
    profile: CalibrationProfile,
    temperature: TemperatureConverter,
    pressure: PressureConverter,
    heater_tap: Option<PowerTapConverter>,
    pump_tap: Option<PowerTapConverter>,
}

impl TimeSeriesProcessor {
    /// Validate the profile and build the converters.
    ///
    /// This is the only fallible step; once a processor exists, no row can
    /// make it fail.
    pub fn new(profile: CalibrationProfile) -> CalibrationResult<Self> {
        profile.validate()?;
        tracing::debug!(
            adc_max = profile.thermistor.adc_max,
            pressure_unit = %profile.pressure.unit,
            power_taps = profile.power_taps.is_some(),
            heat_flux = profile.heat_flux.is_some(),
            "time series processor ready"
        );
        Ok(Self {
            temperature: TemperatureConverter::new(profile.thermistor),
            pressure: PressureConverter::new(profile.pressure),
            heater_tap: profile.power_taps.as_ref().map(PowerTapConverter::heater),
            pump_tap: profile.power_taps.as_ref().map(PowerTapConverter::pump),
            profile,
        })
    }

    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    /// Derive one record. Never fails; underivable metrics are `None`.
    pub fn process_sample(&self, sample: &Sample) -> DerivedRecord {
        let mut values: [Option<Real>; Metric::COUNT] = [None; Metric::COUNT];
        let mut put = |metric: Metric, value: Option<Real>| values[metric.index()] = value;

        let temp = |channel: Channel| self.temperature.convert(sample.code(channel));
        let press = |channel: Channel| self.pressure.convert(sample.code(channel));

        for channel in Channel::THERMISTORS {
            put(Metric::for_channel(channel), temp(channel));
        }
        let p_in = press(Channel::PIn);
        let p_out = press(Channel::POut);
        put(Metric::PIn, p_in);
        put(Metric::POut, p_out);

        // Pressure drop across the loop: inlet minus outlet.
        let delta_p = metrics::difference(p_in, p_out);
        put(Metric::DeltaP, delta_p);

        let t_in = temp(Channel::FluidIn);
        let t_out = temp(Channel::FluidOut);
        put(Metric::DeltaT, metrics::difference(t_in, t_out));

        let q_dot = metrics::heat_transfer_rate(
            self.profile.mass_flow_kg_s(),
            self.profile.fluid_cp_j_per_kg_k,
            t_in,
            t_out,
        );
        put(Metric::QDot, q_dot);

        let heater_w = self.heater_power_w(sample);
        put(Metric::HeaterPower, heater_w);
        put(
            Metric::PumpPowerMeasured,
            self.pump_tap
                .and_then(|tap| tap.convert(sample.code(Channel::PumpPower))),
        );

        let unit = self.pressure.unit();
        let delta_p_pa = delta_p.map(|dp| unit.to_pascal(dp));
        let pump_calc = metrics::pump_power(self.profile.flow_rate_m3s, delta_p_pa);
        put(Metric::PumpPowerCalc, pump_calc);
        put(
            Metric::PumpCostPerDay,
            metrics::pump_cost_per_day(pump_calc, self.profile.electricity_rate_per_kwh),
        );

        put(Metric::Efficiency, metrics::efficiency(heater_w, q_dot));

        let flux = self.profile.heat_flux.and_then(|g| {
            metrics::heat_flux(temp(g.top), temp(g.bottom), g.thickness_m, g.conductivity_w_per_m_k)
        });
        put(Metric::HeatFlux, flux);

        DerivedRecord::new(sample.clone(), values)
    }

    /// Heater power for one row.
    ///
    /// With calibrated taps only the logged reading counts, so an absent or
    /// invalid code stays missing. The fixed supply applies to rigs without
    /// taps.
    fn heater_power_w(&self, sample: &Sample) -> Option<Real> {
        match self.heater_tap {
            Some(tap) => tap.convert(sample.code(Channel::HeaterPower)),
            None => self.profile.heater.and_then(|supply| {
                metrics::heating_power(Some(supply.voltage_v), Some(supply.current_a))
            }),
        }
    }

    /// Lazy, order-preserving view over `samples`.
    pub fn iter<'a, I>(&'a self, samples: I) -> impl Iterator<Item = DerivedRecord> + 'a
    where
        I: IntoIterator<Item = &'a Sample>,
        I::IntoIter: 'a,
    {
        samples.into_iter().map(move |s| self.process_sample(s))
    }

    /// Sequential 1:1 map.
    pub fn process(&self, samples: &[Sample]) -> Vec<DerivedRecord> {
        tracing::debug!(rows = samples.len(), "processing samples");
        self.iter(samples).collect()
    }

    /// Data-parallel 1:1 map; output order matches input order.
    pub fn process_par(&self, samples: &[Sample]) -> Vec<DerivedRecord> {
        tracing::debug!(rows = samples.len(), "processing samples in parallel");
        samples
            .par_iter()
            .map(|s| self.process_sample(s))
            .collect()
    }
}
