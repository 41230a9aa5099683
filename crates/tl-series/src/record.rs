//! Derived records and the fixed metric column set.

use core::fmt;

use tl_core::{Channel, Real};

use crate::sample::Sample;

/// Every value a derived record carries.
///
/// The set is fixed: a record always has all of them, and a value that could
/// not be derived for a row is `None` rather than absent. Exported tables
/// therefore have the same columns whatever sensors were wired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    T1,
    T2,
    T3,
    FluidIn,
    FluidOut,
    PIn,
    POut,
    DeltaP,
    DeltaT,
    QDot,
    HeaterPower,
    PumpPowerMeasured,
    PumpPowerCalc,
    PumpCostPerDay,
    Efficiency,
    HeatFlux,
}

impl Metric {
    pub const COUNT: usize = 16;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::T1,
        Metric::T2,
        Metric::T3,
        Metric::FluidIn,
        Metric::FluidOut,
        Metric::PIn,
        Metric::POut,
        Metric::DeltaP,
        Metric::DeltaT,
        Metric::QDot,
        Metric::HeaterPower,
        Metric::PumpPowerMeasured,
        Metric::PumpPowerCalc,
        Metric::PumpCostPerDay,
        Metric::Efficiency,
        Metric::HeatFlux,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn column(self) -> &'static str {
        match self {
            Metric::T1 => "T1_C",
            Metric::T2 => "T2_C",
            Metric::T3 => "T3_C",
            Metric::FluidIn => "fluid_in_C",
            Metric::FluidOut => "fluid_out_C",
            Metric::PIn => "P_in_pressure",
            Metric::POut => "P_out_pressure",
            Metric::DeltaP => "delta_p",
            Metric::DeltaT => "delta_T",
            Metric::QDot => "Q_dot",
            Metric::HeaterPower => "heater_power_W",
            Metric::PumpPowerMeasured => "pump_power_W",
            Metric::PumpPowerCalc => "pump_power_calc",
            Metric::PumpCostPerDay => "pump_cost_per_day",
            Metric::Efficiency => "efficiency",
            Metric::HeatFlux => "heat_flux",
        }
    }

    pub fn from_column(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.column() == name)
    }

    /// Metric holding the converted value of a sensor channel.
    pub fn for_channel(channel: Channel) -> Metric {
        match channel {
            Channel::T1 => Metric::T1,
            Channel::T2 => Metric::T2,
            Channel::T3 => Metric::T3,
            Channel::FluidIn => Metric::FluidIn,
            Channel::FluidOut => Metric::FluidOut,
            Channel::PIn => Metric::PIn,
            Channel::POut => Metric::POut,
            Channel::HeaterPower => Metric::HeaterPower,
            Channel::PumpPower => Metric::PumpPowerMeasured,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A sample plus everything derived from it.
///
/// Records are only built by the processor and expose no mutation, so a
/// record already handed out never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedRecord {
    sample: Sample,
    values: [Option<Real>; Metric::COUNT],
}

impl DerivedRecord {
    pub(crate) fn new(sample: Sample, values: [Option<Real>; Metric::COUNT]) -> Self {
        Self { sample, values }
    }

    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    #[inline]
    pub fn get(&self, metric: Metric) -> Option<Real> {
        self.values[metric.index()]
    }

    /// All metrics in column order.
    pub fn values(&self) -> &[Option<Real>; Metric::COUNT] {
        &self.values
    }

    pub fn temperature_c(&self, channel: Channel) -> Option<Real> {
        if !channel.is_thermistor() {
            return None;
        }
        self.get(Metric::for_channel(channel))
    }

    pub fn pressure(&self, channel: Channel) -> Option<Real> {
        if !channel.is_pressure() {
            return None;
        }
        self.get(Metric::for_channel(channel))
    }

    pub fn delta_p(&self) -> Option<Real> {
        self.get(Metric::DeltaP)
    }

    pub fn delta_t(&self) -> Option<Real> {
        self.get(Metric::DeltaT)
    }

    pub fn q_dot(&self) -> Option<Real> {
        self.get(Metric::QDot)
    }

    pub fn heater_power_w(&self) -> Option<Real> {
        self.get(Metric::HeaterPower)
    }

    pub fn pump_power_calc(&self) -> Option<Real> {
        self.get(Metric::PumpPowerCalc)
    }

    pub fn pump_cost_per_day(&self) -> Option<Real> {
        self.get(Metric::PumpCostPerDay)
    }

    pub fn efficiency(&self) -> Option<Real> {
        self.get(Metric::Efficiency)
    }

    pub fn heat_flux(&self) -> Option<Real> {
        self.get(Metric::HeatFlux)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_dense() {
        for (i, m) in Metric::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn columns_are_unique_and_round_trip() {
        let mut seen = std::collections::HashSet::new();
        for m in Metric::ALL {
            assert!(seen.insert(m.column()), "duplicate column {}", m.column());
            assert_eq!(Metric::from_column(m.column()), Some(m));
        }
        assert_eq!(Metric::from_column("nope"), None);
    }

    #[test]
    fn channel_metrics_are_distinct() {
        let metrics: std::collections::HashSet<_> =
            Channel::ALL.into_iter().map(Metric::for_channel).collect();
        assert_eq!(metrics.len(), Channel::COUNT);
    }
}
