use core::fmt;
use core::str::FromStr;

use crate::TlError;

/// Raw ADC output. Signed so that logger sentinels (e.g. `-1`) survive
/// ingestion and are rejected by the converters instead of the parser.
pub type AdcCode = i32;

/// Named input channels the rig logger records.
///
/// The discriminant doubles as a dense index, so per-channel storage can be a
/// fixed array instead of a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    T1,
    T2,
    T3,
    #[cfg_attr(feature = "serde", serde(rename = "fluid_in"))]
    FluidIn,
    #[cfg_attr(feature = "serde", serde(rename = "fluid_out"))]
    FluidOut,
    #[cfg_attr(feature = "serde", serde(rename = "P_in"))]
    PIn,
    #[cfg_attr(feature = "serde", serde(rename = "P_out"))]
    POut,
    #[cfg_attr(feature = "serde", serde(rename = "heater_power"))]
    HeaterPower,
    #[cfg_attr(feature = "serde", serde(rename = "pump_power"))]
    PumpPower,
}

impl Channel {
    pub const COUNT: usize = 9;

    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::T1,
        Channel::T2,
        Channel::T3,
        Channel::FluidIn,
        Channel::FluidOut,
        Channel::PIn,
        Channel::POut,
        Channel::HeaterPower,
        Channel::PumpPower,
    ];

    pub const THERMISTORS: [Channel; 5] = [
        Channel::T1,
        Channel::T2,
        Channel::T3,
        Channel::FluidIn,
        Channel::FluidOut,
    ];

    pub const PRESSURES: [Channel; 2] = [Channel::PIn, Channel::POut];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the logger.
    pub fn name(self) -> &'static str {
        match self {
            Channel::T1 => "T1",
            Channel::T2 => "T2",
            Channel::T3 => "T3",
            Channel::FluidIn => "fluid_in",
            Channel::FluidOut => "fluid_out",
            Channel::PIn => "P_in",
            Channel::POut => "P_out",
            Channel::HeaterPower => "heater_power",
            Channel::PumpPower => "pump_power",
        }
    }

    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn is_thermistor(self) -> bool {
        Channel::THERMISTORS.contains(&self)
    }

    pub fn is_pressure(self) -> bool {
        Channel::PRESSURES.contains(&self)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = TlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::from_name(s.trim()).ok_or(TlError::InvalidArg {
            what: "unknown channel name",
        })
    }
}
