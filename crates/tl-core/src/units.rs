// tl-core/src/units.rs

use core::fmt;
use core::str::FromStr;

use uom::si::f64::{Power, Pressure as UomPressure};

use crate::{Real, TlError};

pub type Pressure = UomPressure;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn psi(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

/// Watts expressed in kilowatts.
#[inline]
pub fn kilowatts(power_w: Real) -> Real {
    use uom::si::power::{kilowatt, watt};
    Power::new::<watt>(power_w).get::<kilowatt>()
}

/// Engineering unit a pressure transducer is calibrated in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PressureUnit {
    #[default]
    Psi,
    Pa,
    Kpa,
    Bar,
}

impl PressureUnit {
    pub fn quantity(self, v: Real) -> Pressure {
        use uom::si::pressure::{bar, kilopascal};
        match self {
            PressureUnit::Psi => psi(v),
            PressureUnit::Pa => pa(v),
            PressureUnit::Kpa => Pressure::new::<kilopascal>(v),
            PressureUnit::Bar => Pressure::new::<bar>(v),
        }
    }

    /// Convert a reading in this unit to pascal.
    pub fn to_pascal(self, v: Real) -> Real {
        use uom::si::pressure::pascal;
        self.quantity(v).get::<pascal>()
    }

    pub fn label(self) -> &'static str {
        match self {
            PressureUnit::Psi => "psi",
            PressureUnit::Pa => "Pa",
            PressureUnit::Kpa => "kPa",
            PressureUnit::Bar => "bar",
        }
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PressureUnit {
    type Err = TlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "psi" => Ok(PressureUnit::Psi),
            "pa" => Ok(PressureUnit::Pa),
            "kpa" => Ok(PressureUnit::Kpa),
            "bar" => Ok(PressureUnit::Bar),
            _ => Err(TlError::UnknownUnit { unit: s.to_string() }),
        }
    }
}

pub mod constants {
    /// Offset between the Celsius and Kelvin scales.
    pub const ZERO_CELSIUS_K: f64 = 273.15;

    pub const HOURS_PER_DAY: f64 = 24.0;
}
