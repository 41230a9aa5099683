//! tl-metrics: derived physical metrics for the test rig.
//!
//! Every function is pure and total. Operands that come from sensors are
//! `Option<Real>`; a `None` operand, or a degenerate result (division by
//! zero, overflow), yields `None` for that metric only.

pub mod heat;
pub mod pump;

pub use heat::{efficiency, heat_flux, heat_transfer_rate, heating_power};
pub use pump::{pump_cost_per_day, pump_power};

use tl_core::{Real, finite};

/// `a - b` when both readings are present.
pub fn difference(a: Option<Real>, b: Option<Real>) -> Option<Real> {
    finite(a? - b?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_needs_both_operands() {
        assert_eq!(difference(Some(30.0), Some(25.0)), Some(5.0));
        assert_eq!(difference(Some(30.0), None), None);
        assert_eq!(difference(None, Some(25.0)), None);
    }
}
