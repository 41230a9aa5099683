//! Converter trait.

use tl_core::{AdcCode, Real};

/// Maps one raw ADC code onto a physical value.
///
/// Implementations are pure: the same code always yields the same value and
/// a code that cannot be converted yields `None`.
pub trait AdcConverter {
    fn convert(&self, code: Option<AdcCode>) -> Option<Real>;
}
