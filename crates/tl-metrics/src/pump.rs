//! Pump hydraulic power and running cost.

use tl_core::constants::HOURS_PER_DAY;
use tl_core::{Real, finite, kilowatts};

/// Ideal hydraulic power (W) to push `flow_rate_m3s` against `delta_p_pa`.
pub fn pump_power(flow_rate_m3s: Real, delta_p_pa: Option<Real>) -> Option<Real> {
    finite(flow_rate_m3s * delta_p_pa?)
}

/// Cost of running at `power_w` around the clock for one day.
pub fn pump_cost_per_day(power_w: Option<Real>, rate_per_kwh: Real) -> Option<Real> {
    finite(kilowatts(power_w?) * HOURS_PER_DAY * rate_per_kwh)
}
