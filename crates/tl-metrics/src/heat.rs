//! Heat transfer, conduction and thermal efficiency.

use tl_core::{Real, finite};

/// Heat carried by the fluid stream (W).
///
/// ```text
/// Q = m_dot * cp * (T_in - T_out)
/// ```
///
/// Positive when the fluid gives up heat between inlet and outlet.
pub fn heat_transfer_rate(
    m_dot_kg_s: Real,
    cp_j_per_kg_k: Real,
    t_in_c: Option<Real>,
    t_out_c: Option<Real>,
) -> Option<Real> {
    finite(m_dot_kg_s * cp_j_per_kg_k * (t_in_c? - t_out_c?))
}

/// Electrical heater power (W) from supply voltage and current.
pub fn heating_power(voltage_v: Option<Real>, current_a: Option<Real>) -> Option<Real> {
    finite(voltage_v? * current_a?)
}

/// Fraction of heater power that ends up in the fluid.
///
/// Zero heater power is not an error, there is just no efficiency to report.
pub fn efficiency(heating_power_w: Option<Real>, heat_transferred_w: Option<Real>) -> Option<Real> {
    let heating = heating_power_w?;
    if heating == 0.0 {
        return None;
    }
    finite(heat_transferred_w? / heating)
}

/// One-dimensional conduction through a plate (W/m²).
///
/// ```text
/// q'' = k * (T_top - T_bottom) / thickness
/// ```
///
/// `thickness_m` is validated non-zero with the rest of the geometry.
pub fn heat_flux(
    t_top_c: Option<Real>,
    t_bottom_c: Option<Real>,
    thickness_m: Real,
    conductivity_w_per_m_k: Real,
) -> Option<Real> {
    finite(conductivity_w_per_m_k * (t_top_c? - t_bottom_c?) / thickness_m)
}
