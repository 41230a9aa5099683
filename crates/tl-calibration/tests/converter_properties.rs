use proptest::prelude::*;
use tl_calibration::{
    AdcConverter, PressureCal, PressureConverter, TemperatureConverter, ThermistorCal,
};
use tl_core::PressureUnit;

fn thermistor(adc_max: i32) -> ThermistorCal {
    ThermistorCal {
        r_fixed_ohm: 51_000.0,
        r_nominal_ohm: 100_000.0,
        t_nominal_c: 25.0,
        beta: 3950.0,
        adc_max,
    }
}

fn pressure(p_min: f64, p_max: f64) -> PressureCal {
    PressureCal {
        v_ref: 3.3,
        v_min: 0.33,
        v_max: 2.97,
        p_min,
        p_max,
        adc_max: 1023,
        unit: PressureUnit::Psi,
    }
}

#[test]
fn thermistor_rails_are_missing_for_any_resolution() {
    for adc_max in [255, 1023, 4095, 65_535] {
        let conv = TemperatureConverter::new(thermistor(adc_max));
        assert_eq!(conv.convert(Some(0)), None);
        assert_eq!(conv.convert(Some(adc_max)), None);
    }
}

proptest! {
    #[test]
    fn thermistor_interior_codes_are_finite(code in 1_i32..1023) {
        let conv = TemperatureConverter::new(thermistor(1023));
        let t = conv.convert(Some(code));
        prop_assert!(t.is_some());
        prop_assert!(t.unwrap().is_finite());
    }

    #[test]
    fn pressure_stays_within_span(
        code in 0_i32..=1023,
        p_min in -50.0_f64..50.0,
        span in -200.0_f64..200.0,
    ) {
        let p_max = p_min + span;
        let conv = PressureConverter::new(pressure(p_min, p_max));
        let p = conv.convert(Some(code)).unwrap();
        let lo = p_min.min(p_max) - 1e-9;
        let hi = p_min.max(p_max) + 1e-9;
        prop_assert!(p >= lo && p <= hi, "p = {} outside [{}, {}]", p, lo, hi);
    }

    #[test]
    fn pressure_outside_code_range_is_missing(code in prop_oneof![i32::MIN..0, 1024_i32..i32::MAX]) {
        let conv = PressureConverter::new(pressure(0.0, 100.0));
        prop_assert_eq!(conv.convert(Some(code)), None);
    }

    #[test]
    fn pressure_is_monotonic_for_ascending_span(a in 0_i32..=1023, b in 0_i32..=1023) {
        let conv = PressureConverter::new(pressure(0.0, 100.0));
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(conv.convert(Some(lo)).unwrap() <= conv.convert(Some(hi)).unwrap());
    }
}
