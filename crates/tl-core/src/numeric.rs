/// Floating point type for every reading and derived value.
pub type Real = f64;

/// Absolute and relative bounds for comparing computed values.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// `a` and `b` agree within either the absolute or the relative bound.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Map a computed value onto the missing representation.
///
/// `None` is the only way a value is "missing" anywhere in thermolog; NaN and
/// infinities produced by degenerate arithmetic collapse into it here.
#[inline]
pub fn finite(v: Real) -> Option<Real> {
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_uses_either_bound() {
        let tol = Tolerances::default();
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(nearly_equal(1.0e6, 1.0e6 + 1e-4, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
        assert!(!nearly_equal(Real::NAN, Real::NAN, tol));
    }

    #[test]
    fn finite_collapses_nan_and_inf() {
        assert_eq!(finite(2.5), Some(2.5));
        assert_eq!(finite(Real::NAN), None);
        assert_eq!(finite(Real::INFINITY), None);
        assert_eq!(finite(Real::NEG_INFINITY), None);
    }

    proptest! {
        #[test]
        fn finite_never_yields_non_finite(bits in any::<u64>()) {
            let v = Real::from_bits(bits);
            match finite(v) {
                Some(x) => prop_assert!(x.is_finite() && x.to_bits() == bits),
                None => prop_assert!(!v.is_finite()),
            }
        }

        #[test]
        fn nearly_equal_is_symmetric(a in -1e9_f64..1e9, b in -1e9_f64..1e9) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
            prop_assert!(nearly_equal(a, a, tol));
        }
    }
}
