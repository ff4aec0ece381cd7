//! Tropical-semiring weight conversion.
//!
//! ARPA files store `log10(p)` (and `log10` back-off weights). The tropical
//! semiring cost of a probability is `-ln(p)`, which can be obtained from the
//! base-10 field without a second logarithm:
//!
//! `-ln(p) = -ln(10) * log10(p)`

use std::f64::consts::LN_10;

/// Convert an ARPA `log10` field (probability or back-off weight) into a
/// tropical-semiring weight. `"0.0"` (missing back-off) maps to `0.0`
/// (probability 1), matching ARPA convention.
pub fn arpa_field_to_weight(log10_value: f64) -> f32 {
    (-LN_10 * log10_value) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_backoff_is_zero_weight() {
        assert_eq!(arpa_field_to_weight(0.0), 0.0);
    }

    #[test]
    fn round_trips_through_probability() {
        // weight is stored as f32 (rustfst's TropicalWeight), so the
        // round trip loses single-precision bits before it's recovered;
        // 1e-6 is the tolerance that's actually achievable, not 1e-9.
        for p in [0.001_f64, 0.01, 0.1, 0.5, 0.9, 1.0] {
            let weight = arpa_field_to_weight(p.log10());
            let recovered = (-(weight as f64)).exp();
            assert!(
                (recovered - p).abs() < 1e-6,
                "p={p} recovered={recovered} weight={weight}"
            );
        }
    }
}
