use crate::{MathResult, ScaledDecimal};

/// Convert a rate to a percentage for display: a rate of `0.05` (at any
/// scale) becomes `5.0`.
///
/// The conversion to `f64` is lossy. The result is meant for people to read,
/// never to be fed back into a computation.
pub fn to_percent(rate: ScaledDecimal) -> MathResult<f64> {
    let percent = rate.checked_mul_int(100_i128)?;

    percent.to_f64()
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case(ScaledDecimal::ray(50_000_000_000_000_000_000_000_000_i128), 5.0; "five percent in ray")]
    #[test_case(ScaledDecimal::wad(1_000_000_000_000_000_000_i128), 100.0; "one in wad")]
    #[test_case(ScaledDecimal::ray(0_i128), 0.0; "zero")]
    #[test_case(ScaledDecimal::new(-25_i128, 2).unwrap(), -25.0; "negative")]
    fn to_percent_works(rate: ScaledDecimal, expect: f64) {
        assert_eq!(to_percent(rate).unwrap(), expect);
    }

    #[test]
    fn to_percent_of_an_apy() {
        // e^0.05 - 1, as `calculate_compounded_rate` gives for 5% over a year.
        let apy = ScaledDecimal::ray(51_271_096_334_354_554_996_205_899_i128);
        let percent = to_percent(apy).unwrap();
        assert!((percent - 5.127_109_633).abs() < 1e-9);
    }
}
