//! Ray (27 decimals) and wad (18 decimals) arithmetic.
//!
//! These are the rounding rules the lending contract itself applies, and the
//! client must reproduce them exactly: a preview computed with plain floor
//! division drifts below the value the contract settles at.
//!
//! - multiplication adds half of the divisor before dividing, i.e. rounds
//!   half-up;
//! - division adds half of the divisor before dividing, same as above;
//! - ray to wad rounds half-up across the 9-digit gap;
//! - wad to ray is exact.

use {
    crate::{scaled::pow10, MathError, MathResult, ScaledDecimal},
    bnum::types::I512,
};

pub const RAY_DECIMALS: u32 = 27;

pub const WAD_DECIMALS: u32 = 18;

/// Difference in decimal places between a ray and a wad.
pub const WAD_RAY_DECIMALS: u32 = RAY_DECIMALS - WAD_DECIMALS;

pub const RAY: i128 = 10_i128.pow(RAY_DECIMALS);

pub const HALF_RAY: i128 = RAY / 2;

pub const WAD: i128 = 10_i128.pow(WAD_DECIMALS);

pub const HALF_WAD: i128 = WAD / 2;

pub const WAD_RAY_RATIO: i128 = 10_i128.pow(WAD_RAY_DECIMALS);

pub const HALF_WAD_RAY_RATIO: i128 = WAD_RAY_RATIO / 2;

impl ScaledDecimal {
    /// Interpret a raw integer as a ray, i.e. attach scale 27.
    pub fn ray(value: impl Into<I512>) -> Self {
        Self::from_parts(value.into(), RAY_DECIMALS)
    }

    /// Interpret a raw integer as a wad, i.e. attach scale 18.
    pub fn wad(value: impl Into<I512>) -> Self {
        Self::from_parts(value.into(), WAD_DECIMALS)
    }

    /// 1.0 at ray scale.
    pub fn one_ray() -> Self {
        Self::ray(RAY)
    }

    /// 1.0 at wad scale.
    pub fn one_wad() -> Self {
        Self::wad(WAD)
    }
}

/// Describes the fixed-point multiplication and division a lending contract
/// performs on ray- and wad-denominated numbers.
pub trait RayMath: Sized {
    /// `(HALF_RAY + a * b) / RAY`, at scale `max(a.scale + b.scale, 27) - 27`.
    fn ray_mul(self, rhs: Self) -> MathResult<Self>;

    /// `(b / 2 + a * RAY) / b`, at scale `a.scale + 27 - b.scale`.
    fn ray_div(self, rhs: Self) -> MathResult<Self>;

    /// `(HALF_WAD_RAY_RATIO + a) / WAD_RAY_RATIO`, at scale `max(a.scale, 9) - 9`.
    /// Below nine decimals `a` is rescaled up to nine first, exactly.
    fn ray_to_wad(self) -> MathResult<Self>;

    /// `a * WAD_RAY_RATIO`, at scale `a.scale + 9`.
    fn wad_to_ray(self) -> MathResult<Self>;

    /// `(HALF_WAD + a * b) / WAD`, at scale `max(a.scale + b.scale, 18) - 18`.
    fn wad_mul(self, rhs: Self) -> MathResult<Self>;

    /// `(b / 2 + a * WAD) / b`, at scale `a.scale + 18 - b.scale`.
    fn wad_div(self, rhs: Self) -> MathResult<Self>;
}

impl RayMath for ScaledDecimal {
    fn ray_mul(self, rhs: Self) -> MathResult<Self> {
        half_up_mul(self, rhs, RAY_DECIMALS)
    }

    fn ray_div(self, rhs: Self) -> MathResult<Self> {
        half_up_div(self, rhs, RAY_DECIMALS)
    }

    fn ray_to_wad(self) -> MathResult<Self> {
        // Dropping nine digits must not leave a negative scale.
        let ray = self.checked_rescale(self.scale().max(WAD_RAY_DECIMALS))?;
        let value = ray
            .value()
            .checked_add(I512::from(HALF_WAD_RAY_RATIO))
            .ok_or_else(|| MathError::overflow_add(ray, HALF_WAD_RAY_RATIO))?
            / I512::from(WAD_RAY_RATIO);

        ScaledDecimal::with_scale(value, ray.scale() - WAD_RAY_DECIMALS)
    }

    fn wad_to_ray(self) -> MathResult<Self> {
        let value = self
            .value()
            .checked_mul(I512::from(WAD_RAY_RATIO))
            .ok_or_else(|| MathError::overflow_mul(self, WAD_RAY_RATIO))?;

        ScaledDecimal::with_scale(value, self.scale() + WAD_RAY_DECIMALS)
    }

    fn wad_mul(self, rhs: Self) -> MathResult<Self> {
        half_up_mul(self, rhs, WAD_DECIMALS)
    }

    fn wad_div(self, rhs: Self) -> MathResult<Self> {
        half_up_div(self, rhs, WAD_DECIMALS)
    }
}

/// `(10^decimals / 2 + a * b) / 10^decimals`.
fn half_up_mul(a: ScaledDecimal, b: ScaledDecimal, decimals: u32) -> MathResult<ScaledDecimal> {
    let unit = pow10(decimals)?;
    let half_unit = unit / I512::from(2_i128);

    let value = a
        .value()
        .checked_mul(b.value())
        .ok_or_else(|| MathError::overflow_mul(a, b))?
        .checked_add(half_unit)
        .ok_or_else(|| MathError::overflow_add(a, half_unit))?
        / unit;

    let scale = (a.scale() + b.scale()).max(decimals) - decimals;

    ScaledDecimal::with_scale(value, scale)
}

/// `(b / 2 + a * 10^decimals) / b`.
fn half_up_div(a: ScaledDecimal, b: ScaledDecimal, decimals: u32) -> MathResult<ScaledDecimal> {
    if b.is_zero() {
        return Err(MathError::division_by_zero(a));
    }

    // The result scale is `a.scale + decimals - b.scale`. Should that come out
    // negative, scale `a` up first so it lands on exactly zero.
    let a = if a.scale() + decimals < b.scale() {
        a.checked_rescale(b.scale() - decimals)?
    } else {
        a
    };

    let unit = pow10(decimals)?;
    let half_b = b.value() / I512::from(2_i128);

    let value = a
        .value()
        .checked_mul(unit)
        .ok_or_else(|| MathError::overflow_mul(a, unit))?
        .checked_add(half_b)
        .ok_or_else(|| MathError::overflow_add(a, half_b))?
        .checked_div(b.value())
        .ok_or_else(|| MathError::overflow_div(a, b))?;

    ScaledDecimal::with_scale(value, a.scale() + decimals - b.scale())
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, proptest::prelude::*, std::cmp::Ordering, test_case::test_case};

    #[test]
    fn constants_match_the_contract() {
        assert_eq!(RAY.to_string(), "1000000000000000000000000000");
        assert_eq!(HALF_RAY.to_string(), "500000000000000000000000000");
        assert_eq!(WAD_RAY_RATIO, 1_000_000_000);
        assert_eq!(HALF_WAD_RAY_RATIO, 500_000_000);
        assert_eq!(ScaledDecimal::one_ray().to_string(), "1.000000000000000000000000000");
    }

    #[test]
    fn ray_mul_works() {
        let two = ScaledDecimal::ray(2 * RAY);
        let three = ScaledDecimal::ray(3 * RAY);
        assert_eq!(two.ray_mul(three).unwrap(), ScaledDecimal::ray(6 * RAY));
    }

    #[test]
    fn ray_mul_scales_an_amount_by_an_index() {
        // A scaled debt of 1000 units with a borrow index of 1.05.
        let amount = ScaledDecimal::from_int(1000_i128);
        let index = ScaledDecimal::ray(1_050_000_000_000_000_000_000_000_000_i128);
        assert_eq!(amount.ray_mul(index).unwrap(), ScaledDecimal::from_int(1050_i128));
    }

    // Three ulps times one half is 1.5 ulps. Half-up gives 2; a floor division
    // would give 1.
    #[test_case(3, HALF_RAY, 2; "one and a half ulp rounds up")]
    #[test_case(1, HALF_RAY, 1; "half ulp rounds up")]
    #[test_case(1, HALF_RAY - 1, 0; "just below half rounds down")]
    #[test_case(5, HALF_RAY, 3; "two and a half ulp rounds up")]
    fn ray_mul_rounds_half_up(a: i128, b: i128, expect: i128) {
        let product = ScaledDecimal::ray(a).ray_mul(ScaledDecimal::ray(b)).unwrap();
        assert_eq!(product, ScaledDecimal::ray(expect));
    }

    #[test]
    fn ray_div_works() {
        let six = ScaledDecimal::ray(6 * RAY);
        let three = ScaledDecimal::ray(3 * RAY);
        assert_eq!(six.ray_div(three).unwrap(), ScaledDecimal::ray(2 * RAY));
    }

    // 2 / 3 = 0.666...67 and 1 / 3 = 0.333...33 at the last ray digit.
    #[test_case(2 * RAY, 3 * RAY, "666666666666666666666666667"; "rounds up above half")]
    #[test_case(RAY, 3 * RAY, "333333333333333333333333333"; "rounds down below half")]
    fn ray_div_rounds_half_up(a: i128, b: i128, expect: &str) {
        let quotient = ScaledDecimal::ray(a).ray_div(ScaledDecimal::ray(b)).unwrap();
        assert_eq!(quotient, ScaledDecimal::from_raw_str(expect, 27).unwrap());
    }

    #[test]
    fn ray_div_by_zero_fails() {
        assert!(matches!(
            ScaledDecimal::one_ray().ray_div(ScaledDecimal::ray(0_i128)),
            Err(MathError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn ray_div_of_an_amount_by_an_index_lands_at_amount_scale() {
        let amount = ScaledDecimal::from_int(1050_i128);
        let index = ScaledDecimal::ray(1_050_000_000_000_000_000_000_000_000_i128);
        assert_eq!(amount.ray_div(index).unwrap(), ScaledDecimal::from_int(1000_i128));
    }

    #[test]
    fn ray_div_never_produces_a_negative_scale() {
        let a = ScaledDecimal::from_int(3_i128);
        let b = ScaledDecimal::new(2_i128, 30).unwrap();
        let quotient = a.ray_div(b).unwrap();
        assert_eq!(quotient.scale(), 0);
        // 3 / 2e-30 = 1.5e30
        assert_eq!(quotient.value().to_string(), "1500000000000000000000000000000");
    }

    #[test_case(1_499_999_999, 1; "below half")]
    #[test_case(1_500_000_000, 2; "exactly half")]
    #[test_case(1_000_000_000, 1; "exact")]
    #[test_case(499_999_999, 0; "rounds to zero")]
    fn ray_to_wad_rounds_half_up(ray: i128, wad: i128) {
        let converted = ScaledDecimal::ray(ray).ray_to_wad().unwrap();
        assert_eq!(converted, ScaledDecimal::wad(wad));
    }

    #[test_case(ScaledDecimal::from_int(5_000_000_000_i128); "integer")]
    #[test_case(ScaledDecimal::new(5_000_000_000_000_i128, 3).unwrap(); "three decimals")]
    fn ray_to_wad_below_nine_decimals_keeps_the_value(value: ScaledDecimal) {
        let converted = value.ray_to_wad().unwrap();
        assert_eq!(converted, ScaledDecimal::from_int(5_000_000_000_i128));
        assert_eq!(converted.to_string(), "5000000000");
    }

    #[test]
    fn wad_to_ray_is_exact() {
        assert_eq!(ScaledDecimal::one_wad().wad_to_ray().unwrap(), ScaledDecimal::one_ray());
    }

    #[test]
    fn wad_mul_and_div_work() {
        let two = ScaledDecimal::wad(2 * WAD);
        let three = ScaledDecimal::wad(3 * WAD);
        let six = two.wad_mul(three).unwrap();
        assert_eq!(six, ScaledDecimal::wad(6 * WAD));
        assert_eq!(six.wad_div(three).unwrap(), two);
        assert_eq!(
            ScaledDecimal::wad(1_i128).wad_mul(ScaledDecimal::wad(HALF_WAD)).unwrap(),
            ScaledDecimal::wad(1_i128)
        );
    }

    proptest! {
        /// Crossing the 9-digit gap upward and back loses nothing.
        #[test]
        fn wad_to_ray_then_back_is_identity(x in any::<u64>(), scale in 0_i64..40) {
            let wad = ScaledDecimal::new(i128::from(x), scale).unwrap();
            prop_assert_eq!(wad.wad_to_ray().unwrap().ray_to_wad().unwrap(), wad);
        }

        /// Multiplying or dividing by one ray gives back the same number.
        #[test]
        fn ray_is_the_identity(x in any::<u128>()) {
            let a = ScaledDecimal::ray(i128::try_from(x >> 1).unwrap());
            let one = ScaledDecimal::one_ray();
            prop_assert_eq!(a.ray_mul(one).unwrap(), a);
            prop_assert_eq!(one.ray_mul(a).unwrap(), a);
            prop_assert_eq!(a.ray_div(one).unwrap(), a);
        }

        /// Half-up rounding never lands below the floor, nor more than one ulp
        /// above it.
        #[test]
        fn ray_mul_is_within_one_ulp_of_floor(a in any::<u64>(), b in any::<u64>()) {
            let a = ScaledDecimal::ray(i128::from(a) * 1_000_000_007);
            let b = ScaledDecimal::ray(i128::from(b) * 1_000_000_009);
            let rounded = a.ray_mul(b).unwrap();
            let floor = ScaledDecimal::ray(a.value() * b.value() / I512::from(RAY));
            let ceiling = floor.checked_add(ScaledDecimal::ray(1_i128)).unwrap();
            prop_assert_ne!(rounded.checked_cmp(&floor).unwrap(), Ordering::Less);
            prop_assert_ne!(rounded.checked_cmp(&ceiling).unwrap(), Ordering::Greater);
        }
    }
}
