use {
    crate::{MathError, MathResult, RayMath, ScaledDecimal, RAY_DECIMALS},
    bnum::types::I512,
    std::time::{SystemTime, UNIX_EPOCH},
};

/// Seconds in a 365-day year. Annual rates are converted to per-second rates
/// by dividing by this number, the same as the lending contract does.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Raise a ray-scale number to an integer power by square-and-multiply, using
/// [`RayMath::ray_mul`] for every multiplication.
///
/// The base is brought to ray scale first. `ray_pow(x, 0)` is one ray for any
/// `x`, zero included.
pub fn ray_pow(base: ScaledDecimal, exponent: u64) -> MathResult<ScaledDecimal> {
    let mut base = base.checked_rescale(RAY_DECIMALS)?;
    let mut z = if exponent % 2 != 0 {
        base
    } else {
        ScaledDecimal::one_ray()
    };

    let mut exponent = exponent / 2;
    while exponent != 0 {
        base = base.ray_mul(base)?;

        if exponent % 2 != 0 {
            z = z.ray_mul(base)?;
        }

        exponent /= 2;
    }

    Ok(z)
}

/// Approximate `(1 + base) ^ exponent` in ray scale with the first four terms
/// of its binomial expansion:
///
/// ```plain
/// 1 + n * x + n * (n - 1) / 2 * x^2 + n * (n - 1) * (n - 2) / 6 * x^3
/// ```
///
/// The contract accrues borrow indices with this expansion rather than an
/// exact power, so previews must use it too. It underestimates the exact power
/// slightly, and the gap widens with the base and the exponent.
pub fn binomial_approximated_ray_pow(
    base: ScaledDecimal,
    exponent: u64,
) -> MathResult<ScaledDecimal> {
    if exponent == 0 {
        return Ok(ScaledDecimal::one_ray());
    }

    let base = base.checked_rescale(RAY_DECIMALS)?;
    let exp = I512::from(i128::from(exponent));
    let exp_minus_one = I512::from(i128::from(exponent - 1));
    let exp_minus_two = I512::from(i128::from(exponent.saturating_sub(2)));

    let base_power_two = base.ray_mul(base)?;
    let base_power_three = base_power_two.ray_mul(base)?;

    let first_term = base.checked_mul_int(exp)?;

    let second_term = base_power_two
        .checked_mul_int(exp_minus_one)?
        .checked_mul_int(exp)?
        .checked_scale_div(I512::from(2_i128))?;

    let third_term = base_power_three
        .checked_mul_int(exp_minus_two)?
        .checked_mul_int(exp_minus_one)?
        .checked_mul_int(exp)?
        .checked_scale_div(I512::from(6_i128))?;

    ScaledDecimal::one_ray()
        .checked_add(first_term)?
        .checked_add(second_term)?
        .checked_add(third_term)
}

/// Net growth of an annual rate compounded every second for the given number
/// of seconds, i.e. `(1 + rate / SECONDS_PER_YEAR) ^ duration - 1`.
///
/// Uses the exact [`ray_pow`]. With `duration = SECONDS_PER_YEAR` this is the
/// annual percentage yield of `rate`. The rate is brought to ray scale before
/// it is divided into seconds.
pub fn calculate_compounded_rate(
    rate: ScaledDecimal,
    duration_seconds: u64,
) -> MathResult<ScaledDecimal> {
    let one = ScaledDecimal::one_ray();
    let per_second = rate
        .checked_rescale(RAY_DECIMALS)?
        .checked_scale_div(I512::from(i128::from(SECONDS_PER_YEAR)))?
        .checked_add(one)?;

    let compounded = ray_pow(per_second, duration_seconds)?.checked_sub(one)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        %rate,
        duration_seconds,
        %compounded,
        "Calculated compounded rate"
    );

    Ok(compounded)
}

/// Growth factor accrued by an annual rate between `last_update_timestamp`
/// and the current system time, using the binomial approximation.
///
/// See [`calculate_compounded_interest_at`].
pub fn calculate_compounded_interest(
    rate_per_year: ScaledDecimal,
    last_update_timestamp: u64,
) -> MathResult<ScaledDecimal> {
    calculate_compounded_interest_at(rate_per_year, last_update_timestamp, current_timestamp())
}

/// Growth factor accrued by an annual rate between `last_update_timestamp`
/// and `now`, both in seconds, using [`binomial_approximated_ray_pow`].
///
/// The result includes the principal: no elapsed time gives exactly one ray.
/// A `last_update_timestamp` later than `now` is an error, never clamped.
pub fn calculate_compounded_interest_at(
    rate_per_year: ScaledDecimal,
    last_update_timestamp: u64,
    now: u64,
) -> MathResult<ScaledDecimal> {
    let time_delta = elapsed(last_update_timestamp, now)?;
    let rate_per_second = rate_per_year
        .checked_rescale(RAY_DECIMALS)?
        .checked_scale_div(I512::from(i128::from(SECONDS_PER_YEAR)))?;

    let interest = binomial_approximated_ray_pow(rate_per_second, time_delta)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        %rate_per_year,
        time_delta,
        %interest,
        "Calculated compounded interest"
    );

    Ok(interest)
}

/// Growth factor accrued by an annual rate between `last_update_timestamp`
/// and `now` without compounding: `1 + rate * Δt / SECONDS_PER_YEAR`.
///
/// This is how the supply side's liquidity index accrues.
pub fn calculate_linear_interest(
    rate_per_year: ScaledDecimal,
    last_update_timestamp: u64,
    now: u64,
) -> MathResult<ScaledDecimal> {
    let time_delta = elapsed(last_update_timestamp, now)?;

    rate_per_year
        .checked_rescale(RAY_DECIMALS)?
        .checked_mul_int(I512::from(i128::from(time_delta)))?
        .checked_scale_div(I512::from(i128::from(SECONDS_PER_YEAR)))?
        .checked_add(ScaledDecimal::one_ray())
}

fn elapsed(last_update_timestamp: u64, now: u64) -> MathResult<u64> {
    now.checked_sub(last_update_timestamp).ok_or_else(|| {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            last_update_timestamp,
            now,
            "Last update time is in the future"
        );

        MathError::negative_duration(last_update_timestamp, now)
    })
}

/// Seconds since the Unix epoch, according to the system clock.
///
/// A clock set before the epoch reads as zero, which then surfaces as a
/// negative duration rather than a bogus accrual.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since_epoch| since_epoch.as_secs())
        .unwrap_or_default()
}

// ----------------------------------- tests -----------------------------------
