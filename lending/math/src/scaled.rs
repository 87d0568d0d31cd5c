use {
    crate::{MathError, MathResult},
    bnum::types::I512,
    serde::{de, ser},
    std::{
        cmp::Ordering,
        fmt::{self, Write},
        str::FromStr,
    },
};

/// The largest number of fractional digits a [`ScaledDecimal`] may carry.
///
/// `10^MAX_SCALE` must leave enough headroom in 512 bits for the products the
/// ray and wad operations form before rounding back down.
pub const MAX_SCALE: u32 = 128;

/// An exact fixed-point number: an integer `value` and a decimal `scale`,
/// representing `value / 10^scale`.
///
/// Every operation returns a new value. Operands of different scales are
/// aligned by scaling the lower-scale one _up_, which is exact. The only
/// operations that round are [`ScaledDecimal::checked_rescale`] (half-up) and
/// [`ScaledDecimal::checked_scale_div`] (truncating).
///
/// ## Equality
///
/// `PartialEq` is structural: `1.0` (value 10, scale 1) and `1.00` (value 100,
/// scale 2) are _not_ equal. Use [`ScaledDecimal::checked_cmp`] to compare
/// numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledDecimal {
    value: I512,
    scale: u32,
}

impl ScaledDecimal {
    /// Create a new value, rejecting a negative or oversized scale.
    pub fn new(value: impl Into<I512>, scale: i64) -> MathResult<Self> {
        let scale = u32::try_from(scale)
            .ok()
            .filter(|scale| *scale <= MAX_SCALE)
            .ok_or_else(|| MathError::invalid_scale(scale, MAX_SCALE))?;

        Ok(Self {
            value: value.into(),
            scale,
        })
    }

    /// Create a whole number, i.e. a value at scale 0.
    pub fn from_int(value: impl Into<I512>) -> Self {
        Self {
            value: value.into(),
            scale: 0,
        }
    }

    /// Assemble a value whose scale is known to be valid.
    pub(crate) const fn from_parts(value: I512, scale: u32) -> Self {
        Self { value, scale }
    }

    pub(crate) fn with_scale(value: I512, scale: u32) -> MathResult<Self> {
        if scale > MAX_SCALE {
            return Err(MathError::invalid_scale(scale.into(), MAX_SCALE));
        }

        Ok(Self { value, scale })
    }

    /// Parse an integer string, such as a raw value returned by a contract
    /// view function, and attach the given scale to it.
    ///
    /// ```rust
    /// use lending_math::ScaledDecimal;
    ///
    /// let one = ScaledDecimal::from_raw_str("1000000000000000000000000000", 27).unwrap();
    /// assert_eq!(one.to_string(), "1.000000000000000000000000000");
    /// ```
    pub fn from_raw_str(raw: &str, scale: u32) -> MathResult<Self> {
        let value =
            parse_integer(raw).map_err(|reason| MathError::parse_number::<Self>(raw, reason))?;

        Self::with_scale(value, scale)
    }

    /// Same as [`ScaledDecimal::from_raw_str`], but the error names the input
    /// field the string came from.
    pub fn parse_field(field: &str, raw: &str, scale: u32) -> MathResult<Self> {
        let value =
            parse_integer(raw).map_err(|reason| MathError::parse_field(field, raw, reason))?;

        Self::with_scale(value, scale)
    }

    pub fn value(&self) -> I512 {
        self.value
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.value == I512::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    /// Add two values. The result carries the larger of the two scales.
    pub fn checked_add(self, other: Self) -> MathResult<Self> {
        let (a, b, scale) = self.align(other)?;
        let value = a
            .checked_add(b)
            .ok_or_else(|| MathError::overflow_add(self, other))?;

        Self::with_scale(value, scale)
    }

    /// Subtract `other` from `self`. The result carries the larger of the two
    /// scales and may be negative.
    pub fn checked_sub(self, other: Self) -> MathResult<Self> {
        let (a, b, scale) = self.align(other)?;
        let value = a
            .checked_sub(b)
            .ok_or_else(|| MathError::overflow_sub(self, other))?;

        Self::with_scale(value, scale)
    }

    /// Multiply two values. The result scale is the sum of the two scales;
    /// nothing is rounded.
    pub fn checked_mul(self, other: Self) -> MathResult<Self> {
        let value = self
            .value
            .checked_mul(other.value)
            .ok_or_else(|| MathError::overflow_mul(self, other))?;

        Self::with_scale(value, self.scale + other.scale)
    }

    /// Multiply by a plain integer. The scale is unchanged.
    pub fn checked_mul_int(self, rhs: impl Into<I512>) -> MathResult<Self> {
        let rhs = rhs.into();
        let value = self
            .value
            .checked_mul(rhs)
            .ok_or_else(|| MathError::overflow_mul(self, rhs))?;

        Ok(Self { value, ..self })
    }

    /// Divide by a plain integer that carries no scale of its own, truncating
    /// toward zero. The scale is unchanged.
    pub fn checked_scale_div(self, divisor: impl Into<I512>) -> MathResult<Self> {
        let divisor = divisor.into();
        if divisor == I512::ZERO {
            return Err(MathError::division_by_zero(self));
        }

        let value = self
            .value
            .checked_div(divisor)
            .ok_or_else(|| MathError::overflow_div(self, divisor))?;

        Ok(Self { value, ..self })
    }

    /// Change the scale.
    ///
    /// Increasing the scale is exact. Decreasing it by `k` digits adds
    /// `5 * 10^(k-1)` to the magnitude before dividing by `10^k`, i.e. rounds
    /// half-up (half away from zero for negative values).
    pub fn checked_rescale(self, new_scale: u32) -> MathResult<Self> {
        match new_scale.cmp(&self.scale) {
            Ordering::Equal => Ok(self),
            Ordering::Greater => {
                let factor = pow10(new_scale - self.scale)?;
                let value = self
                    .value
                    .checked_mul(factor)
                    .ok_or_else(|| MathError::overflow_mul(self, factor))?;

                Self::with_scale(value, new_scale)
            },
            Ordering::Less => {
                let factor = pow10(self.scale - new_scale)?;
                let half = factor / I512::from(2_i128);
                let value = if self.is_negative() {
                    self.value.checked_sub(half)
                } else {
                    self.value.checked_add(half)
                }
                .ok_or_else(|| MathError::overflow_add(self, half))?;

                // `factor` is a power of ten, so never zero.
                Self::with_scale(value / factor, new_scale)
            },
        }
    }

    /// Compare numerically, after aligning both values to a common scale.
    pub fn checked_cmp(&self, other: &Self) -> MathResult<Ordering> {
        let (a, b, _) = self.align(*other)?;

        Ok(a.cmp(&b))
    }

    /// Lossy conversion to a float, for presentation only. Never feed the
    /// result back into a computation.
    pub fn to_f64(&self) -> MathResult<f64> {
        let repr = self.to_string();

        repr.parse::<f64>()
            .ok()
            .filter(|float| float.is_finite())
            .ok_or_else(|| MathError::not_finite(repr))
    }

    /// Bring two values to the larger of their scales, returning both integer
    /// values and that scale.
    fn align(self, other: Self) -> MathResult<(I512, I512, u32)> {
        let scale = self.scale.max(other.scale);
        let a = self.checked_rescale(scale)?;
        let b = other.checked_rescale(scale)?;

        Ok((a.value, b.value, scale))
    }
}

/// `10^exp` as a 512-bit integer.
pub(crate) fn pow10(exp: u32) -> MathResult<I512> {
    I512::TEN
        .checked_pow(exp)
        .ok_or_else(|| MathError::overflow_pow(I512::TEN, exp))
}

/// Parse an optionally negative string of ASCII digits.
///
/// Leading `+`, whitespace, underscores, exponents, and empty input are all
/// rejected; `I512::from_str_radix` alone would let some of them through.
fn parse_integer(input: &str) -> Result<I512, String> {
    let digits = input.strip_prefix('-').unwrap_or(input);

    if digits.is_empty() {
        return Err("no digits".to_string());
    }

    if let Some(c) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(format!("unexpected character `{c}`"));
    }

    I512::from_str_radix(input, 10).map_err(|err| err.to_string())
}

impl fmt::Display for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = self.scale as usize;
        let digits = self.value.unsigned_abs().to_string();

        if self.is_negative() {
            f.write_char('-')?;
        }

        if scale == 0 {
            return f.write_str(&digits);
        }

        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (whole, fractional) = padded.split_at(padded.len() - scale);

        f.write_str(whole)?;
        f.write_char('.')?;
        f.write_str(fractional)
    }
}

impl FromStr for ScaledDecimal {
    type Err = MathError;

    /// Parse a decimal string. The scale is the number of fractional digits
    /// written, trailing zeros included: `"1.50"` is value 150 at scale 2.
    ///
    /// Possible inputs: "1", "-1.5", "0.050", "000012"
    /// Disallowed: "", ".5", "1.", "+1", "1e27"
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split('.');

        // `split` always yields at least one element.
        let whole = parts.next().unwrap_or_default();
        let fractional = parts.next();

        if parts.next().is_some() {
            return Err(MathError::parse_number::<Self>(
                input,
                "unexpected number of dots",
            ));
        }

        let Some(fractional) = fractional else {
            let value = parse_integer(whole)
                .map_err(|reason| MathError::parse_number::<Self>(input, reason))?;
            return Ok(Self::from_int(value));
        };

        if whole.trim_start_matches('-').is_empty() || fractional.is_empty() {
            return Err(MathError::parse_number::<Self>(
                input,
                "both whole and fractional digits are required around the dot",
            ));
        }

        if fractional.starts_with('-') {
            return Err(MathError::parse_number::<Self>(
                input,
                "fractional part cannot be negative",
            ));
        }

        let scale = u32::try_from(fractional.len())
            .ok()
            .filter(|scale| *scale <= MAX_SCALE)
            .ok_or_else(|| {
                MathError::parse_number::<Self>(
                    input,
                    format!("cannot parse more than {MAX_SCALE} fractional digits"),
                )
            })?;

        let value = parse_integer(&format!("{whole}{fractional}"))
            .map_err(|reason| MathError::parse_number::<Self>(input, reason))?;

        Self::with_scale(value, scale)
    }
}

impl ser::Serialize for ScaledDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for ScaledDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(ScaledDecimalVisitor)
    }
}

struct ScaledDecimalVisitor;

impl de::Visitor<'_> for ScaledDecimalVisitor {
    type Value = ScaledDecimal;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string-encoded decimal number")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        ScaledDecimal::from_str(v).map_err(E::custom)
    }
}

// ----------------------------------- tests -----------------------------------
