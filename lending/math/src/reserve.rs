use {
    crate::{
        calculate_compounded_interest_at, calculate_compounded_rate, calculate_linear_interest,
        MathError, MathResult, RayMath, ScaledDecimal, RAY_DECIMALS, SECONDS_PER_YEAR,
    },
    serde::{Deserialize, Serialize},
};

/// A reserve's rates and indices exactly as a view function returns them:
/// every number is a decimal string, rates and indices in ray.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RawReserveData {
    pub current_liquidity_rate: String,
    pub current_variable_borrow_rate: String,
    pub liquidity_index: String,
    pub variable_borrow_index: String,
    pub last_update_timestamp: String,
}

/// A reserve's rates and indices, parsed.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveData {
    /// Annual supply rate, in ray.
    pub current_liquidity_rate: ScaledDecimal,
    /// Annual variable borrow rate, in ray.
    pub current_variable_borrow_rate: ScaledDecimal,
    /// Supply index as of the last update, in ray.
    pub liquidity_index: ScaledDecimal,
    /// Variable borrow index as of the last update, in ray.
    pub variable_borrow_index: ScaledDecimal,
    /// Seconds since the Unix epoch.
    pub last_update_timestamp: u64,
}

impl ReserveData {
    /// Parse every field, failing on the first one that is not a non-negative
    /// integer string. The error names that field.
    pub fn parse(raw: &RawReserveData) -> MathResult<Self> {
        Ok(Self {
            current_liquidity_rate: parse_ray("current_liquidity_rate", &raw.current_liquidity_rate)?,
            current_variable_borrow_rate: parse_ray(
                "current_variable_borrow_rate",
                &raw.current_variable_borrow_rate,
            )?,
            liquidity_index: parse_ray("liquidity_index", &raw.liquidity_index)?,
            variable_borrow_index: parse_ray("variable_borrow_index", &raw.variable_borrow_index)?,
            last_update_timestamp: parse_timestamp(
                "last_update_timestamp",
                &raw.last_update_timestamp,
            )?,
        })
    }

    /// Annual percentage yield earned by suppliers, in ray.
    pub fn supply_apy(&self) -> MathResult<ScaledDecimal> {
        calculate_compounded_rate(self.current_liquidity_rate, SECONDS_PER_YEAR)
    }

    /// Annual percentage yield paid by variable-rate borrowers, in ray.
    pub fn borrow_apy(&self) -> MathResult<ScaledDecimal> {
        calculate_compounded_rate(self.current_variable_borrow_rate, SECONDS_PER_YEAR)
    }

    /// The liquidity index the reserve would have if it were updated at `now`.
    pub fn normalized_income(&self, now: u64) -> MathResult<ScaledDecimal> {
        if now == self.last_update_timestamp {
            return Ok(self.liquidity_index);
        }

        calculate_linear_interest(self.current_liquidity_rate, self.last_update_timestamp, now)?
            .ray_mul(self.liquidity_index)
    }

    /// The variable borrow index the reserve would have if it were updated at
    /// `now`.
    pub fn normalized_debt(&self, now: u64) -> MathResult<ScaledDecimal> {
        if now == self.last_update_timestamp {
            return Ok(self.variable_borrow_index);
        }

        calculate_compounded_interest_at(
            self.current_variable_borrow_rate,
            self.last_update_timestamp,
            now,
        )?
        .ray_mul(self.variable_borrow_index)
    }

    /// Underlying balance of a supplier holding `scaled_balance` at `now`.
    pub fn preview_balance(
        &self,
        scaled_balance: ScaledDecimal,
        now: u64,
    ) -> MathResult<ScaledDecimal> {
        scaled_balance.ray_mul(self.normalized_income(now)?)
    }

    /// Underlying debt of a borrower owing `scaled_debt` at `now`.
    pub fn preview_debt(&self, scaled_debt: ScaledDecimal, now: u64) -> MathResult<ScaledDecimal> {
        scaled_debt.ray_mul(self.normalized_debt(now)?)
    }
}

fn parse_ray(field: &str, raw: &str) -> MathResult<ScaledDecimal> {
    let value = ScaledDecimal::parse_field(field, raw, RAY_DECIMALS)?;

    if value.is_negative() {
        return Err(MathError::parse_field(field, raw, "must not be negative"));
    }

    Ok(value)
}

fn parse_timestamp(field: &str, raw: &str) -> MathResult<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MathError::parse_field(
            field,
            raw,
            "expecting a string of decimal digits",
        ));
    }

    raw.parse().map_err(|err| MathError::parse_field(field, raw, err))
}

// ----------------------------------- tests -----------------------------------
