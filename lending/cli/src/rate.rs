use {
    crate::{config::DisplayConfig, report::Report},
    clap::Parser,
    lending_math::{
        binomial_approximated_ray_pow, calculate_compounded_interest,
        calculate_compounded_interest_at, calculate_compounded_rate, calculate_linear_interest,
        current_timestamp, ray_pow, ScaledDecimal, RAY_DECIMALS, SECONDS_PER_YEAR,
    },
};

/// Parse a raw ray integer, naming the argument it came from on failure.
pub fn parse_ray(arg: &str, raw: &str) -> anyhow::Result<ScaledDecimal> {
    Ok(ScaledDecimal::parse_field(arg, raw, RAY_DECIMALS)?)
}

#[derive(Parser)]
pub struct ApyCmd {
    /// Annual rate as a raw ray integer, e.g. 50000000000000000000000000 for 5%
    rate: String,

    /// Compounding period in seconds
    #[arg(long, default_value_t = SECONDS_PER_YEAR)]
    duration: u64,
}

impl ApyCmd {
    pub fn report(self, display: &DisplayConfig) -> anyhow::Result<Report> {
        let rate = parse_ray("rate", &self.rate)?;
        let compounded = calculate_compounded_rate(rate, self.duration)?;

        Report::new()
            .add("rate", rate)
            .add("duration", self.duration)
            .add("compounded", compounded.value())
            .add_percent("yield", compounded, display)
    }
}

#[derive(Parser)]
pub struct InterestCmd {
    /// Annual rate as a raw ray integer
    rate: String,

    /// Time of the last index update, in seconds since the Unix epoch
    last_update: u64,

    /// Time to accrue to, in seconds since the Unix epoch [default: now]
    #[arg(long)]
    now: Option<u64>,
}

impl InterestCmd {
    pub fn report(self, display: &DisplayConfig) -> anyhow::Result<Report> {
        let rate = parse_ray("rate", &self.rate)?;
        let factor = match self.now {
            Some(now) => calculate_compounded_interest_at(rate, self.last_update, now)?,
            None => calculate_compounded_interest(rate, self.last_update)?,
        };
        let accrued = factor.checked_sub(ScaledDecimal::one_ray())?;

        Report::new()
            .add("rate", rate)
            .add("factor", factor)
            .add("factor_raw", factor.value())
            .add_percent("accrued", accrued, display)
    }
}

#[derive(Parser)]
pub struct LinearCmd {
    /// Annual rate as a raw ray integer
    rate: String,

    /// Time of the last index update, in seconds since the Unix epoch
    last_update: u64,

    /// Time to accrue to, in seconds since the Unix epoch [default: now]
    #[arg(long)]
    now: Option<u64>,
}

impl LinearCmd {
    pub fn report(self, display: &DisplayConfig) -> anyhow::Result<Report> {
        let rate = parse_ray("rate", &self.rate)?;
        let now = self.now.unwrap_or_else(current_timestamp);
        let factor = calculate_linear_interest(rate, self.last_update, now)?;
        let accrued = factor.checked_sub(ScaledDecimal::one_ray())?;

        Report::new()
            .add("rate", rate)
            .add("factor", factor)
            .add("factor_raw", factor.value())
            .add_percent("accrued", accrued, display)
    }
}

#[derive(Parser)]
pub struct PowCmd {
    /// Base as a raw ray integer
    base: String,

    /// Non-negative integer exponent
    exponent: u64,

    /// Use the three-term binomial approximation the contract uses for
    /// interest accrual, with `base` as the per-period rate
    #[arg(long)]
    approximate: bool,
}

impl PowCmd {
    pub fn report(self) -> anyhow::Result<Report> {
        let base = parse_ray("base", &self.base)?;
        let result = if self.approximate {
            binomial_approximated_ray_pow(base, self.exponent)?
        } else {
            ray_pow(base, self.exponent)?
        };

        Ok(Report::new()
            .add("result", result)
            .add("result_raw", result.value()))
    }
}

// ----------------------------------- tests -----------------------------------
