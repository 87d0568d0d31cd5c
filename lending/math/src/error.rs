use {std::any::type_name, thiserror::Error};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("failed to parse `{input}` for {field}: {reason}")]
    Parse {
        field: String,
        input: String,
        reason: String,
    },

    #[error("invalid scale {scale}: must be between 0 and {max}")]
    InvalidScale { scale: i64, max: u32 },

    #[error("division by zero: {a} / 0")]
    DivisionByZero { a: String },

    #[error("negative duration: last update {last_update} is after now {now}")]
    NegativeDuration { last_update: u64, now: u64 },

    #[error("addition overflow: {a} + {b}")]
    OverflowAdd { a: String, b: String },

    #[error("subtraction overflow: {a} - {b}")]
    OverflowSub { a: String, b: String },

    #[error("multiplication overflow: {a} * {b}")]
    OverflowMul { a: String, b: String },

    #[error("division overflow: {a} / {b}")]
    OverflowDiv { a: String, b: String },

    #[error("power overflow: {a} ^ {b}")]
    OverflowPow { a: String, b: String },

    #[error("value {value} is not representable as a finite float")]
    NotFinite { value: String },
}

impl MathError {
    /// A parse error attributed to a named input field.
    pub fn parse_field(
        field: impl Into<String>,
        input: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Parse {
            field: field.into(),
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// A parse error where the only thing known about the input is the type
    /// it was meant to become.
    pub fn parse_number<T>(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            field: type_name::<T>().to_string(),
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_scale(scale: i64, max: u32) -> Self {
        Self::InvalidScale { scale, max }
    }

    pub fn division_by_zero(a: impl ToString) -> Self {
        Self::DivisionByZero { a: a.to_string() }
    }

    pub fn negative_duration(last_update: u64, now: u64) -> Self {
        Self::NegativeDuration { last_update, now }
    }

    pub fn overflow_add(a: impl ToString, b: impl ToString) -> Self {
        Self::OverflowAdd {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_sub(a: impl ToString, b: impl ToString) -> Self {
        Self::OverflowSub {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_mul(a: impl ToString, b: impl ToString) -> Self {
        Self::OverflowMul {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_div(a: impl ToString, b: impl ToString) -> Self {
        Self::OverflowDiv {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn overflow_pow(a: impl ToString, b: impl ToString) -> Self {
        Self::OverflowPow {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn not_finite(value: impl ToString) -> Self {
        Self::NotFinite {
            value: value.to_string(),
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;
