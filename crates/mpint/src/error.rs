#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BigIntError {
    #[error("invalid construction input: {0}")]
    InvalidConstructionInput(String),
    #[error("conditioner rejected input: {0}")]
    ConditionerRejected(String),
    #[error("malformed digit string {input:?} for base {base}: {reason}")]
    MalformedDigitString {
        input: String,
        base: u32,
        reason: String,
    },
    #[error("{op}: division by zero")]
    DivisionByZero { op: &'static str },
    #[error("{op}: no modular inverse exists")]
    NoModularInverse { op: &'static str },
    #[error("{op}: {reason}")]
    InvalidDomain {
        op: &'static str,
        reason: &'static str,
    },
    #[error("base should be between 2 and 62, inclusive (got {0})")]
    InvalidBase(i128),
}

impl BigIntError {
    pub(crate) fn malformed(input: &str, base: u32, reason: impl Into<String>) -> Self {
        BigIntError::MalformedDigitString {
            input: input.to_string(),
            base,
            reason: reason.into(),
        }
    }
}
