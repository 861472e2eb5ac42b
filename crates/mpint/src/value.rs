use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::error::BigIntError;
use crate::radix::{format_digits, parse_digits};

mod ops;
mod theory;

pub use theory::pow_pair;

/// Largest result, in bits, that shifts and powers will allocate (512 MiB).
pub const MAX_RESULT_BITS: u64 = 1 << 32;

fn check_result_bits(bits: Option<u64>, op: &'static str) -> Result<(), BigIntError> {
    match bits {
        Some(bits) if bits <= MAX_RESULT_BITS => Ok(()),
        _ => Err(BigIntError::InvalidDomain {
            op,
            reason: "result too large",
        }),
    }
}

/// An immutable, arbitrary-precision signed integer.
///
/// Every operation returns a fresh value; operands are only borrowed. Clones
/// share the same magnitude storage, which is released when the last clone
/// is dropped.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigIntValue {
    inner: Arc<BigInt>,
}

impl BigIntValue {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Parses an optionally signed digit string in `base` (2..=62).
    pub fn parse(digits: &str, base: u32) -> Result<Self, BigIntError> {
        parse_digits(digits, base).map(Self::from)
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    pub fn into_bigint(self) -> BigInt {
        Arc::try_unwrap(self.inner).unwrap_or_else(|shared| (*shared).clone())
    }

    pub fn to_string_radix(&self, base: u32) -> Result<String, BigIntError> {
        format_digits(&self.inner, base)
    }

    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.inner.sign() == Sign::Minus
    }

    pub fn signum(&self) -> i32 {
        match self.inner.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.inner.to_i64()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }

    pub fn compare(&self, other: &BigIntValue) -> Ordering {
        self.inner.cmp(&other.inner)
    }

    pub fn compare_i64(&self, other: i64) -> Ordering {
        self.as_bigint().cmp(&BigInt::from(other))
    }

    pub fn compare_u64(&self, other: u64) -> Ordering {
        self.as_bigint().cmp(&BigInt::from(other))
    }
}

impl From<BigInt> for BigIntValue {
    fn from(value: BigInt) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl From<i64> for BigIntValue {
    fn from(value: i64) -> Self {
        BigInt::from(value).into()
    }
}

impl From<u64> for BigIntValue {
    fn from(value: u64) -> Self {
        BigInt::from(value).into()
    }
}

impl From<i32> for BigIntValue {
    fn from(value: i32) -> Self {
        BigInt::from(value).into()
    }
}

impl From<u32> for BigIntValue {
    fn from(value: u32) -> Self {
        BigInt::from(value).into()
    }
}

impl FromStr for BigIntValue {
    type Err = BigIntError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text, 10)
    }
}

impl fmt::Display for BigIntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl fmt::Debug for BigIntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BigIntValue")
            .field(&format_args!("{}", self.inner))
            .finish()
    }
}
