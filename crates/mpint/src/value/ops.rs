use std::ops;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use super::{check_result_bits, BigIntValue};
use crate::error::BigIntError;

// Quotients round toward negative infinity and remainders take the sign of
// the divisor, so `x == y * x.div(y) + x.modulo(y)` for every nonzero `y`.
impl BigIntValue {
    pub fn add(&self, other: &BigIntValue) -> BigIntValue {
        (self.as_bigint() + other.as_bigint()).into()
    }

    pub fn sub(&self, other: &BigIntValue) -> BigIntValue {
        (self.as_bigint() - other.as_bigint()).into()
    }

    pub fn mul(&self, other: &BigIntValue) -> BigIntValue {
        (self.as_bigint() * other.as_bigint()).into()
    }

    pub fn div(&self, divisor: &BigIntValue) -> Result<BigIntValue, BigIntError> {
        floor_div(self.as_bigint(), divisor.as_bigint(), "div")
    }

    pub fn add_u64(&self, value: u64) -> BigIntValue {
        (self.as_bigint() + BigInt::from(value)).into()
    }

    pub fn sub_u64(&self, value: u64) -> BigIntValue {
        (self.as_bigint() - BigInt::from(value)).into()
    }

    pub fn mul_u64(&self, value: u64) -> BigIntValue {
        (self.as_bigint() * BigInt::from(value)).into()
    }

    pub fn div_u64(&self, divisor: u64) -> Result<BigIntValue, BigIntError> {
        floor_div(self.as_bigint(), &BigInt::from(divisor), "udiv")
    }

    /// `self * 2^shift`; refused with `InvalidDomain` past [`MAX_RESULT_BITS`].
    ///
    /// [`MAX_RESULT_BITS`]: crate::MAX_RESULT_BITS
    pub fn mul_2exp(&self, shift: u64) -> Result<BigIntValue, BigIntError> {
        if self.is_zero() {
            return Ok(BigIntValue::zero());
        }
        check_result_bits(self.bit_length().checked_add(shift), "mul_2exp")?;
        Ok((self.as_bigint() << shift).into())
    }

    /// `self / 2^shift`, truncated toward zero.
    pub fn div_2exp(&self, shift: u64) -> BigIntValue {
        let value = self.as_bigint();
        let magnitude = value.magnitude() >> shift;
        BigInt::from_biguint(value.sign(), magnitude).into()
    }

    pub fn abs(&self) -> BigIntValue {
        if !self.is_negative() {
            return self.clone();
        }
        self.as_bigint().abs().into()
    }

    pub fn neg(&self) -> BigIntValue {
        (-self.as_bigint()).into()
    }

    pub fn modulo(&self, divisor: &BigIntValue) -> Result<BigIntValue, BigIntError> {
        floor_mod(self.as_bigint(), divisor.as_bigint(), "mod")
    }

    pub fn modulo_u64(&self, divisor: u64) -> Result<BigIntValue, BigIntError> {
        floor_mod(self.as_bigint(), &BigInt::from(divisor), "umod")
    }

    /// Bitwise AND over the infinite two's-complement representation.
    pub fn and(&self, other: &BigIntValue) -> BigIntValue {
        (self.as_bigint() & other.as_bigint()).into()
    }

    pub fn or(&self, other: &BigIntValue) -> BigIntValue {
        (self.as_bigint() | other.as_bigint()).into()
    }

    pub fn xor(&self, other: &BigIntValue) -> BigIntValue {
        (self.as_bigint() ^ other.as_bigint()).into()
    }
}

impl ops::Add<&BigIntValue> for &BigIntValue {
    type Output = BigIntValue;

    fn add(self, other: &BigIntValue) -> BigIntValue {
        BigIntValue::add(self, other)
    }
}

impl ops::Sub<&BigIntValue> for &BigIntValue {
    type Output = BigIntValue;

    fn sub(self, other: &BigIntValue) -> BigIntValue {
        BigIntValue::sub(self, other)
    }
}

impl ops::Mul<&BigIntValue> for &BigIntValue {
    type Output = BigIntValue;

    fn mul(self, other: &BigIntValue) -> BigIntValue {
        BigIntValue::mul(self, other)
    }
}

impl ops::Neg for &BigIntValue {
    type Output = BigIntValue;

    fn neg(self) -> BigIntValue {
        BigIntValue::neg(self)
    }
}

fn floor_div(
    dividend: &BigInt,
    divisor: &BigInt,
    op: &'static str,
) -> Result<BigIntValue, BigIntError> {
    if divisor.is_zero() {
        return Err(BigIntError::DivisionByZero { op });
    }
    Ok(dividend.div_floor(divisor).into())
}

fn floor_mod(
    dividend: &BigInt,
    divisor: &BigInt,
    op: &'static str,
) -> Result<BigIntValue, BigIntError> {
    if divisor.is_zero() {
        return Err(BigIntError::DivisionByZero { op });
    }
    Ok(dividend.mod_floor(divisor).into())
}
