use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Pow, Signed, Zero};

use super::{check_result_bits, BigIntValue};
use crate::error::BigIntError;
use crate::prime::{self, Primality};
use crate::random;

impl BigIntValue {
    /// Greatest common divisor; never negative, and `gcd(x, 0) == |x|`.
    pub fn gcd(&self, other: &BigIntValue) -> BigIntValue {
        self.as_bigint().gcd(other.as_bigint()).into()
    }

    /// The inverse of `self` modulo `|modulus|`, in `[0, |modulus|)`.
    pub fn invert_mod(&self, modulus: &BigIntValue) -> Result<BigIntValue, BigIntError> {
        invert(self.as_bigint(), modulus.as_bigint(), "invertm").map(BigIntValue::from)
    }

    /// `self^exponent mod |modulus|`, in `[0, |modulus|)`.
    ///
    /// A negative exponent raises the modular inverse of `self` instead and
    /// fails with `NoModularInverse` when there is none.
    pub fn pow_mod(
        &self,
        exponent: &BigIntValue,
        modulus: &BigIntValue,
    ) -> Result<BigIntValue, BigIntError> {
        let modulus = modulus.as_bigint();
        if modulus.is_zero() {
            return Err(BigIntError::DivisionByZero { op: "powm" });
        }
        let base = if exponent.is_negative() {
            invert(self.as_bigint(), modulus, "powm")?
        } else {
            self.as_bigint().clone()
        };
        Ok(modpow(&base, exponent.as_bigint().magnitude(), modulus).into())
    }

    pub fn pow_mod_u64(
        &self,
        exponent: u64,
        modulus: &BigIntValue,
    ) -> Result<BigIntValue, BigIntError> {
        let modulus = modulus.as_bigint();
        if modulus.is_zero() {
            return Err(BigIntError::DivisionByZero { op: "upowm" });
        }
        Ok(modpow(self.as_bigint(), &BigUint::from(exponent), modulus).into())
    }

    /// `self^exponent`; any base to the zeroth power is 1.
    pub fn pow_u64(&self, exponent: u64) -> Result<BigIntValue, BigIntError> {
        check_pow_bits(self.as_bigint().magnitude(), exponent, "pow")?;
        Ok(Pow::pow(self.as_bigint(), exponent).into())
    }

    /// Floor of the square root.
    pub fn sqrt(&self) -> Result<BigIntValue, BigIntError> {
        if self.is_negative() {
            return Err(BigIntError::InvalidDomain {
                op: "sqrt",
                reason: "square root of a negative value",
            });
        }
        Ok(self.as_bigint().sqrt().into())
    }

    /// Integer `degree`-th root. The magnitude's root is floored and the sign
    /// restored, so odd roots of negative values truncate toward zero.
    ///
    /// A degree above `u32::MAX` is answered only when it reaches the bit
    /// length (the root is then `±1`); otherwise, which needs a value over
    /// 4 Gbit, it fails with `InvalidDomain`.
    pub fn root(&self, degree: u64) -> Result<BigIntValue, BigIntError> {
        if degree == 0 {
            return Err(BigIntError::InvalidDomain {
                op: "root",
                reason: "root of degree zero",
            });
        }
        if self.is_negative() && degree % 2 == 0 {
            return Err(BigIntError::InvalidDomain {
                op: "root",
                reason: "even root of a negative value",
            });
        }
        let value = self.as_bigint();
        if degree == 1 || value.is_zero() {
            return Ok(self.clone());
        }
        // A degree at least the bit length leaves a root in [1, 2).
        if degree >= value.bits() {
            return Ok(BigInt::from(self.signum()).into());
        }
        let degree = u32::try_from(degree).map_err(|_| BigIntError::InvalidDomain {
            op: "root",
            reason: "degree out of range",
        })?;
        let magnitude = value.magnitude().nth_root(degree);
        Ok(BigInt::from_biguint(value.sign(), magnitude).into())
    }

    /// Number of significant bits in the magnitude; zero has none.
    pub fn bit_length(&self) -> u64 {
        self.as_bigint().bits()
    }

    /// Probabilistic primality test on the magnitude.
    ///
    /// `repetitions` bounds the false-positive rate of values too large to
    /// be decided exactly by roughly `4^-repetitions`.
    pub fn probable_prime(&self, repetitions: u32) -> Primality {
        prime::probable_prime(self.as_bigint().magnitude(), repetitions)
    }

    /// Smallest probable prime strictly greater than `self`.
    pub fn next_prime(&self) -> BigIntValue {
        let value = self.as_bigint();
        if value.sign() != Sign::Plus || value.is_one() {
            return BigInt::from(2).into();
        }
        BigInt::from(prime::next_prime(value.magnitude())).into()
    }

    /// A uniformly distributed value in `[0, self)` drawn from the
    /// process-wide generator. Not suitable for cryptographic use.
    pub fn random_below(&self) -> Result<BigIntValue, BigIntError> {
        random::with_process_state(|state| state.below(self))
    }
}

/// `base^exponent` for two machine integers.
pub fn pow_pair(base: u64, exponent: u64) -> Result<BigIntValue, BigIntError> {
    let base = BigUint::from(base);
    check_pow_bits(&base, exponent, "pow_pair")?;
    Ok(BigInt::from(Pow::pow(base, exponent)).into())
}

// `bits(base) * exponent` bounds the result from above, so this may refuse a
// power slightly under the ceiling.
fn check_pow_bits(base: &BigUint, exponent: u64, op: &'static str) -> Result<(), BigIntError> {
    if base.bits() <= 1 || exponent <= 1 {
        return Ok(());
    }
    check_result_bits(base.bits().checked_mul(exponent), op)
}

fn modpow(base: &BigInt, exponent: &BigUint, modulus: &BigInt) -> BigInt {
    let modulus = modulus.magnitude();
    if modulus.is_one() {
        return BigInt::zero();
    }
    let reduced = base.mod_floor(&BigInt::from(modulus.clone()));
    BigInt::from(reduced.magnitude().modpow(exponent, modulus))
}

fn invert(value: &BigInt, modulus: &BigInt, op: &'static str) -> Result<BigInt, BigIntError> {
    let modulus = modulus.abs();
    if modulus.is_zero() {
        return Err(BigIntError::DivisionByZero { op });
    }
    if modulus.is_one() {
        return Ok(BigInt::zero());
    }
    let reduced = value.mod_floor(&modulus);
    let egcd = reduced.extended_gcd(&modulus);
    if !egcd.gcd.is_one() {
        return Err(BigIntError::NoModularInverse { op });
    }
    Ok(egcd.x.mod_floor(&modulus))
}
