use num_bigint::{BigInt, BigUint, Sign};

use crate::error::BigIntError;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 62;

// Bases up to 36 print lowercase and parse case-insensitively; above 36 the
// uppercase letters are 10..=35 and the lowercase letters 36..=61.
const LOWER_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const WIDE_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub(crate) fn check_base(base: impl Into<i128>) -> Result<u32, BigIntError> {
    let base = base.into();
    if base < i128::from(MIN_BASE) || base > i128::from(MAX_BASE) {
        return Err(BigIntError::InvalidBase(base));
    }
    Ok(base as u32)
}

fn digit_value(byte: u8, base: u32) -> Option<u8> {
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'A'..=b'Z' => byte - b'A' + 10,
        b'a'..=b'z' if base <= 36 => byte - b'a' + 10,
        b'a'..=b'z' => byte - b'a' + 36,
        _ => return None,
    };
    (u32::from(value) < base).then_some(value)
}

pub(crate) fn parse_digits(text: &str, base: u32) -> Result<BigInt, BigIntError> {
    let base = check_base(base)?;
    let (sign, body) = match text.as_bytes().first() {
        Some(b'-') => (Sign::Minus, &text[1..]),
        Some(b'+') => (Sign::Plus, &text[1..]),
        _ => (Sign::Plus, text),
    };
    if body.is_empty() {
        return Err(BigIntError::malformed(text, base, "no digits"));
    }

    let mut digits = Vec::with_capacity(body.len());
    for (offset, ch) in body.char_indices() {
        let value = u8::try_from(ch)
            .ok()
            .and_then(|byte| digit_value(byte, base))
            .ok_or_else(|| {
                BigIntError::malformed(
                    text,
                    base,
                    format!("unexpected character {ch:?} at offset {offset}"),
                )
            })?;
        digits.push(value);
    }

    let magnitude = BigUint::from_radix_be(&digits, base)
        .ok_or_else(|| BigIntError::malformed(text, base, "digit out of range"))?;
    // from_biguint folds a zero magnitude to NoSign, so "-0" stays canonical.
    Ok(BigInt::from_biguint(sign, magnitude))
}

pub(crate) fn format_digits(value: &BigInt, base: u32) -> Result<String, BigIntError> {
    let base = check_base(base)?;
    let alphabet: &[u8] = if base <= 36 {
        LOWER_ALPHABET
    } else {
        WIDE_ALPHABET
    };

    let (sign, digits) = value.to_radix_be(base);
    let mut out = String::with_capacity(digits.len() + 1);
    if sign == Sign::Minus {
        out.push('-');
    }
    if digits.is_empty() {
        out.push('0');
    }
    for digit in digits {
        out.push(char::from(alphabet[usize::from(digit)]));
    }
    Ok(out)
}
