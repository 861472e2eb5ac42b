use std::sync::{Arc, PoisonError, RwLock};

use mpint::{BigIntError, BigIntValue};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, Pow};

use crate::values::{RuntimeError, Value};
use crate::R;

/// Turns arbitrary host construction arguments into a `{ num, base }` record.
pub type Conditioner = dyn Fn(&[Value]) -> R + Send + Sync;

static CONDITIONER: RwLock<Option<Arc<Conditioner>>> = RwLock::new(None);

const MAX_DECIMAL_SHIFT: u64 = 1 << 16;

/// Installs the process-wide conditioner, replacing any previous one.
pub fn set_conditioner(
    conditioner: impl Fn(&[Value]) -> R + Send + Sync + 'static,
) {
    let mut slot = CONDITIONER.write().unwrap_or_else(PoisonError::into_inner);
    let replaced = slot.replace(Arc::new(conditioner)).is_some();
    log::debug!("bigint conditioner installed (replaced previous: {replaced})");
}

/// Removes the process-wide conditioner; returns whether one was installed.
pub fn clear_conditioner() -> bool {
    let mut slot = CONDITIONER.write().unwrap_or_else(PoisonError::into_inner);
    let removed = slot.take().is_some();
    if removed {
        log::debug!("bigint conditioner removed");
    }
    removed
}

pub fn has_conditioner() -> bool {
    CONDITIONER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

pub fn install_default_conditioner() {
    set_conditioner(default_conditioner);
}

fn current_conditioner() -> Option<Arc<Conditioner>> {
    CONDITIONER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Builds a value from host arguments.
///
/// A single handle or already-built value is adopted directly; anything else
/// goes through the installed conditioner and its `{ num, base }` answer is
/// parsed.
pub fn construct(mut args: Vec<Value>) -> Result<BigIntValue, RuntimeError> {
    if args.len() == 1 {
        match args.pop() {
            Some(Value::Handle(handle)) => return Ok(handle.adopt()),
            Some(Value::BigInt(value)) => return Ok(value),
            Some(other) => args.push(other),
            None => {}
        }
    }

    // The lock is released before the call so a conditioner may construct
    // values itself.
    let Some(conditioner) = current_conditioner() else {
        return Err(BigIntError::InvalidConstructionInput(
            "no conditioner installed; call set_conditioner during startup".to_string(),
        )
        .into());
    };
    log::trace!(
        "conditioning {} bigint construction argument(s)",
        args.len()
    );
    let conditioned = conditioner(&args)?;
    let (digits, base) = read_conditioned(&conditioned)?;
    let base = u32::try_from(base).map_err(|_| BigIntError::InvalidBase(base.into()))?;
    Ok(BigIntValue::parse(&digits, base)?)
}

fn read_conditioned(value: &Value) -> Result<(String, i64), BigIntError> {
    let Value::Record(fields) = value else {
        return Err(BigIntError::ConditionerRejected(format!(
            "expected a record with num and base, got {}",
            value.type_name()
        )));
    };
    let digits = match fields.get("num") {
        Some(Value::Text(text)) => text.clone(),
        Some(Value::Int(value)) => value.to_string(),
        Some(Value::BigInt(value)) => value.to_string(),
        Some(other) => {
            return Err(BigIntError::ConditionerRejected(format!(
                "num must be Text, got {}",
                other.type_name()
            )))
        }
        None => {
            return Err(BigIntError::ConditionerRejected(
                "record is missing num".to_string(),
            ))
        }
    };
    let base = match fields.get("base") {
        Some(Value::Int(base)) => *base,
        Some(other) => {
            return Err(BigIntError::ConditionerRejected(format!(
                "base must be Int, got {}",
                other.type_name()
            )))
        }
        None => {
            return Err(BigIntError::ConditionerRejected(
                "record is missing base".to_string(),
            ))
        }
    };
    Ok((digits, base))
}

/// The stock conditioner for host literals.
///
/// Accepts an Int, a Float (floored), a Text literal, or a `(Text, Int)` pair
/// naming the base explicitly. Text may carry a sign, a `0x`/`0o`/`0b`
/// prefix, `_` separators, or decimal scientific notation, which is floored.
pub fn default_conditioner(args: &[Value]) -> R {
    match args {
        [Value::Int(value)] => Ok(conditioned(value.to_string(), 10)),
        [Value::Float(value)] => Ok(conditioned(float_digits(*value)?, 10)),
        [Value::Text(text)] => {
            let (digits, base) = normalize_literal(text)?;
            Ok(conditioned(digits, base))
        }
        [Value::Text(text), Value::Int(base)] => Ok(conditioned(text.clone(), *base)),
        [Value::BigInt(value)] => Ok(conditioned(value.to_string(), 10)),
        _ => {
            let kinds: Vec<_> = args.iter().map(Value::type_name).collect();
            Err(BigIntError::ConditionerRejected(format!(
                "cannot build a bigint from ({})",
                kinds.join(", ")
            ))
            .into())
        }
    }
}

fn conditioned(digits: String, base: i64) -> Value {
    Value::record([("num", Value::Text(digits)), ("base", Value::Int(base))])
}

fn float_digits(value: f64) -> Result<String, BigIntError> {
    BigInt::from_f64(value.floor())
        .map(|value| value.to_string())
        .ok_or_else(|| BigIntError::ConditionerRejected(format!("{value} is not finite")))
}

fn normalize_literal(text: &str) -> Result<(String, i64), BigIntError> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (base, body) = match body.get(..2) {
        Some("0x" | "0X") => (16, &body[2..]),
        Some("0o" | "0O") => (8, &body[2..]),
        Some("0b" | "0B") => (2, &body[2..]),
        _ => (10, body),
    };
    if body.starts_with(['+', '-']) {
        return Err(BigIntError::MalformedDigitString {
            input: text.to_string(),
            base: base as u32,
            reason: "sign must precede the radix prefix and appear once".to_string(),
        });
    }
    let body: String = body.chars().filter(|ch| *ch != '_').collect();

    if base == 10 && body.contains(['.', 'e', 'E']) {
        let value = expand_decimal(text, &body, negative)?;
        return Ok((value.to_string(), 10));
    }
    let sign = if negative { "-" } else { "" };
    Ok((format!("{sign}{body}"), base))
}

fn expand_decimal(text: &str, body: &str, negative: bool) -> Result<BigInt, BigIntError> {
    let malformed = |reason: &str| BigIntError::MalformedDigitString {
        input: text.to_string(),
        base: 10,
        reason: reason.to_string(),
    };

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => {
            let exponent = body[at + 1..]
                .parse::<i64>()
                .map_err(|_| malformed("invalid exponent"))?;
            (&body[..at], exponent)
        }
        None => (body, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{whole}{fraction}");
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(malformed("invalid decimal mantissa"));
    }

    let fraction_len = i64::try_from(fraction.len()).map_err(|_| malformed("mantissa too long"))?;
    let shift = exponent
        .checked_sub(fraction_len)
        .filter(|shift| shift.unsigned_abs() <= MAX_DECIMAL_SHIFT)
        .ok_or_else(|| {
            BigIntError::ConditionerRejected(format!("exponent of {text:?} is out of range"))
        })?;

    let magnitude = BigIntValue::parse(&digits, 10)?.into_bigint();
    let value = if negative { -magnitude } else { magnitude };
    let scale: BigInt = Pow::pow(BigInt::from(10u32), shift.unsigned_abs());
    Ok(if shift >= 0 {
        value * scale
    } else {
        value.div_floor(&scale)
    })
}
