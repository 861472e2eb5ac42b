use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use mpint::{pow_pair, BigIntError, BigIntValue};

use crate::values::{BuiltinImpl, RuntimeError, Value};
use crate::R;

static METHODS: OnceLock<HashMap<String, BuiltinImpl>> = OnceLock::new();

pub fn get_method(name: &str) -> Option<&'static BuiltinImpl> {
    METHODS.get_or_init(build_bigint_methods).get(name)
}

pub fn method_names() -> Vec<&'static str> {
    let mut names: Vec<_> = METHODS
        .get_or_init(build_bigint_methods)
        .keys()
        .map(String::as_str)
        .collect();
    names.sort_unstable();
    names
}

/// Invokes the named method with `receiver` as its left-hand operand.
pub fn call_method(
    receiver: &BigIntValue,
    name: &str,
    args: Vec<Value>,
) -> R {
    let method = get_method(name)
        .ok_or_else(|| RuntimeError::Message(format!("BigInt has no method {name}")))?;
    method.call(receiver, args)
}

fn builtin(
    name: &str,
    arity: usize,
    func: impl Fn(&BigIntValue, Vec<Value>) -> R + Send + Sync + 'static,
) -> BuiltinImpl {
    BuiltinImpl {
        name: name.to_string(),
        arity,
        optional: 0,
        func: Arc::new(func),
    }
}

fn binary(
    name: &str,
    op: impl Fn(&BigIntValue, &BigIntValue) -> Result<BigIntValue, BigIntError> + Send + Sync + 'static,
) -> BuiltinImpl {
    let ctx = format!("bigint.{name}");
    builtin(name, 1, move |value, mut args| {
        let other = expect_bigint(take(&mut args), &ctx)?;
        Ok(Value::BigInt(op(value, &other)?))
    })
}

fn unsigned(
    name: &str,
    op: impl Fn(&BigIntValue, u64) -> Result<BigIntValue, BigIntError> + Send + Sync + 'static,
) -> BuiltinImpl {
    let ctx = format!("bigint.{name}");
    builtin(name, 1, move |value, mut args| {
        let other = expect_u64(take(&mut args), &ctx)?;
        Ok(Value::BigInt(op(value, other)?))
    })
}

fn unary(
    name: &str,
    op: impl Fn(&BigIntValue) -> Result<BigIntValue, BigIntError> + Send + Sync + 'static,
) -> BuiltinImpl {
    builtin(name, 0, move |value, _| Ok(Value::BigInt(op(value)?)))
}

fn build_bigint_methods() -> HashMap<String, BuiltinImpl> {
    let methods = vec![
        BuiltinImpl {
            optional: 1,
            ..builtin("toString", 1, |value, mut args| {
                let base = match args.pop() {
                    Some(base) => expect_base(base, "bigint.toString")?,
                    None => 10,
                };
                Ok(Value::Text(value.to_string_radix(base)?))
            })
        },
        binary("badd", |value, other| Ok(value.add(other))),
        binary("bsub", |value, other| Ok(value.sub(other))),
        binary("bmul", |value, other| Ok(value.mul(other))),
        binary("bdiv", BigIntValue::div),
        unsigned("uadd", |value, other| Ok(value.add_u64(other))),
        unsigned("usub", |value, other| Ok(value.sub_u64(other))),
        unsigned("umul", |value, other| Ok(value.mul_u64(other))),
        unsigned("udiv", BigIntValue::div_u64),
        unsigned("umul2exp", BigIntValue::mul_2exp),
        unsigned("udiv2exp", |value, shift| Ok(value.div_2exp(shift))),
        unary("babs", |value| Ok(value.abs())),
        unary("bneg", |value| Ok(value.neg())),
        binary("bmod", BigIntValue::modulo),
        unsigned("umod", BigIntValue::modulo_u64),
        builtin("bpowm", 2, |value, mut args| {
            let modulus = expect_bigint(take(&mut args), "bigint.bpowm")?;
            let exponent = expect_bigint(take(&mut args), "bigint.bpowm")?;
            Ok(Value::BigInt(value.pow_mod(&exponent, &modulus)?))
        }),
        builtin("upowm", 2, |value, mut args| {
            let modulus = expect_bigint(take(&mut args), "bigint.upowm")?;
            let exponent = expect_u64(take(&mut args), "bigint.upowm")?;
            Ok(Value::BigInt(value.pow_mod_u64(exponent, &modulus)?))
        }),
        unsigned("upow", BigIntValue::pow_u64),
        // Kept for callers of the old surface; the receiver plays no part.
        builtin("uupow", 2, |_, mut args| {
            let exponent = expect_u64(take(&mut args), "bigint.uupow")?;
            let base = expect_u64(take(&mut args), "bigint.uupow")?;
            Ok(Value::BigInt(pow_pair(base, exponent)?))
        }),
        unary("brand0", BigIntValue::random_below),
        builtin("probprime", 1, |value, mut args| {
            let reps = expect_u64(take(&mut args), "bigint.probprime")?;
            let reps = u32::try_from(reps).map_err(|_| {
                RuntimeError::Message("bigint.probprime expects a u32 repetition count".into())
            })?;
            Ok(Value::Int(i64::from(value.probable_prime(reps).as_i32())))
        }),
        unary("nextprime", |value| Ok(value.next_prime())),
        builtin("bcompare", 1, |value, mut args| {
            let other = expect_bigint(take(&mut args), "bigint.bcompare")?;
            Ok(Value::Int(value.compare(&other) as i64))
        }),
        builtin("scompare", 1, |value, mut args| {
            let other = expect_i64(take(&mut args), "bigint.scompare")?;
            Ok(Value::Int(value.compare_i64(other) as i64))
        }),
        builtin("ucompare", 1, |value, mut args| {
            let other = expect_u64(take(&mut args), "bigint.ucompare")?;
            Ok(Value::Int(value.compare_u64(other) as i64))
        }),
        binary("band", |value, other| Ok(value.and(other))),
        binary("bor", |value, other| Ok(value.or(other))),
        binary("bxor", |value, other| Ok(value.xor(other))),
        binary("binvertm", BigIntValue::invert_mod),
        unary("bsqrt", BigIntValue::sqrt),
        unsigned("broot", BigIntValue::root),
        builtin("bitLength", 0, |value, _| {
            let bits = i64::try_from(value.bit_length())
                .map_err(|_| RuntimeError::Message("bigint.bitLength overflow".into()))?;
            Ok(Value::Int(bits))
        }),
        binary("bgcd", |value, other| Ok(value.gcd(other))),
    ];
    methods
        .into_iter()
        .map(|method| (method.name.clone(), method))
        .collect()
}

fn take(args: &mut Vec<Value>) -> Value {
    args.pop().unwrap_or(Value::Unit)
}

fn expect_bigint(value: Value, ctx: &str) -> Result<BigIntValue, RuntimeError> {
    match value {
        Value::BigInt(value) => Ok(value),
        Value::Handle(handle) => Ok(handle.adopt()),
        other => Err(RuntimeError::Message(format!(
            "{ctx} expects BigInt, got {}",
            other.type_name()
        ))),
    }
}

fn expect_u64(value: Value, ctx: &str) -> Result<u64, RuntimeError> {
    let out = match &value {
        Value::Int(value) => u64::try_from(*value).ok(),
        Value::BigInt(value) => value.to_u64(),
        _ => None,
    };
    out.ok_or_else(|| RuntimeError::Message(format!("{ctx} expects a non-negative Int")))
}

fn expect_i64(value: Value, ctx: &str) -> Result<i64, RuntimeError> {
    let out = match &value {
        Value::Int(value) => Some(*value),
        Value::BigInt(value) => value.to_i64(),
        _ => None,
    };
    out.ok_or_else(|| RuntimeError::Message(format!("{ctx} expects Int")))
}

fn expect_base(value: Value, ctx: &str) -> Result<u32, RuntimeError> {
    match value {
        Value::Int(base) => {
            u32::try_from(base).map_err(|_| BigIntError::InvalidBase(base.into()).into())
        }
        other => Err(RuntimeError::Message(format!(
            "{ctx} expects Int, got {}",
            other.type_name()
        ))),
    }
}
