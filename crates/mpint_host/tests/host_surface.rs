use mpint::{BigIntError, BigIntValue};
use mpint_host::{call_method, format_value, get_method, method_names, RuntimeError, Value};

fn big(text: &str) -> BigIntValue {
    BigIntValue::parse(text, 10).expect("valid decimal literal")
}

fn call(receiver: &str, name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
    call_method(&big(receiver), name, args)
}

fn bigint(text: &str) -> Value {
    Value::BigInt(big(text))
}

#[test]
fn every_method_is_registered() {
    let expected = [
        "babs", "badd", "band", "bcompare", "bdiv", "bgcd", "binvertm", "bitLength", "bmod",
        "bmul", "bneg", "bor", "bpowm", "brand0", "broot", "bsqrt", "bsub", "bxor", "nextprime",
        "probprime", "scompare", "toString", "uadd", "ucompare", "udiv", "udiv2exp", "umod",
        "umul", "umul2exp", "upow", "upowm", "usub", "uupow",
    ];
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(method_names(), expected);
    assert_eq!(get_method("bpowm").map(|method| method.arity), Some(2));
    assert!(get_method("bsqrtrem").is_none());
}

#[test]
fn binary_methods_return_fresh_values() {
    let receiver = big("55555555555555555555555555");
    let sum = call_method(&receiver, "badd", vec![bigint("44444444444444444444444445")]).unwrap();
    assert_eq!(sum, bigint("100000000000000000000000000"));
    assert_eq!(receiver, big("55555555555555555555555555"));

    assert_eq!(call("7", "bsub", vec![bigint("10")]).unwrap(), bigint("-3"));
    assert_eq!(call("-7", "bmul", vec![bigint("6")]).unwrap(), bigint("-42"));
    assert_eq!(call("-7", "bdiv", vec![bigint("2")]).unwrap(), bigint("-4"));
    assert_eq!(call("-7", "bmod", vec![bigint("2")]).unwrap(), bigint("1"));
    assert_eq!(call("12", "band", vec![bigint("10")]).unwrap(), bigint("8"));
    assert_eq!(call("12", "bor", vec![bigint("10")]).unwrap(), bigint("14"));
    assert_eq!(call("12", "bxor", vec![bigint("10")]).unwrap(), bigint("6"));
    assert_eq!(call("48", "bgcd", vec![bigint("-18")]).unwrap(), bigint("6"));
    assert_eq!(call("3", "binvertm", vec![bigint("11")]).unwrap(), bigint("4"));
}

#[test]
fn unsigned_methods_accept_host_ints() {
    assert_eq!(call("10", "uadd", vec![Value::Int(5)]).unwrap(), bigint("15"));
    assert_eq!(call("10", "usub", vec![Value::Int(15)]).unwrap(), bigint("-5"));
    assert_eq!(call("10", "umul", vec![Value::Int(5)]).unwrap(), bigint("50"));
    assert_eq!(call("10", "udiv", vec![Value::Int(4)]).unwrap(), bigint("2"));
    assert_eq!(call("-10", "umod", vec![Value::Int(3)]).unwrap(), bigint("2"));
    assert_eq!(call("3", "umul2exp", vec![Value::Int(4)]).unwrap(), bigint("48"));
    assert_eq!(call("-7", "udiv2exp", vec![Value::Int(1)]).unwrap(), bigint("-3"));
    assert_eq!(call("-2", "upow", vec![Value::Int(5)]).unwrap(), bigint("-32"));
    assert_eq!(call("27", "broot", vec![Value::Int(3)]).unwrap(), bigint("3"));
    assert!(call("10", "uadd", vec![Value::Int(-1)]).is_err());
}

#[test]
fn modular_power_takes_exponent_then_modulus() {
    assert_eq!(
        call("4", "bpowm", vec![bigint("13"), bigint("497")]).unwrap(),
        bigint("445")
    );
    assert_eq!(
        call("4", "upowm", vec![Value::Int(13), bigint("497")]).unwrap(),
        bigint("445")
    );
}

#[test]
fn pair_power_ignores_the_receiver() {
    let left = call("999", "uupow", vec![Value::Int(2), Value::Int(10)]).unwrap();
    let right = call("-1", "uupow", vec![Value::Int(2), Value::Int(10)]).unwrap();
    assert_eq!(left, bigint("1024"));
    assert_eq!(left, right);
}

#[test]
fn scalar_results_come_back_as_host_ints() {
    assert_eq!(call("97", "probprime", vec![Value::Int(25)]).unwrap(), Value::Int(2));
    assert_eq!(call("100", "probprime", vec![Value::Int(25)]).unwrap(), Value::Int(0));
    assert_eq!(call("-5", "bcompare", vec![bigint("3")]).unwrap(), Value::Int(-1));
    assert_eq!(call("5", "scompare", vec![Value::Int(-5)]).unwrap(), Value::Int(1));
    assert_eq!(call("5", "ucompare", vec![Value::Int(5)]).unwrap(), Value::Int(0));
    assert_eq!(call("0", "bitLength", vec![]).unwrap(), Value::Int(0));
    assert_eq!(call("255", "bitLength", vec![]).unwrap(), Value::Int(8));
}

#[test]
fn unary_methods() {
    assert_eq!(call("-9", "babs", vec![]).unwrap(), bigint("9"));
    assert_eq!(call("-9", "bneg", vec![]).unwrap(), bigint("9"));
    assert_eq!(call("17", "bsqrt", vec![]).unwrap(), bigint("4"));
    assert_eq!(call("10", "nextprime", vec![]).unwrap(), bigint("11"));
    match call("1000", "brand0", vec![]).unwrap() {
        Value::BigInt(drawn) => assert!(drawn < big("1000") && !drawn.is_negative()),
        other => panic!("expected BigInt, got {}", format_value(&other)),
    }
}

#[test]
fn to_string_defaults_to_decimal() {
    assert_eq!(call("-255", "toString", vec![]).unwrap(), Value::Text("-255".into()));
    assert_eq!(
        call("-255", "toString", vec![Value::Int(16)]).unwrap(),
        Value::Text("-ff".into())
    );
    assert_eq!(
        call("61", "toString", vec![Value::Int(62)]).unwrap(),
        Value::Text("z".into())
    );
    for base in [1, 63, -2] {
        assert!(matches!(
            call("10", "toString", vec![Value::Int(base)]),
            Err(RuntimeError::BigInt(BigIntError::InvalidBase(_)))
        ));
    }
}

#[test]
fn errors_surface_as_runtime_errors() {
    assert_eq!(
        call("1", "bdiv", vec![bigint("0")]),
        Err(RuntimeError::BigInt(BigIntError::DivisionByZero { op: "div" }))
    );
    assert!(matches!(
        call("6", "binvertm", vec![bigint("9")]),
        Err(RuntimeError::BigInt(BigIntError::NoModularInverse { .. }))
    ));
    assert!(matches!(
        call("-4", "bsqrt", vec![]),
        Err(RuntimeError::BigInt(BigIntError::InvalidDomain { .. }))
    ));

    let err = call("1", "bfrobnicate", vec![]).unwrap_err();
    assert_eq!(err.to_string(), "BigInt has no method bfrobnicate");

    let err = call("1", "badd", vec![]).unwrap_err();
    assert_eq!(err.to_string(), "badd expects 1 arguments, got 0");

    let err = call("1", "toString", vec![Value::Int(10), Value::Int(10)]).unwrap_err();
    assert_eq!(err.to_string(), "toString expects 0 to 1 arguments, got 2");

    assert!(matches!(
        call("1", "badd", vec![Value::Text("2".into())]),
        Err(RuntimeError::Message(_))
    ));
}

#[test]
fn oversized_results_are_errors_not_aborts() {
    for (name, args) in [
        ("umul2exp", vec![Value::Int(i64::MAX)]),
        ("upow", vec![Value::Int(i64::MAX)]),
        ("uupow", vec![Value::Int(7), Value::Int(i64::MAX)]),
    ] {
        assert!(
            matches!(
                call("3", name, args),
                Err(RuntimeError::BigInt(BigIntError::InvalidDomain { .. }))
            ),
            "{name} should refuse an oversized result"
        );
    }
}

#[test]
fn formatting_host_values() {
    let record = Value::record([("num", Value::Text("ff".into())), ("base", Value::Int(16))]);
    assert_eq!(format_value(&record), "{ base: 16, num: \"ff\" }");
    assert_eq!(format_value(&bigint("-12")), "-12n");
}
