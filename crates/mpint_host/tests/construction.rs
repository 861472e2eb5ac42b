use std::sync::{Mutex, MutexGuard};

use mpint::BigIntError;
use mpint_host::{
    clear_conditioner, construct, has_conditioner, install_default_conditioner, set_conditioner,
    Handle, RuntimeError, Value,
};
use num_bigint::BigInt;

// The conditioner is process-wide; tests touching it run one at a time.
static REGISTRY: Mutex<()> = Mutex::new(());

fn lock_registry() -> MutexGuard<'static, ()> {
    let _ = env_logger::builder().is_test(true).try_init();
    REGISTRY.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn decimal(args: Vec<Value>) -> String {
    construct(args).expect("construct").to_string()
}

#[test]
fn construction_without_conditioner_is_a_setup_fault() {
    let _guard = lock_registry();
    clear_conditioner();
    assert!(!has_conditioner());
    let err = construct(vec![text("1")]).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::BigInt(BigIntError::InvalidConstructionInput(_))
    ));
}

#[test]
fn handles_are_adopted_without_a_conditioner() {
    let _guard = lock_registry();
    clear_conditioner();
    let handle = Handle::new(BigInt::from(-99));
    assert_eq!(construct(vec![Value::Handle(handle)]).unwrap().to_string(), "-99");

    let built = mpint::BigIntValue::from(7u64);
    assert_eq!(construct(vec![Value::BigInt(built.clone())]).unwrap(), built);
}

#[test]
fn default_conditioner_reads_host_literals() {
    let _guard = lock_registry();
    install_default_conditioner();

    assert_eq!(decimal(vec![Value::Int(1337)]), "1337");
    assert_eq!(decimal(vec![text("1337")]), "1337");
    assert_eq!(
        decimal(vec![text("55555555555555555555555555")]),
        "55555555555555555555555555"
    );
    assert_eq!(decimal(vec![text("-0x1F")]), "-31");
    assert_eq!(decimal(vec![text("0b1010")]), "10");
    assert_eq!(decimal(vec![text("0o777")]), "511");
    assert_eq!(decimal(vec![text("1_000_000")]), "1000000");
    assert_eq!(decimal(vec![text("  42  ")]), "42");
    assert_eq!(decimal(vec![text("zz"), Value::Int(36)]), "1295");
}

#[test]
fn default_conditioner_floors_decimal_notation() {
    let _guard = lock_registry();
    install_default_conditioner();

    assert_eq!(decimal(vec![text("1e+100")]), format!("1{}", "0".repeat(100)));
    assert_eq!(
        decimal(vec![text("1.23e+45")]),
        format!("123{}", "0".repeat(43))
    );
    for i in 0..10u32 {
        let expected = (123456u64 * 10u64.pow(i)) / 100000;
        assert_eq!(decimal(vec![text(&format!("1.23456e+{i}"))]), expected.to_string());
    }
    assert_eq!(decimal(vec![text("1.23e-45")]), "0");
    assert_eq!(decimal(vec![text("-1.5")]), "-2");
    assert_eq!(decimal(vec![Value::Float(2.9)]), "2");
    assert_eq!(decimal(vec![Value::Float(-2.1)]), "-3");
}

#[test]
fn default_conditioner_rejects_unusable_input() {
    let _guard = lock_registry();
    install_default_conditioner();

    assert!(matches!(
        construct(vec![Value::Bool(true)]),
        Err(RuntimeError::BigInt(BigIntError::ConditionerRejected(_)))
    ));
    assert!(matches!(
        construct(vec![Value::Float(f64::NAN)]),
        Err(RuntimeError::BigInt(BigIntError::ConditionerRejected(_)))
    ));
    assert!(matches!(
        construct(vec![text("12abc")]),
        Err(RuntimeError::BigInt(BigIntError::MalformedDigitString { .. }))
    ));
    assert!(matches!(
        construct(vec![text("1e")]),
        Err(RuntimeError::BigInt(BigIntError::MalformedDigitString { .. }))
    ));
    for literal in ["0x-5", "+-5", "--5", "0b-1", "0o+7", "-0x+f", "-+1.5"] {
        assert!(
            matches!(
                construct(vec![text(literal)]),
                Err(RuntimeError::BigInt(BigIntError::MalformedDigitString { .. }))
            ),
            "{literal:?} should be rejected"
        );
    }
    assert!(matches!(
        construct(vec![text("10"), Value::Int(99)]),
        Err(RuntimeError::BigInt(BigIntError::InvalidBase(99)))
    ));
}

#[test]
fn custom_conditioners_replace_each_other() {
    let _guard = lock_registry();
    set_conditioner(|_| {
        Ok(Value::record([
            ("num", Value::Text("ff".to_string())),
            ("base", Value::Int(16)),
        ]))
    });
    assert_eq!(decimal(vec![Value::Unit]), "255");

    set_conditioner(|args| match args {
        [Value::Int(value)] => Ok(Value::record([
            ("num", Value::Int(value * 2)),
            ("base", Value::Int(10)),
        ])),
        _ => Err(RuntimeError::Message("only ints".to_string())),
    });
    assert_eq!(decimal(vec![Value::Int(21)]), "42");
    assert_eq!(
        construct(vec![Value::Unit]),
        Err(RuntimeError::Message("only ints".to_string()))
    );
    assert!(clear_conditioner());
    assert!(!clear_conditioner());
}

#[test]
fn conditioner_answers_must_be_num_base_records() {
    let _guard = lock_registry();

    set_conditioner(|_| Ok(Value::Int(5)));
    assert!(matches!(
        construct(vec![Value::Unit]),
        Err(RuntimeError::BigInt(BigIntError::ConditionerRejected(_)))
    ));

    set_conditioner(|_| Ok(Value::record([("num", Value::Text("5".to_string()))])));
    assert!(matches!(
        construct(vec![Value::Unit]),
        Err(RuntimeError::BigInt(BigIntError::ConditionerRejected(_)))
    ));

    set_conditioner(|_| {
        Ok(Value::record([
            ("num", Value::Text("5".to_string())),
            ("base", Value::Text("10".to_string())),
        ]))
    });
    assert!(matches!(
        construct(vec![Value::Unit]),
        Err(RuntimeError::BigInt(BigIntError::ConditionerRejected(_)))
    ));

    set_conditioner(|_| {
        Ok(Value::record([
            ("num", Value::Text("5".to_string())),
            ("base", Value::Int(1)),
        ]))
    });
    assert!(matches!(
        construct(vec![Value::Unit]),
        Err(RuntimeError::BigInt(BigIntError::InvalidBase(1)))
    ));
    clear_conditioner();
}
